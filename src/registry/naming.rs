//! Naming heuristics that turn operation names into a command taxonomy.
//!
//! Operation names follow a `VerbObject` convention (`GetWallet`,
//! `ListStakePools`). The tables here iron out the historical
//! irregularities: era-suffixed duplicates collapse onto one canonical
//! name, and hand-listed plural objects collapse onto their singular
//! spelling. There is deliberately no generic depluralization — `address`
//! and `statistics` style ambiguities make stemming worse than a short
//! table.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Leading capitalized word-run (the verb), then the object remainder,
    /// which itself starts with a capital. Anchored so a verb alone is not
    /// split apart by backtracking.
    static ref METHOD_NAME: Regex = Regex::new("^(?P<verb>[A-Z][a-z]+)(?P<object>[A-Z][A-Za-z]*)$").unwrap();
    /// Just the leading capitalized word-run.
    static ref METHOD_PREFIX: Regex = Regex::new("^[A-Z][a-z]+").unwrap();
}

/// Era token marking the pre-Shelley operation variants.
pub const BYRON_TOKEN: &str = "Byron";

/// Canonical-name remappings for historically inconsistent operation names.
///
/// The Shelley-suffixed spellings collapse onto the plain name, so that the
/// Byron-prefixed sibling pairs up with them during variant merging.
pub const METHOD_NAME_REMAPPINGS: &[(&str, &str)] = &[
    ("GetShelleyWalletMigrationInfo", "GetWalletMigrationInfo"),
    ("MigrateShelleyWallet", "MigrateWallet"),
];

/// Hand-listed plural object spellings and their singular command group.
pub const OBJECT_REMAPPINGS: &[(&str, &str)] = &[
    ("Transactions", "Transaction"),
    ("Assets", "Asset"),
    ("Wallets", "Wallet"),
    ("Addresses", "Address"),
    ("StakePools", "StakePool"),
];

/// Naming tables used during discovery. Injected so tests can exercise the
/// heuristics with their own fixtures.
#[derive(Debug, Clone, Copy)]
pub struct NamingTables {
    pub method_remappings: &'static [(&'static str, &'static str)],
    pub object_remappings: &'static [(&'static str, &'static str)],
}

impl Default for NamingTables {
    fn default() -> Self {
        NamingTables {
            method_remappings: METHOD_NAME_REMAPPINGS,
            object_remappings: OBJECT_REMAPPINGS,
        }
    }
}

impl NamingTables {
    /// Apply the canonical-name remapping, if any.
    pub fn remap_method(&self, name: &str) -> String {
        self.method_remappings
            .iter()
            .find(|(from, _)| *from == name)
            .map(|(_, to)| (*to).to_string())
            .unwrap_or_else(|| name.to_string())
    }

    /// Collapse a plural object token onto its singular spelling.
    pub fn normalize_object(&self, object: &str) -> String {
        self.object_remappings
            .iter()
            .find(|(from, _)| *from == object)
            .map(|(_, to)| (*to).to_string())
            .unwrap_or_else(|| object.to_string())
    }
}

/// Split a canonical operation name into (lowercased verb, object token).
///
/// Names that do not match the `VerbObject` shape yield `None` and are not
/// exposed as commands.
pub fn split_method_name(name: &str) -> Option<(String, String)> {
    let captures = METHOD_NAME.captures(name)?;
    Some((
        captures["verb"].to_lowercase(),
        captures["object"].to_string(),
    ))
}

/// Detect and strip the Byron era token from an object token.
///
/// Returns the cleaned object and whether the token was present.
pub fn strip_byron(object: &str) -> (String, bool) {
    if object.contains(BYRON_TOKEN) {
        (object.replacen(BYRON_TOKEN, "", 1), true)
    } else {
        (object.to_string(), false)
    }
}

/// Candidate names of the Byron-era sibling of a canonical method name:
/// the era token inserted after the leading verb run, or prefixed outright
/// (`SelectCoins` pairs with `ByronSelectCoins`).
pub fn byron_sibling_candidates(name: &str) -> Vec<String> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(prefix) = METHOD_PREFIX.find(name) {
        candidates.push(format!(
            "{}{}{}",
            &name[..prefix.end()],
            BYRON_TOKEN,
            &name[prefix.end()..]
        ));
    }
    candidates.push(format!("{BYRON_TOKEN}{name}"));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_method_name() {
        assert_eq!(
            split_method_name("GetWallet"),
            Some(("get".to_string(), "Wallet".to_string()))
        );
        assert_eq!(
            split_method_name("GetUTxOsStatistics"),
            Some(("get".to_string(), "UTxOsStatistics".to_string()))
        );
        assert_eq!(
            split_method_name("ByronSelectCoins"),
            Some(("byron".to_string(), "SelectCoins".to_string()))
        );
        assert_eq!(split_method_name("lowercase"), None);
        assert_eq!(split_method_name("Get"), None);
    }

    #[test]
    fn test_strip_byron() {
        assert_eq!(strip_byron("ByronWallet"), ("Wallet".to_string(), true));
        assert_eq!(strip_byron("WalletMigrationInfo"), ("WalletMigrationInfo".to_string(), false));
    }

    #[test]
    fn test_byron_sibling_candidates() {
        assert_eq!(
            byron_sibling_candidates("ListWallets"),
            vec!["ListByronWallets".to_string(), "ByronListWallets".to_string()]
        );
        assert_eq!(
            byron_sibling_candidates("SelectCoins"),
            vec!["SelectByronCoins".to_string(), "ByronSelectCoins".to_string()]
        );
    }
}
