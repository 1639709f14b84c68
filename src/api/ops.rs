//! Static manifest of the wallet API operation set.
//!
//! The cardano-wallet HTTP API is consumed through a generated-style
//! operation table rather than one hand-written method per endpoint: each
//! [`OperationSpec`] carries everything needed to build the request (route,
//! ordered argument names, extra-argument classification), and everything
//! the command registry needs to derive the CLI surface from it at startup.
//!
//! Raw-body variants (`…WithBody`) mirror the typed operations but accept an
//! opaque content-type/byte-stream pair; they are listed here because they
//! are part of the client surface, and skipped during command discovery.

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// Value kind of one params-struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Bool,
    Int,
    Text,
}

/// One field of an operation's params struct.
///
/// `field` is the wire name of the query parameter; the CLI flag name is
/// derived from it (lowercased, whitespace stripped). Nullable fields are
/// only sent when the operator explicitly sets them — the API distinguishes
/// an omitted parameter from an explicit zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    pub field: &'static str,
    pub kind: FlagKind,
    pub nullable: bool,
}

impl FlagSpec {
    /// CLI flag name: the field name, lowercased with whitespace stripped.
    pub fn flag_name(&self) -> String {
        self.field
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase()
    }
}

/// Classification of the optional trailing non-string argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraSpec {
    /// Only string parameters.
    None,
    /// Optional params struct, projected onto command-line flags.
    Params(&'static [FlagSpec]),
    /// JSON request body, supplied inline or from a file.
    Body,
    /// Raw-stream body variant (content type + opaque bytes). Not exposed
    /// as a command.
    RawBody,
}

/// One operation of the wallet API.
///
/// `args` lists the argument names in declared order, including the trailing
/// `params`/`body` name when `extra` says there is one; `string_args` strips
/// that tail off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub name: &'static str,
    pub http: HttpMethod,
    pub path: &'static str,
    pub args: &'static [&'static str],
    pub extra: ExtraSpec,
}

impl OperationSpec {
    /// Positional (string) argument names, without the extra-argument tail.
    pub fn string_args(&self) -> &'static [&'static str] {
        match self.extra {
            ExtraSpec::None => self.args,
            ExtraSpec::Params(_) | ExtraSpec::Body => &self.args[..self.args.len() - 1],
            // contentType + body
            ExtraSpec::RawBody => &self.args[..self.args.len() - 2],
        }
    }

    /// Names of the `{placeholder}` segments in the route, in order.
    pub fn path_placeholders(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            let Some(end) = rest[start..].find('}') else { break };
            out.push(&rest[start + 1..start + end]);
            rest = &rest[start + end + 1..];
        }
        out
    }
}

use FlagKind::{Bool, Int, Text};

const ADDRESS_FILTER_PARAMS: &[FlagSpec] = &[FlagSpec { field: "state", kind: Text, nullable: true }];

const TRANSACTION_FILTER_PARAMS: &[FlagSpec] = &[
    FlagSpec { field: "start", kind: Text, nullable: true },
    FlagSpec { field: "end", kind: Text, nullable: true },
    FlagSpec { field: "order", kind: Text, nullable: true },
    FlagSpec { field: "minWithdrawal", kind: Int, nullable: true },
];

const NETWORK_CLOCK_PARAMS: &[FlagSpec] =
    &[FlagSpec { field: "forceNtpCheck", kind: Bool, nullable: true }];

const SMASH_HEALTH_PARAMS: &[FlagSpec] = &[FlagSpec { field: "url", kind: Text, nullable: true }];

const STAKE_POOL_PARAMS: &[FlagSpec] = &[FlagSpec { field: "stake", kind: Int, nullable: true }];

macro_rules! op {
    ($name:literal, $http:ident, $path:literal, [$($arg:literal),*], $extra:expr) => {
        OperationSpec {
            name: $name,
            http: HttpMethod::$http,
            path: $path,
            args: &[$($arg),*],
            extra: $extra,
        }
    };
}

/// The full operation inventory of the wallet API client.
///
/// Order follows the upstream API sections (addresses, Byron wallets,
/// network, proxy, settings, shared wallets, SMASH, stake pools, Shelley
/// wallets); the registry preserves this order when resolving collisions.
pub const OPERATIONS: &[OperationSpec] = &[
    // Addresses
    op!("PostAnyAddress", Post, "/addresses", ["body"], ExtraSpec::Body),
    op!("PostAnyAddressWithBody", Post, "/addresses", ["contentType", "body"], ExtraSpec::RawBody),
    op!("InspectAddress", Get, "/addresses/{addressId}", ["addressId"], ExtraSpec::None),
    // Byron wallets
    op!("ListByronWallets", Get, "/byron-wallets", [], ExtraSpec::None),
    op!("PostByronWallet", Post, "/byron-wallets", ["body"], ExtraSpec::Body),
    op!("PostByronWalletWithBody", Post, "/byron-wallets", ["contentType", "body"], ExtraSpec::RawBody),
    op!("DeleteByronWallet", Delete, "/byron-wallets/{walletId}", ["walletId"], ExtraSpec::None),
    op!("GetByronWallet", Get, "/byron-wallets/{walletId}", ["walletId"], ExtraSpec::None),
    op!("PutByronWallet", Put, "/byron-wallets/{walletId}", ["walletId", "body"], ExtraSpec::Body),
    op!("PutByronWalletWithBody", Put, "/byron-wallets/{walletId}", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("ListByronAddresses", Get, "/byron-wallets/{walletId}/addresses", ["walletId", "params"], ExtraSpec::Params(ADDRESS_FILTER_PARAMS)),
    op!("CreateAddress", Post, "/byron-wallets/{walletId}/addresses", ["walletId", "body"], ExtraSpec::Body),
    op!("CreateAddressWithBody", Post, "/byron-wallets/{walletId}/addresses", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("ImportAddresses", Put, "/byron-wallets/{walletId}/addresses", ["walletId", "body"], ExtraSpec::Body),
    op!("ImportAddressesWithBody", Put, "/byron-wallets/{walletId}/addresses", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("ImportAddress", Put, "/byron-wallets/{walletId}/addresses/{addressId}", ["walletId", "addressId"], ExtraSpec::None),
    op!("ListByronAssets", Get, "/byron-wallets/{walletId}/assets", ["walletId"], ExtraSpec::None),
    op!("GetByronAssetDefault", Get, "/byron-wallets/{walletId}/assets/{policyId}", ["walletId", "policyId"], ExtraSpec::None),
    op!("GetByronAsset", Get, "/byron-wallets/{walletId}/assets/{policyId}/{assetName}", ["walletId", "policyId", "assetName"], ExtraSpec::None),
    op!("ByronSelectCoins", Post, "/byron-wallets/{walletId}/coin-selections/random", ["walletId", "body"], ExtraSpec::Body),
    op!("ByronSelectCoinsWithBody", Post, "/byron-wallets/{walletId}/coin-selections/random", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("GetByronWalletMigrationInfo", Get, "/byron-wallets/{walletId}/migrations", ["walletId"], ExtraSpec::None),
    op!("MigrateByronWallet", Post, "/byron-wallets/{walletId}/migrations", ["walletId", "body"], ExtraSpec::Body),
    op!("MigrateByronWalletWithBody", Post, "/byron-wallets/{walletId}/migrations", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("PutByronWalletPassphrase", Put, "/byron-wallets/{walletId}/passphrase", ["walletId", "body"], ExtraSpec::Body),
    op!("PutByronWalletPassphraseWithBody", Put, "/byron-wallets/{walletId}/passphrase", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("PostByronTransactionFee", Post, "/byron-wallets/{walletId}/payment-fees", ["walletId", "body"], ExtraSpec::Body),
    op!("PostByronTransactionFeeWithBody", Post, "/byron-wallets/{walletId}/payment-fees", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("GetByronUTxOsStatistics", Get, "/byron-wallets/{walletId}/statistics/utxos", ["walletId"], ExtraSpec::None),
    op!("ListByronTransactions", Get, "/byron-wallets/{walletId}/transactions", ["walletId", "params"], ExtraSpec::Params(TRANSACTION_FILTER_PARAMS)),
    op!("PostByronTransaction", Post, "/byron-wallets/{walletId}/transactions", ["walletId", "body"], ExtraSpec::Body),
    op!("PostByronTransactionWithBody", Post, "/byron-wallets/{walletId}/transactions", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("DeleteByronTransaction", Delete, "/byron-wallets/{walletId}/transactions/{transactionId}", ["walletId", "transactionId"], ExtraSpec::None),
    op!("GetByronTransaction", Get, "/byron-wallets/{walletId}/transactions/{transactionId}", ["walletId", "transactionId"], ExtraSpec::None),
    // Network
    op!("GetNetworkClock", Get, "/network/clock", ["params"], ExtraSpec::Params(NETWORK_CLOCK_PARAMS)),
    op!("GetNetworkInformation", Get, "/network/information", [], ExtraSpec::None),
    op!("GetNetworkParameters", Get, "/network/parameters", [], ExtraSpec::None),
    // Proxy: only the raw variant exists upstream
    op!("PostExternalTransactionWithBody", Post, "/proxy/transactions", ["contentType", "body"], ExtraSpec::RawBody),
    // Settings
    op!("GetSettings", Get, "/settings", [], ExtraSpec::None),
    op!("PutSettings", Put, "/settings", ["body"], ExtraSpec::Body),
    op!("PutSettingsWithBody", Put, "/settings", ["contentType", "body"], ExtraSpec::RawBody),
    // Shared wallets
    op!("PostSharedWallet", Post, "/shared-wallets", ["body"], ExtraSpec::Body),
    op!("PostSharedWalletWithBody", Post, "/shared-wallets", ["contentType", "body"], ExtraSpec::RawBody),
    op!("DeleteSharedWallet", Delete, "/shared-wallets/{walletId}", ["walletId"], ExtraSpec::None),
    op!("GetSharedWallet", Get, "/shared-wallets/{walletId}", ["walletId"], ExtraSpec::None),
    op!("PatchSharedWalletInDelegation", Patch, "/shared-wallets/{walletId}/delegation-script-template", ["walletId", "body"], ExtraSpec::Body),
    op!("PatchSharedWalletInDelegationWithBody", Patch, "/shared-wallets/{walletId}/delegation-script-template", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("PatchSharedWalletInPayment", Patch, "/shared-wallets/{walletId}/payment-script-template", ["walletId", "body"], ExtraSpec::Body),
    op!("PatchSharedWalletInPaymentWithBody", Patch, "/shared-wallets/{walletId}/payment-script-template", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    // SMASH
    op!("GetCurrentSmashHealth", Get, "/smash/health", ["params"], ExtraSpec::Params(SMASH_HEALTH_PARAMS)),
    // Stake pools
    op!("ListStakePools", Get, "/stake-pools", ["params"], ExtraSpec::Params(STAKE_POOL_PARAMS)),
    op!("QuitStakePool", Delete, "/stake-pools/*/wallets/{walletId}", ["walletId", "body"], ExtraSpec::Body),
    op!("QuitStakePoolWithBody", Delete, "/stake-pools/*/wallets/{walletId}", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("GetMaintenanceActions", Get, "/stake-pools/maintenance-actions", [], ExtraSpec::None),
    op!("PostMaintenanceAction", Post, "/stake-pools/maintenance-actions", ["body"], ExtraSpec::Body),
    op!("PostMaintenanceActionWithBody", Post, "/stake-pools/maintenance-actions", ["contentType", "body"], ExtraSpec::RawBody),
    op!("JoinStakePool", Put, "/stake-pools/{stakePoolId}/wallets/{walletId}", ["stakePoolId", "walletId", "body"], ExtraSpec::Body),
    op!("JoinStakePoolWithBody", Put, "/stake-pools/{stakePoolId}/wallets/{walletId}", ["stakePoolId", "walletId", "contentType", "body"], ExtraSpec::RawBody),
    // Shelley wallets
    op!("ListWallets", Get, "/wallets", [], ExtraSpec::None),
    op!("PostWallet", Post, "/wallets", ["body"], ExtraSpec::Body),
    op!("PostWalletWithBody", Post, "/wallets", ["contentType", "body"], ExtraSpec::RawBody),
    op!("DeleteWallet", Delete, "/wallets/{walletId}", ["walletId"], ExtraSpec::None),
    op!("GetWallet", Get, "/wallets/{walletId}", ["walletId"], ExtraSpec::None),
    op!("PutWallet", Put, "/wallets/{walletId}", ["walletId", "body"], ExtraSpec::Body),
    op!("PutWalletWithBody", Put, "/wallets/{walletId}", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("ListAddresses", Get, "/wallets/{walletId}/addresses", ["walletId", "params"], ExtraSpec::Params(ADDRESS_FILTER_PARAMS)),
    op!("ListAssets", Get, "/wallets/{walletId}/assets", ["walletId"], ExtraSpec::None),
    op!("GetAssetDefault", Get, "/wallets/{walletId}/assets/{policyId}", ["walletId", "policyId"], ExtraSpec::None),
    op!("GetAsset", Get, "/wallets/{walletId}/assets/{policyId}/{assetName}", ["walletId", "policyId", "assetName"], ExtraSpec::None),
    op!("SelectCoins", Post, "/wallets/{walletId}/coin-selections/random", ["walletId", "body"], ExtraSpec::Body),
    op!("SelectCoinsWithBody", Post, "/wallets/{walletId}/coin-selections/random", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("GetDelegationFee", Get, "/wallets/{walletId}/delegation-fees", ["walletId"], ExtraSpec::None),
    op!("PostAccountKey", Post, "/wallets/{walletId}/keys/{index}", ["walletId", "index", "body"], ExtraSpec::Body),
    op!("PostAccountKeyWithBody", Post, "/wallets/{walletId}/keys/{index}", ["walletId", "index", "contentType", "body"], ExtraSpec::RawBody),
    op!("GetWalletKey", Get, "/wallets/{walletId}/keys/{role}/{index}", ["walletId", "role", "index"], ExtraSpec::None),
    op!("GetShelleyWalletMigrationInfo", Get, "/wallets/{walletId}/migrations", ["walletId"], ExtraSpec::None),
    op!("MigrateShelleyWallet", Post, "/wallets/{walletId}/migrations", ["walletId", "body"], ExtraSpec::Body),
    op!("MigrateShelleyWalletWithBody", Post, "/wallets/{walletId}/migrations", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("PutWalletPassphrase", Put, "/wallets/{walletId}/passphrase", ["walletId", "body"], ExtraSpec::Body),
    op!("PutWalletPassphraseWithBody", Put, "/wallets/{walletId}/passphrase", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("PostTransactionFee", Post, "/wallets/{walletId}/payment-fees", ["walletId", "body"], ExtraSpec::Body),
    op!("PostTransactionFeeWithBody", Post, "/wallets/{walletId}/payment-fees", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("SignMetadata", Post, "/wallets/{walletId}/signatures/{role}/{index}", ["walletId", "role", "index", "body"], ExtraSpec::Body),
    op!("SignMetadataWithBody", Post, "/wallets/{walletId}/signatures/{role}/{index}", ["walletId", "role", "index", "contentType", "body"], ExtraSpec::RawBody),
    op!("GetUTxOsStatistics", Get, "/wallets/{walletId}/statistics/utxos", ["walletId"], ExtraSpec::None),
    op!("ListTransactions", Get, "/wallets/{walletId}/transactions", ["walletId", "params"], ExtraSpec::Params(TRANSACTION_FILTER_PARAMS)),
    op!("PostTransaction", Post, "/wallets/{walletId}/transactions", ["walletId", "body"], ExtraSpec::Body),
    op!("PostTransactionWithBody", Post, "/wallets/{walletId}/transactions", ["walletId", "contentType", "body"], ExtraSpec::RawBody),
    op!("DeleteTransaction", Delete, "/wallets/{walletId}/transactions/{transactionId}", ["walletId", "transactionId"], ExtraSpec::None),
    op!("GetTransaction", Get, "/wallets/{walletId}/transactions/{transactionId}", ["walletId", "transactionId"], ExtraSpec::None),
];

/// Look up an operation by its raw name.
pub fn find_operation(name: &str) -> Option<&'static OperationSpec> {
    OPERATIONS.iter().find(|op| op.name == name)
}
