//! Tests for command discovery over the operation manifest.

use adawallet::api::ops::{ExtraSpec, HttpMethod, OperationSpec, OPERATIONS};
use adawallet::registry::{NamingTables, Registry};

mod manifest_discovery {
    use super::*;

    #[test]
    fn test_discovery_is_deterministic() {
        let first = Registry::discover(OPERATIONS);
        let second = Registry::discover(OPERATIONS);

        let signature = |registry: &Registry| {
            registry
                .methods()
                .iter()
                .map(|m| (m.name.clone(), m.verb.clone(), m.object.clone(), m.byron))
                .collect::<Vec<_>>()
        };
        assert_eq!(signature(&first), signature(&second));
        assert!(!first.methods().is_empty());
    }

    #[test]
    fn test_raw_body_variants_are_not_exposed() {
        let registry = Registry::discover(OPERATIONS);
        assert!(registry.find("PostWalletWithBody").is_none());
        assert!(registry.find("PostExternalTransactionWithBody").is_none());
        assert!(registry
            .methods()
            .iter()
            .all(|m| !matches!(m.spec.extra, ExtraSpec::RawBody)));
    }

    #[test]
    fn test_byron_siblings_merge_into_primary_commands() {
        let registry = Registry::discover(OPERATIONS);

        let get_wallet = registry.find("GetWallet").unwrap();
        assert_eq!(get_wallet.verb, "get");
        assert_eq!(get_wallet.object, "Wallet");
        assert_eq!(get_wallet.byron_variant.map(|op| op.name), Some("GetByronWallet"));

        // Merged variants disappear as standalone commands, so nothing
        // Byron-flavored is left over.
        assert!(registry.find("GetByronWallet").is_none());
        assert!(registry.methods().iter().all(|m| !m.byron));
    }

    #[test]
    fn test_byron_prefix_sibling_is_found() {
        let registry = Registry::discover(OPERATIONS);
        let select_coins = registry.find("SelectCoins").unwrap();
        assert_eq!(
            select_coins.byron_variant.map(|op| op.name),
            Some("ByronSelectCoins")
        );
        assert!(registry.find("ByronSelectCoins").is_none());
    }

    #[test]
    fn test_shelley_names_are_remapped_and_pair_up() {
        let registry = Registry::discover(OPERATIONS);

        assert!(registry.find("GetShelleyWalletMigrationInfo").is_none());
        let migration_info = registry.find("GetWalletMigrationInfo").unwrap();
        assert_eq!(migration_info.object, "WalletMigrationInfo");
        assert_eq!(
            migration_info.byron_variant.map(|op| op.name),
            Some("GetByronWalletMigrationInfo")
        );

        let migrate = registry.find("MigrateWallet").unwrap();
        assert_eq!(migrate.verb, "migrate");
        assert_eq!(migrate.object, "Wallet");
        assert_eq!(migrate.byron_variant.map(|op| op.name), Some("MigrateByronWallet"));
    }

    #[test]
    fn test_plural_objects_collapse() {
        let registry = Registry::discover(OPERATIONS);
        assert_eq!(registry.find("ListWallets").unwrap().object, "Wallet");
        assert_eq!(registry.find("ListStakePools").unwrap().object, "StakePool");
        assert_eq!(registry.find("ListAddresses").unwrap().object, "Address");
    }

    #[test]
    fn test_unnormalized_objects_are_left_alone() {
        let registry = Registry::discover(OPERATIONS);
        assert_eq!(registry.find("GetUTxOsStatistics").unwrap().object, "UTxOsStatistics");
        assert_eq!(
            registry.find("GetMaintenanceActions").unwrap().object,
            "MaintenanceActions"
        );
    }

    #[test]
    fn test_command_collisions_keep_first_manifest_entry() {
        let registry = Registry::discover(OPERATIONS);
        // ImportAddresses and ImportAddress both collapse onto
        // "import Address"; the earlier manifest entry wins.
        assert!(registry.find("ImportAddresses").is_some());
        assert!(registry.find("ImportAddress").is_none());
    }

    #[test]
    fn test_wallet_group_collects_all_verbs() {
        let registry = Registry::discover(OPERATIONS);
        let groups = registry.groups();
        let wallet = groups
            .iter()
            .find(|g| g.object == "Wallet" && !g.byron)
            .unwrap();
        assert_eq!(wallet.verbs(), vec!["delete", "get", "list", "migrate", "post", "put"]);
    }

    #[test]
    fn test_single_verb_groups_exist() {
        let registry = Registry::discover(OPERATIONS);
        let groups = registry.groups();
        let network_info = groups.iter().find(|g| g.object == "NetworkInformation").unwrap();
        assert_eq!(network_info.methods.len(), 1);
        assert_eq!(network_info.methods[0].verb, "get");
    }
}

mod fixture_discovery {
    use super::*;

    static FIXTURES: &[OperationSpec] = &[
        OperationSpec {
            name: "GetByronThing",
            http: HttpMethod::Get,
            path: "/things/{thingId}",
            args: &["thingId"],
            extra: ExtraSpec::None,
        },
        OperationSpec {
            name: "ListThings",
            http: HttpMethod::Get,
            path: "/things",
            args: &[],
            extra: ExtraSpec::None,
        },
        OperationSpec {
            // Route placeholder does not line up with the declared argument.
            name: "GetBrokenThing",
            http: HttpMethod::Get,
            path: "/broken/{thingId}",
            args: &["otherId"],
            extra: ExtraSpec::None,
        },
        OperationSpec {
            // No leading capitalized verb run.
            name: "oddlyNamed",
            http: HttpMethod::Get,
            path: "/odd",
            args: &[],
            extra: ExtraSpec::None,
        },
    ];

    #[test]
    fn test_byron_token_is_detected_and_stripped() {
        let registry = Registry::discover(FIXTURES);
        let method = registry.find("GetByronThing").unwrap();
        assert_eq!(method.verb, "get");
        assert_eq!(method.object, "Thing");
        assert!(method.byron);
    }

    #[test]
    fn test_unmerged_byron_methods_group_separately() {
        let registry = Registry::discover(FIXTURES);
        let groups = registry.groups();
        let byron_thing = groups.iter().find(|g| g.object == "Thing" && g.byron).unwrap();
        assert_eq!(byron_thing.methods.len(), 1);
    }

    #[test]
    fn test_malformed_operations_are_silently_excluded() {
        let registry = Registry::discover(FIXTURES);
        assert!(registry.find("GetBrokenThing").is_none());
        assert!(registry.find("oddlyNamed").is_none());
        // The healthy operations still made it.
        assert!(registry.find("ListThings").is_some());
    }

    static REMAP_FIXTURES: &[OperationSpec] = &[OperationSpec {
        name: "GetByronLegacyInfo",
        http: HttpMethod::Get,
        path: "/legacy-info",
        args: &[],
        extra: ExtraSpec::None,
    }];

    static REMAP_TABLE: &[(&str, &str)] = &[("GetByronLegacyInfo", "GetLegacyInfo")];

    #[test]
    fn test_remapping_runs_before_byron_detection() {
        // The remap table rewrites the name before the era check, so a
        // mapping that removes the Byron token yields a plain command.
        let tables = NamingTables {
            method_remappings: REMAP_TABLE,
            ..NamingTables::default()
        };
        let registry = Registry::discover_with(REMAP_FIXTURES, tables);

        let method = registry.find("GetLegacyInfo").unwrap();
        assert_eq!(method.object, "LegacyInfo");
        assert!(!method.byron);
    }
}
