//! Internal-consistency checks for the operation manifest.
//!
//! The manifest is maintained by hand against the upstream API, so these
//! tests are what keeps it honest after an update: routes, argument lists
//! and extra-argument classifications all have to line up, and raw-body
//! variants must mirror their typed siblings.

use std::collections::HashSet;

use adawallet::api::ops::{ExtraSpec, FlagKind, OPERATIONS};

#[test]
fn test_operation_names_are_unique() {
    let mut seen = HashSet::new();
    for op in OPERATIONS {
        assert!(seen.insert(op.name), "duplicate operation name {}", op.name);
    }
}

#[test]
fn test_routes_are_absolute() {
    for op in OPERATIONS {
        assert!(op.path.starts_with('/'), "route of {} must start with '/'", op.name);
    }
}

#[test]
fn test_route_placeholders_match_declared_arguments() {
    for op in OPERATIONS {
        let placeholders = op.path_placeholders();
        let args = op.string_args();
        assert_eq!(
            placeholders.len(),
            args.len(),
            "operation {}: placeholder/argument count mismatch",
            op.name
        );
        for (placeholder, arg) in placeholders.iter().zip(args) {
            assert_eq!(placeholder, arg, "operation {}: placeholder order mismatch", op.name);
        }
    }
}

#[test]
fn test_extra_classification_matches_argument_tail() {
    for op in OPERATIONS {
        match op.extra {
            ExtraSpec::None => {
                assert!(
                    !op.args.iter().any(|a| *a == "params" || *a == "body"),
                    "operation {}: extra argument declared but classified as None",
                    op.name
                );
            }
            ExtraSpec::Params(flags) => {
                assert_eq!(op.args.last(), Some(&"params"), "operation {}", op.name);
                assert!(!flags.is_empty(), "operation {}: empty params struct", op.name);
            }
            ExtraSpec::Body => {
                assert_eq!(op.args.last(), Some(&"body"), "operation {}", op.name);
            }
            ExtraSpec::RawBody => {
                let tail: Vec<_> = op.args.iter().rev().take(2).rev().collect();
                assert_eq!(tail, vec![&"contentType", &"body"], "operation {}", op.name);
            }
        }
    }
}

#[test]
fn test_raw_body_variants_mirror_their_typed_sibling() {
    for op in OPERATIONS.iter().filter(|op| matches!(op.extra, ExtraSpec::RawBody)) {
        assert!(
            op.name.ends_with("WithBody"),
            "raw-body operation {} must carry the WithBody suffix",
            op.name
        );

        let typed_name = op.name.trim_end_matches("WithBody");
        match OPERATIONS.iter().find(|other| other.name == typed_name) {
            Some(typed) => {
                assert_eq!(typed.path, op.path, "route mismatch for {}", op.name);
                assert_eq!(typed.http, op.http, "method mismatch for {}", op.name);
                assert_eq!(
                    typed.string_args(),
                    op.string_args(),
                    "argument mismatch for {}",
                    op.name
                );
                assert!(
                    matches!(typed.extra, ExtraSpec::Body),
                    "typed sibling of {} must take a body",
                    op.name
                );
            }
            // The proxy endpoint only exists in raw form upstream.
            None => assert_eq!(op.name, "PostExternalTransactionWithBody"),
        }
    }
}

#[test]
fn test_every_body_operation_has_a_raw_variant() {
    for op in OPERATIONS.iter().filter(|op| matches!(op.extra, ExtraSpec::Body)) {
        let raw_name = format!("{}WithBody", op.name);
        assert!(
            OPERATIONS.iter().any(|other| other.name == raw_name),
            "body operation {} is missing its raw variant",
            op.name
        );
    }
}

#[test]
fn test_flag_specs_are_well_formed() {
    for op in OPERATIONS {
        if let ExtraSpec::Params(flags) = op.extra {
            for flag in flags {
                let name = flag.flag_name();
                assert!(!name.is_empty());
                assert_eq!(name, name.to_lowercase());
                assert!(!name.contains(char::is_whitespace));
                // Only the three projectable kinds exist; this match is the
                // compile-time guard that new kinds get CLI support.
                match flag.kind {
                    FlagKind::Bool | FlagKind::Int | FlagKind::Text => {}
                }
            }
        }
    }
}
