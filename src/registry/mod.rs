//! Command registry derived from the static operation manifest.
//!
//! Built once at process start and immutable afterwards: every manifest
//! operation is classified into a [`MethodDescriptor`] (verb, object,
//! positional arguments, extra-argument kind, era), Byron-era variants are
//! folded into their primary operation as a `--byron`-selectable
//! alternative, and the descriptors are grouped into the object/verb
//! command tree.
//!
//! Operations that do not fit the expected shape are not an error — they
//! are skipped with a debug log, so a manifest refresh cannot take the
//! whole tool down over one odd endpoint.

pub mod naming;

use std::collections::BTreeMap;

use crate::api::ops::{ExtraSpec, OperationSpec};

pub use naming::NamingTables;

/// One API operation as exposed on the command line.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    /// Manifest entry backing this command.
    pub spec: &'static OperationSpec,
    /// Canonical (post-remapping) operation name.
    pub name: String,
    /// Lowercased leading verb, e.g. `get`, `list`, `post`.
    pub verb: String,
    /// Pluralization-normalized object token, e.g. `Wallet`.
    pub object: String,
    /// Era classification: true when the object token carried the Byron
    /// marker.
    pub byron: bool,
    /// Byron-era sibling operation, selectable with `--byron`.
    pub byron_variant: Option<&'static OperationSpec>,
}

impl MethodDescriptor {
    /// Positional argument names of this command.
    pub fn string_args(&self) -> &'static [&'static str] {
        self.spec.string_args()
    }

    /// Resolve which manifest operation an invocation targets.
    ///
    /// `byron` selects the merged Byron-era variant; asking for it on a
    /// command without one is an invocation error.
    pub fn operation(&self, byron: bool) -> Option<&'static OperationSpec> {
        if byron {
            self.byron_variant
        } else {
            Some(self.spec)
        }
    }
}

/// One object command group: all verbs discovered for an object token.
#[derive(Debug)]
pub struct CommandGroup<'a> {
    pub object: String,
    /// Byron-era groups live under a separate `byron` namespace.
    pub byron: bool,
    /// Descriptors of this group, ordered by verb.
    pub methods: Vec<&'a MethodDescriptor>,
}

impl CommandGroup<'_> {
    /// Sorted verb list, used for group help text.
    pub fn verbs(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.verb.as_str()).collect()
    }
}

/// Immutable command taxonomy, built once at startup.
#[derive(Debug, Default)]
pub struct Registry {
    methods: Vec<MethodDescriptor>,
}

impl Registry {
    /// Discover commands from a manifest with the default naming tables.
    pub fn discover(ops: &'static [OperationSpec]) -> Registry {
        Self::discover_with(ops, NamingTables::default())
    }

    /// Discover commands from a manifest with explicit naming tables.
    ///
    /// Deterministic: the same manifest and tables always produce the same
    /// descriptors in the same order (manifest order, minus exclusions).
    pub fn discover_with(ops: &'static [OperationSpec], tables: NamingTables) -> Registry {
        let mut methods: Vec<MethodDescriptor> = Vec::new();

        for op in ops {
            // Raw-stream variants are not exposed; only the typed operation is.
            if matches!(op.extra, ExtraSpec::RawBody) {
                tracing::debug!("skipping raw-body operation {}", op.name);
                continue;
            }

            let name = tables.remap_method(op.name);
            let Some((verb, raw_object)) = naming::split_method_name(&name) else {
                tracing::debug!("skipping operation {}: name does not split into verb/object", name);
                continue;
            };

            let (object, byron) = naming::strip_byron(&raw_object);
            let object = tables.normalize_object(&object);

            if let Err(reason) = validate_shape(op) {
                tracing::debug!("skipping operation {}: {}", name, reason);
                continue;
            }

            if methods
                .iter()
                .any(|m| m.verb == verb && m.object == object && m.byron == byron)
            {
                tracing::debug!(
                    "skipping operation {}: command '{} {}' already taken",
                    name,
                    object,
                    verb
                );
                continue;
            }

            methods.push(MethodDescriptor {
                spec: op,
                name,
                verb,
                object,
                byron,
                byron_variant: None,
            });
        }

        merge_byron_variants(&mut methods);

        Registry { methods }
    }

    /// All exposed descriptors, in manifest order.
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    /// Look up a descriptor by canonical name.
    pub fn find(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Group descriptors by (era, object) for command-tree construction.
    ///
    /// Groups and the verbs inside them are sorted, so the resulting tree
    /// is stable across runs.
    pub fn groups(&self) -> Vec<CommandGroup<'_>> {
        let mut grouped: BTreeMap<(bool, String), Vec<&MethodDescriptor>> = BTreeMap::new();
        for method in &self.methods {
            grouped
                .entry((method.byron, method.object.clone()))
                .or_default()
                .push(method);
        }

        grouped
            .into_iter()
            .map(|((byron, object), mut methods)| {
                methods.sort_by(|a, b| a.verb.cmp(&b.verb));
                CommandGroup { object, byron, methods }
            })
            .collect()
    }
}

/// Check that an operation fits the invocable shape: the route placeholders
/// must line up, by count and by name, with the declared positional
/// arguments.
fn validate_shape(op: &OperationSpec) -> Result<(), String> {
    let placeholders = op.path_placeholders();
    let string_args = op.string_args();
    if placeholders.len() != string_args.len() {
        return Err(format!(
            "route has {} placeholders but {} positional arguments are declared",
            placeholders.len(),
            string_args.len()
        ));
    }
    for (placeholder, arg) in placeholders.iter().zip(string_args) {
        if placeholder != arg {
            return Err(format!(
                "route placeholder '{placeholder}' does not match declared argument '{arg}'"
            ));
        }
    }
    Ok(())
}

/// Fold Byron-era siblings into their primary commands.
///
/// For every non-Byron descriptor, the sibling obtained by re-inserting the
/// era token into the canonical name becomes the `--byron` variant and
/// disappears as a standalone command.
fn merge_byron_variants(methods: &mut Vec<MethodDescriptor>) {
    let mut removed: Vec<String> = Vec::new();

    for i in 0..methods.len() {
        if methods[i].byron {
            continue;
        }
        let sibling = naming::byron_sibling_candidates(&methods[i].name)
            .into_iter()
            .find_map(|candidate| {
                methods
                    .iter()
                    .position(|m| m.name == candidate)
                    .map(|j| (candidate, j))
            });
        if let Some((candidate, j)) = sibling {
            tracing::debug!(
                "merging {} into {} as its Byron-era variant",
                candidate,
                methods[i].name
            );
            let spec = methods[j].spec;
            methods[i].byron_variant = Some(spec);
            removed.push(candidate);
        }
    }

    methods.retain(|m| !removed.contains(&m.name));
}
