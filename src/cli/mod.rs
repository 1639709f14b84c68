//! Command-line interface built at runtime from the command registry.
//!
//! The command tree is data-driven: objects become (sub)commands, verbs
//! become nested subcommands where an object has more than one, positional
//! arguments come from the operation's string parameters, params structs
//! project onto `--flag=value` options and body operations take
//! `--body`/`--body-file`. Because the tree only exists at runtime, this
//! module uses clap's builder API rather than the derive macros.

pub mod output;

use std::collections::HashMap;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::Value;

use crate::api::ops::{ExtraSpec, FlagKind, FlagSpec, OPERATIONS};
use crate::api::{ApiError, ApiResult, Call, TlsOptions, WalletClient};
use crate::network;
use crate::registry::{MethodDescriptor, Registry};

/// Run the CLI and return the process exit code.
pub async fn run() -> i32 {
    init_logging();

    let cli = WalletCli::new();
    match cli.dispatch().await {
        Ok(()) => 0,
        Err(ApiError::DryRun) => 0,
        Err(e) => {
            tracing::error!("{e}");
            1
        }
    }
}

/// Install the tracing subscriber.
///
/// The log-level flags are pre-scanned from argv because command discovery
/// logs before clap ever parses; `ADAWALLET_VERBOSE` covers non-interactive
/// use the same way.
fn init_logging() {
    let args: Vec<String> = std::env::args().collect();
    let has = |short: &str, long: &str| args.iter().any(|a| a == short || a == long);

    let level = if has("-v", "--verbose") || std::env::var_os(network::ENV_VERBOSE).is_some() {
        "debug"
    } else if has("-Q", "--quieter") {
        "error"
    } else if has("-q", "--quiet") {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// The assembled CLI: registry plus the path→descriptor index built while
/// constructing the clap command tree.
pub struct WalletCli {
    registry: Registry,
}

impl WalletCli {
    pub fn new() -> Self {
        WalletCli {
            registry: Registry::discover(OPERATIONS),
        }
    }

    /// Parse argv, resolve the target operation and invoke it.
    async fn dispatch(&self) -> ApiResult<()> {
        let (command, index) = self.build_command();
        let matches = command.get_matches();

        let mut path: Vec<String> = Vec::new();
        let mut leaf = &matches;
        while let Some((name, sub)) = leaf.subcommand() {
            path.push(name.to_string());
            leaf = sub;
        }

        let descriptor_name = index.get(&path).ok_or_else(|| {
            // Unreachable with subcommand_required, kept as a guard.
            ApiError::InvalidParameter(format!("unknown command path: {}", path.join(" ")))
        })?;
        let descriptor = self
            .registry
            .find(descriptor_name)
            .expect("index entries point at registry descriptors");

        self.invoke(descriptor, &matches, leaf).await
    }

    /// Invoke one resolved command: build the call, run it, print the body.
    async fn invoke(
        &self,
        descriptor: &MethodDescriptor,
        globals: &ArgMatches,
        leaf: &ArgMatches,
    ) -> ApiResult<()> {
        let byron = leaf.get_flag("byron");
        let op = descriptor.operation(byron).ok_or_else(|| {
            ApiError::InvalidParameter(format!(
                "operation {} has no Byron-era variant",
                descriptor.name
            ))
        })?;

        let path_args: Vec<String> = descriptor
            .string_args()
            .iter()
            .map(|arg| {
                leaf.get_one::<String>(arg)
                    .cloned()
                    .expect("positional arguments are required")
            })
            .collect();

        let mut call = Call::new(op).path_args(&path_args);
        match descriptor.spec.extra {
            ExtraSpec::Params(flags) => {
                call = call.query(collect_query(leaf, flags));
            }
            ExtraSpec::Body => {
                call = call.body(load_body(leaf)?);
            }
            ExtraSpec::None | ExtraSpec::RawBody => {}
        }

        let client = self.connect(globals)?;
        tracing::debug!(
            "calling {} with arguments {:?}",
            descriptor.name,
            path_args
        );

        let body = tokio::select! {
            result = client.execute_json(call) => result?,
            _ = tokio::signal::ctrl_c() => {
                return Err(ApiError::InvalidParameter("interrupted".to_string()));
            }
        };

        output::print_body(&body, globals.get_flag("yaml"));
        Ok(())
    }

    /// Build the wallet client from global flags and the environment.
    fn connect(&self, globals: &ArgMatches) -> ApiResult<WalletClient> {
        let server = globals
            .get_one::<String>("server")
            .cloned()
            .or_else(|| std::env::var(network::ENV_SERVER_ADDRESS).ok())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| network::DEFAULT_SERVER_URL.to_string());

        WalletClient::builder(server)
            .tls(TlsOptions::from_env()?)
            .dry_run(globals.get_flag("dry-run"))
            .build()
    }

    // =========================================================================
    // Command-tree construction
    // =========================================================================

    /// Build the clap command tree plus the path→descriptor index.
    fn build_command(&self) -> (Command, HashMap<Vec<String>, String>) {
        let mut root = Command::new("adawallet")
            .about("CLI for the cardano-wallet REST API")
            .long_about(
                "adawallet connects to the REST API of a cardano-wallet process and \
                 translates CLI commands and parameters to the appropriate REST calls",
            )
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                Arg::new("server")
                    .short('s')
                    .long("server")
                    .value_name("url")
                    .global(true)
                    .help("Endpoint of the cardano-wallet process to connect to"),
            )
            .arg(
                Arg::new("dry-run")
                    .short('n')
                    .long("dry-run")
                    .action(ArgAction::SetTrue)
                    .global(true)
                    .help("Show the resulting request instead of executing it"),
            )
            .arg(
                Arg::new("yaml")
                    .short('y')
                    .long("yaml")
                    .action(ArgAction::SetTrue)
                    .global(true)
                    .help("Output responses as YAML instead of JSON (more compact)"),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .action(ArgAction::SetTrue)
                    .global(true)
                    .help("Set the log level to Debug"),
            )
            .arg(
                Arg::new("quiet")
                    .short('q')
                    .long("quiet")
                    .action(ArgAction::SetTrue)
                    .global(true)
                    .help("Set the log level to Warning"),
            )
            .arg(
                Arg::new("quieter")
                    .short('Q')
                    .long("quieter")
                    .action(ArgAction::SetTrue)
                    .global(true)
                    .help("Set the log level to Error"),
            );

        let mut index: HashMap<Vec<String>, String> = HashMap::new();
        let mut byron_root: Option<Command> = None;

        for group in self.registry.groups() {
            let object_cmd_name = group.object.to_lowercase();
            let prefix: Vec<String> = if group.byron {
                vec!["byron".to_string(), object_cmd_name.clone()]
            } else {
                vec![object_cmd_name.clone()]
            };

            let mut object_cmd = Command::new(object_cmd_name.clone())
                .about(format!("{} {} objects", join_verbs(&group.verbs()), group.object));
            if object_cmd_name != group.object {
                object_cmd = object_cmd.alias(group.object.clone());
            }

            if let [method] = group.methods.as_slice() {
                // Single verb: no sub-command level.
                object_cmd = configure_method_command(object_cmd, method);
                index.insert(prefix.clone(), method.name.clone());
            } else {
                object_cmd = object_cmd.subcommand_required(true);
                for method in &group.methods {
                    let verb_cmd = configure_method_command(
                        Command::new(method.verb.clone())
                            .about(format!("{} {} objects", method.verb, group.object)),
                        method,
                    );
                    let mut verb_path = prefix.clone();
                    verb_path.push(method.verb.clone());
                    index.insert(verb_path, method.name.clone());
                    object_cmd = object_cmd.subcommand(verb_cmd);
                }
            }

            if group.byron {
                byron_root = Some(
                    byron_root
                        .unwrap_or_else(|| {
                            Command::new("byron")
                                .about("Commands for Byron-era objects")
                                .alias("Byron")
                                .subcommand_required(true)
                        })
                        .subcommand(object_cmd),
                );
            } else {
                root = root.subcommand(object_cmd);
            }
        }

        if let Some(byron_cmd) = byron_root {
            root = root.subcommand(byron_cmd);
        }

        (root, index)
    }
}

impl Default for WalletCli {
    fn default() -> Self {
        Self::new()
    }
}

/// Attach positional arguments, params flags, body flags and the `--byron`
/// switch to a leaf command.
fn configure_method_command(mut cmd: Command, method: &MethodDescriptor) -> Command {
    for (i, arg) in method.string_args().iter().enumerate() {
        cmd = cmd.arg(
            Arg::new(*arg)
                .value_name(*arg)
                .index(i + 1)
                .required(true),
        );
    }

    match method.spec.extra {
        ExtraSpec::Params(flags) => {
            for flag in flags {
                cmd = cmd.arg(params_flag(flag));
            }
        }
        ExtraSpec::Body => {
            cmd = cmd
                .arg(
                    Arg::new("body")
                        .short('b')
                        .long("body")
                        .value_name("json")
                        .help("JSON-encoded content to send as request body"),
                )
                .arg(
                    Arg::new("body-file")
                        .short('B')
                        .long("body-file")
                        .value_name("path")
                        .conflicts_with("body")
                        .help("JSON file to send as request body"),
                );
        }
        ExtraSpec::None | ExtraSpec::RawBody => {}
    }

    let mut byron_arg = Arg::new("byron")
        .long("byron")
        .action(ArgAction::SetTrue)
        .help("Call the Byron-era variant of this operation");
    if method.byron_variant.is_none() {
        byron_arg = byron_arg.hide(true);
    }
    cmd.arg(byron_arg)
}

/// Project one params-struct field onto a clap flag.
///
/// Nullable fields stay absent unless the operator sets them; the API
/// distinguishes an omitted parameter from an explicit zero value, so
/// presence is tracked through `ArgMatches` rather than defaults.
fn params_flag(flag: &FlagSpec) -> Arg {
    let mut arg = Arg::new(flag.field)
        .long(flag.flag_name())
        .value_name(kind_name(flag.kind))
        .help(format!("{} parameter", flag.field));

    arg = match flag.kind {
        FlagKind::Bool => arg.value_parser(clap::value_parser!(bool)),
        FlagKind::Int => arg.value_parser(clap::value_parser!(i64)),
        FlagKind::Text => arg.value_parser(clap::value_parser!(String)),
    };

    if !flag.nullable {
        arg = match flag.kind {
            FlagKind::Bool => arg.default_value("false"),
            FlagKind::Int => arg.default_value("0"),
            FlagKind::Text => arg.default_value(""),
        };
    }

    arg
}

fn kind_name(kind: FlagKind) -> &'static str {
    match kind {
        FlagKind::Bool => "bool",
        FlagKind::Int => "int",
        FlagKind::Text => "string",
    }
}

/// Collect set flags into wire query parameters.
fn collect_query(matches: &ArgMatches, flags: &'static [FlagSpec]) -> Vec<(String, String)> {
    let mut query = Vec::new();
    for flag in flags {
        let explicit = matches.value_source(flag.field) == Some(ValueSource::CommandLine);
        if flag.nullable && !explicit {
            continue;
        }
        let rendered = match flag.kind {
            FlagKind::Bool => matches.get_one::<bool>(flag.field).map(ToString::to_string),
            FlagKind::Int => matches.get_one::<i64>(flag.field).map(ToString::to_string),
            FlagKind::Text => matches.get_one::<String>(flag.field).cloned(),
        };
        if let Some(value) = rendered {
            query.push((flag.field.to_string(), value));
        }
    }
    query
}

/// Load the request body from `--body` or `--body-file`.
///
/// With neither flag set an empty JSON object is sent, matching what the
/// API expects from parameterless body operations.
fn load_body(matches: &ArgMatches) -> ApiResult<Value> {
    let raw = if let Some(inline) = matches.get_one::<String>("body") {
        inline.clone()
    } else if let Some(file) = matches.get_one::<String>("body-file") {
        std::fs::read_to_string(file)
            .map_err(|e| ApiError::InvalidParameter(format!("failed to read body file '{file}': {e}")))?
    } else {
        return Ok(Value::Object(serde_json::Map::new()));
    };

    serde_json::from_str(&raw)
        .map_err(|e| ApiError::InvalidParameter(format!("failed to parse body as JSON: {e}")))
}

/// Human-readable verb enumeration for group help text.
fn join_verbs(verbs: &[&str]) -> String {
    match verbs {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_verbs() {
        assert_eq!(join_verbs(&["get"]), "get");
        assert_eq!(join_verbs(&["get", "list"]), "get or list");
        assert_eq!(join_verbs(&["delete", "get", "list"]), "delete, get, or list");
    }

    #[test]
    fn test_command_tree_builds() {
        let cli = WalletCli::new();
        let (command, index) = cli.build_command();
        command.clone().debug_assert();

        // Multi-verb object: verbs are nested commands.
        assert!(index.contains_key(&vec!["wallet".to_string(), "get".to_string()]));
        // Single-verb object: collapsed onto the object command.
        assert!(index.contains_key(&vec!["networkinformation".to_string()]));
        // Byron variants are merged, not standalone commands.
        assert!(!index
            .keys()
            .any(|path| path.first().map(String::as_str) == Some("byron")));
    }
}
