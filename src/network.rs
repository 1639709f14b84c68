//! Default endpoint and environment-variable names.

/// Default base URL of a locally running cardano-wallet daemon.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8090/v2";

/// Default server address, overridable by `--server`.
pub const ENV_SERVER_ADDRESS: &str = "ADAWALLET_SERVER_ADDRESS";

/// Disable server certificate verification (bool).
pub const ENV_TLS_SKIP_VERIFY: &str = "ADAWALLET_TLS_SKIP_VERIFY";

/// PEM file with the CA that signed the server certificate.
pub const ENV_SERVER_CA: &str = "ADAWALLET_SERVER_CA";

/// PEM file with the client certificate. Must be set together with
/// [`ENV_CLIENT_KEY`].
pub const ENV_CLIENT_CERT: &str = "ADAWALLET_CLIENT_CERT";

/// PEM file with the client private key.
pub const ENV_CLIENT_KEY: &str = "ADAWALLET_CLIENT_KEY";

/// When set, enables debug logging before command-line flags are parsed,
/// so that command discovery is visible too.
pub const ENV_VERBOSE: &str = "ADAWALLET_VERBOSE";
