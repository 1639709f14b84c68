//! Wallet REST API client implementation.
//!
//! The [`WalletClient`] executes operations from the static manifest in
//! [`crate::api::ops`] against a cardano-wallet daemon: route placeholders
//! are filled from positional arguments, params-struct fields become query
//! parameters, and body operations attach a JSON payload.
//!
//! # Example
//!
//! ```rust,ignore
//! use adawallet::api::{Call, WalletClient};
//! use adawallet::api::ops::find_operation;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WalletClient::new("http://localhost:8090/v2")?;
//!
//!     let op = find_operation("GetWallet").unwrap();
//!     let wallet = client
//!         .execute_json(Call::new(op).path_args(&["2512a00e9653fe49a44a5886202e24d77eeb998f".into()]))
//!         .await?;
//!     println!("{wallet:#}");
//!
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{Certificate, Client, Identity, StatusCode};
use serde_json::Value;

use crate::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::api::ops::OperationSpec;
use crate::network;

/// Default request timeout in seconds. Deliberately generous: some wallet
/// operations (migrations, stake-pool listing) take a long while server-side.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// TLS material for talking to a wallet daemon behind HTTPS.
///
/// Resolved once per process, normally from the `ADAWALLET_*` environment
/// variables, and reused across the connection pool.
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    /// Disable server certificate verification.
    pub skip_verify: bool,
    /// PEM file with the CA that signed the server certificate.
    pub server_ca: Option<PathBuf>,
    /// PEM file with the client certificate.
    pub client_cert: Option<PathBuf>,
    /// PEM file with the client private key.
    pub client_key: Option<PathBuf>,
}

impl TlsOptions {
    /// Read TLS options from the environment.
    ///
    /// `ADAWALLET_TLS_SKIP_VERIFY` must parse as a boolean when set; the
    /// client certificate and key variables must be set together or not at
    /// all.
    pub fn from_env() -> ApiResult<TlsOptions> {
        let mut options = TlsOptions::default();

        if let Some(raw) = non_empty_env(network::ENV_TLS_SKIP_VERIFY) {
            options.skip_verify = raw.parse().map_err(|_| {
                ApiError::Config(format!(
                    "failed to parse {}={} as bool",
                    network::ENV_TLS_SKIP_VERIFY,
                    raw
                ))
            })?;
        }

        options.server_ca = non_empty_env(network::ENV_SERVER_CA).map(PathBuf::from);
        options.client_cert = non_empty_env(network::ENV_CLIENT_CERT).map(PathBuf::from);
        options.client_key = non_empty_env(network::ENV_CLIENT_KEY).map(PathBuf::from);

        if options.client_cert.is_some() != options.client_key.is_some() {
            return Err(ApiError::Config(format!(
                "either none or both of {} and {} must be set",
                network::ENV_CLIENT_CERT,
                network::ENV_CLIENT_KEY
            )));
        }

        Ok(options)
    }

    fn apply(self, mut builder: reqwest::ClientBuilder) -> ApiResult<reqwest::ClientBuilder> {
        if self.skip_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_file) = &self.server_ca {
            let pem = read_pem(ca_file, "server CA")?;
            let cert = Certificate::from_pem(&pem)
                .map_err(|e| ApiError::Config(format!("failed to load server CA file '{}': {e}", ca_file.display())))?;
            builder = builder.add_root_certificate(cert);
        }

        if let (Some(cert_file), Some(key_file)) = (&self.client_cert, &self.client_key) {
            // rustls wants certificate and key in one PEM bundle.
            let mut pem = read_pem(cert_file, "client certificate")?;
            pem.extend_from_slice(&read_pem(key_file, "client key")?);
            let identity = Identity::from_pem(&pem)
                .map_err(|e| ApiError::Config(format!("failed to load client certificate: {e}")))?;
            builder = builder.identity(identity);
        }

        Ok(builder)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_pem(path: &Path, what: &str) -> ApiResult<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| ApiError::Config(format!("failed to read {what} file '{}': {e}", path.display())))
}

/// Builder for configuring [`WalletClient`].
#[derive(Debug, Clone)]
pub struct WalletClientBuilder {
    base_url: String,
    timeout: Duration,
    tls: TlsOptions,
    dry_run: bool,
}

impl WalletClientBuilder {
    /// Create a new builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            tls: TlsOptions::default(),
            dry_run: false,
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the TLS options (see [`TlsOptions::from_env`]).
    pub fn tls(mut self, tls: TlsOptions) -> Self {
        self.tls = tls;
        self
    }

    /// Print requests instead of sending them; [`WalletClient::execute`]
    /// then reports [`ApiError::DryRun`].
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Build the client.
    pub fn build(self) -> ApiResult<WalletClient> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder()
            .timeout(self.timeout)
            .pool_max_idle_per_host(10)
            .default_headers(headers);
        builder = self.tls.apply(builder)?;

        Ok(WalletClient {
            http_client: builder.build()?,
            base_url: self.base_url,
            dry_run: self.dry_run,
        })
    }
}

/// One resolved invocation of a manifest operation.
#[derive(Debug, Clone)]
pub struct Call<'a> {
    pub op: &'a OperationSpec,
    /// Values for the route placeholders, in declared order.
    pub path_args: Vec<String>,
    /// Query parameters (wire name, rendered value).
    pub query: Vec<(String, String)>,
    /// JSON body for body operations.
    pub body: Option<Value>,
}

impl<'a> Call<'a> {
    pub fn new(op: &'a OperationSpec) -> Self {
        Call {
            op,
            path_args: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn path_args(mut self, args: &[String]) -> Self {
        self.path_args = args.to_vec();
        self
    }

    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Cardano wallet REST API client.
///
/// Executes operations from the static manifest; the heavy lifting
/// (routing, argument names, extra-argument classification) lives in the
/// manifest itself.
#[derive(Debug, Clone)]
pub struct WalletClient {
    http_client: Client,
    base_url: String,
    dry_run: bool,
}

impl WalletClient {
    /// Create a new client with the given base URL and default settings.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        WalletClientBuilder::new(base_url).build()
    }

    /// Create a new client builder for custom configuration.
    pub fn builder(base_url: impl Into<String>) -> WalletClientBuilder {
        WalletClientBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // Request construction
    // =========================================================================

    /// Render the full request URL for a call, filling `{placeholder}`
    /// segments from the positional arguments in order.
    fn build_url(&self, call: &Call<'_>) -> ApiResult<String> {
        let placeholders = call.op.path_placeholders();
        if placeholders.len() != call.path_args.len() {
            return Err(ApiError::InvalidParameter(format!(
                "operation {} takes {} path arguments, got {}",
                call.op.name,
                placeholders.len(),
                call.path_args.len()
            )));
        }

        let mut path = call.op.path.to_string();
        for (name, value) in placeholders.iter().zip(&call.path_args) {
            path = path.replace(&format!("{{{name}}}"), &urlencoding::encode(value));
        }
        Ok(format!("{}{}", self.base_url, path))
    }

    /// Build the reqwest request for a call without sending it.
    pub fn build_request(&self, call: &Call<'_>) -> ApiResult<reqwest::Request> {
        let url = self.build_url(call)?;
        let mut builder = self.http_client.request(call.op.http.as_reqwest(), &url);
        if !call.query.is_empty() {
            builder = builder.query(&call.query);
        }
        if let Some(body) = &call.body {
            builder = builder.json(body);
        }
        Ok(builder.build()?)
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Execute a call and return the raw HTTP response.
    ///
    /// In dry-run mode the constructed request is logged instead of sent and
    /// the internal [`ApiError::DryRun`] sentinel is returned.
    pub async fn execute(&self, call: Call<'_>) -> ApiResult<reqwest::Response> {
        let request = self.build_request(&call)?;

        if self.dry_run {
            tracing::info!("dry-run mode, would have performed the following request:");
            tracing::info!("{} request to URL: {}", request.method(), request.url());
            if let Some(body) = call.body.as_ref() {
                tracing::info!(
                    "request body:\n{}",
                    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
                );
            }
            return Err(ApiError::DryRun);
        }

        tracing::debug!("{} {}", request.method(), request.url());
        Ok(self.http_client.execute(request).await?)
    }

    /// Execute a call, check the status code and decode the JSON body.
    ///
    /// Non-2xx responses are mapped onto the status-specific [`ApiError`]
    /// variants, with the wallet's `{"message", "code"}` payload attached
    /// when present.
    pub async fn execute_json(&self, call: Call<'_>) -> ApiResult<Value> {
        let response = self.execute(call).await?;
        let status = response.status();

        if status.is_success() {
            tracing::debug!("response status: {status}");
            return response
                .json::<Value>()
                .await
                .map_err(|e| ApiError::Deserialize(format!("failed to deserialize response: {e}")));
        }

        Err(Self::parse_error_response(response).await)
    }

    /// Parse an error response into an ApiError.
    async fn parse_error_response(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let error_text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("failed to read error response body: {e}");
                return Self::map_status_error(
                    status,
                    ErrorResponse::from_text(format!("HTTP {status} (body unreadable: {e})")),
                );
            }
        };

        let error_response = serde_json::from_str::<ErrorResponse>(&error_text)
            .unwrap_or_else(|_| ErrorResponse::from_text(error_text));

        Self::map_status_error(status, error_response)
    }

    /// Map HTTP status code to ApiError.
    fn map_status_error(status: StatusCode, response: ErrorResponse) -> ApiError {
        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(response),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(response),
            StatusCode::FORBIDDEN => ApiError::Forbidden(response),
            StatusCode::CONFLICT => ApiError::Conflict(response),
            _ if status.is_server_error() => ApiError::ServerError(response),
            _ => ApiError::UnexpectedStatus(status.as_u16(), response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ops::find_operation;

    fn block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(fut)
    }

    #[test]
    fn test_client_creation() {
        let client = WalletClient::new("http://localhost:8090/v2").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8090/v2");
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = WalletClient::builder("http://localhost:8090/v2/")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8090/v2");
    }

    #[test]
    fn test_build_url_fills_placeholders() {
        let client = WalletClient::new("http://localhost:8090/v2").unwrap();
        let op = find_operation("GetTransaction").unwrap();
        let url = client
            .build_url(&Call::new(op).path_args(&["w1".into(), "tx/2".into()]))
            .unwrap();
        assert_eq!(url, "http://localhost:8090/v2/wallets/w1/transactions/tx%2F2");
    }

    #[test]
    fn test_build_url_rejects_arity_mismatch() {
        let client = WalletClient::new("http://localhost:8090/v2").unwrap();
        let op = find_operation("GetWallet").unwrap();
        let err = client.build_url(&Call::new(op)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter(_)));
    }

    #[test]
    fn test_dry_run_returns_sentinel() {
        let client = WalletClient::builder("http://localhost:8090/v2")
            .dry_run(true)
            .build()
            .unwrap();
        let op = find_operation("ListWallets").unwrap();
        let err = block_on(client.execute(Call::new(op))).unwrap_err();
        assert!(matches!(err, ApiError::DryRun));
    }
}
