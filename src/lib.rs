//! # adawallet
//!
//! A Rust SDK and CLI for the REST API of the cardano-wallet daemon.
//!
//! ## Modules
//!
//! - [`api`]: REST API client — operation manifest, HTTP execution, wire
//!   types (including the transaction metadata codec)
//! - [`registry`]: command taxonomy derived from the operation manifest at
//!   startup
//! - [`cli`]: the `adawallet` command-line front end
//! - [`network`]: default endpoint and environment-variable names
//!
//! ## Quick Start — API client
//!
//! ```rust,ignore
//! use adawallet::api::{Call, WalletClient};
//! use adawallet::api::ops::find_operation;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WalletClient::new("http://localhost:8090/v2")?;
//!
//!     let op = find_operation("ListWallets").unwrap();
//!     let wallets = client.execute_json(Call::new(op)).await?;
//!     println!("{wallets:#}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Quick Start — metadata
//!
//! ```rust,ignore
//! use adawallet::api::types::{Metadata, PlainValue};
//!
//! let metadata = Metadata::encode([
//!     (674, PlainValue::map([
//!         (PlainValue::from("msg"), PlainValue::from("hello chain")),
//!     ])),
//! ])?;
//! let wire = metadata.to_json()?;
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// REST API client module: operation manifest, HTTP execution, wire types.
pub mod api;

/// Command-line front end.
pub mod cli;

/// Default endpoint and environment-variable names.
pub mod network;

/// Command taxonomy built from the operation manifest at startup.
pub mod registry;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use adawallet::prelude::*;
/// ```
pub mod prelude {
    // API client exports
    pub use crate::api::{
        ApiError, ApiResult, Call, ErrorResponse, TlsOptions, WalletClient, WalletClientBuilder,
    };

    // Operation manifest
    pub use crate::api::ops::{ExtraSpec, FlagKind, FlagSpec, HttpMethod, OperationSpec, OPERATIONS};

    // Metadata codec
    pub use crate::api::types::{Metadata, MetadataError, MetadataValue, PlainValue};

    // Command registry
    pub use crate::registry::{CommandGroup, MethodDescriptor, NamingTables, Registry};

    // Endpoint defaults
    pub use crate::network::DEFAULT_SERVER_URL;
}
