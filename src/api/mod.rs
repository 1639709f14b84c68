//! Wallet REST API client: operation manifest, HTTP execution, wire types.

pub mod client;
pub mod error;
pub mod ops;
pub mod types;

pub use client::{Call, TlsOptions, WalletClient, WalletClientBuilder};
pub use error::{ApiError, ApiResult, ErrorResponse};
