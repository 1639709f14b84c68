//! Wire types for the wallet REST API.
//!
//! Responses are passed through as untyped JSON and pretty-printed; the one
//! wire shape with real structure on the client side is transaction
//! metadata, which gets a full codec.

pub mod metadata;

// Re-export for convenience
pub use metadata::{Metadata, MetadataError, MetadataValue, PlainValue};
