//! Cross-cutting error types for milestone-bridge.
//!
//! Transport and configuration errors live in their own crates. The server
//! crate converges all of them into one error that maps to an HTTP status.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A required inbound field is absent or empty.
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// The typed query could not be encoded for the wire.
    #[error("failed to encode task query: {0}")]
    QueryEncoding(#[from] serde_json::Error),
}
