//! Client error types.

use thiserror::Error;

/// Failures talking to Teamwork or Process Street. Every variant is fatal for
/// the request that hit it; nothing is retried.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport error, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with something other than 200.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, possibly empty.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The outgoing query could not be encoded.
    #[error(transparent)]
    Query(#[from] mb_core::CoreError),
}

impl ClientError {
    /// Whether the request never produced an HTTP response.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Upstream status code, when there was one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
