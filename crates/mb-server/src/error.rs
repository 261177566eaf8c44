//! Request-level error that every crate error converges into.

use mb_clients::ClientError;
use mb_config::ConfigError;
use mb_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// Problem with the inbound delivery itself.
    #[error(transparent)]
    Request(#[from] CoreError),

    /// The request body could not be read.
    #[error("failed to read request body: {0}")]
    Body(String),

    /// Teamwork or Process Street failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] ClientError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BridgeError {
    /// HTTP status returned to the webhook sender. Details stay in the log.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Request(CoreError::MissingField { .. }) | Self::Body(_) => 400,
            Self::Request(CoreError::QueryEncoding(_)) | Self::Upstream(_) | Self::Config(_) => {
                500
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_is_bad_request() {
        let err = BridgeError::from(CoreError::MissingField {
            field: "objectId".into(),
        });
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "missing required field: objectId");
    }

    #[test]
    fn upstream_failure_is_server_error() {
        let err = BridgeError::from(ClientError::Api {
            status: 502,
            message: String::new(),
        });
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn config_failure_is_server_error() {
        let err = BridgeError::from(ConfigError::Missing {
            field: "teamwork.api_key",
        });
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn unreadable_body_is_bad_request() {
        assert_eq!(BridgeError::Body("reset".into()).status_code(), 400);
    }
}
