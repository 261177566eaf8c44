//! Shared HTTP plumbing for both API clients.
//!
//! Builds the `reqwest::Client` from [`HttpConfig`] and centralizes the
//! status-code check so the client modules only construct requests and map
//! responses.

use mb_config::HttpConfig;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Build a client with the configured timeout and user agent.
///
/// # Errors
///
/// Returns [`ClientError::Http`] if the TLS backend cannot be initialized.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client, ClientError> {
    Ok(reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .build()?)
}

/// Return the response unchanged if it is a 200, otherwise
/// [`ClientError::Api`] carrying the status and body.
///
/// Both APIs answer 200 on success; any other code, 2xx included, is treated
/// as a failure.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status != StatusCode::OK {
        return Err(ClientError::Api {
            status: status.as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Read the body and decode it as `T`, reporting shape mismatches as
/// [`ClientError::Parse`].
pub async fn decode_json<T: DeserializeOwned>(
    resp: reqwest::Response,
    what: &str,
) -> Result<T, ClientError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Parse(format!("{what}: {e}")))
}
