//! Inbound webhook listener configuration.

use serde::{Deserialize, Serialize};

fn default_listen() -> String {
    String::from("0.0.0.0:8080")
}

fn default_path() -> String {
    String::from("/")
}

/// Largest accepted webhook body, in bytes.
const fn default_max_body_bytes() -> usize {
    64 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address the webhook listener binds to.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Request path Teamwork posts to.
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            path: default_path(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}
