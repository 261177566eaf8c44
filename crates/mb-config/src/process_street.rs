//! Process Street (target system) configuration.

use serde::{Deserialize, Serialize};

/// Public Process Street API endpoint.
fn default_base_url() -> String {
    String::from("https://api.process.st")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessStreetConfig {
    /// API key, sent as the basic-auth username with an empty password.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ProcessStreetConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
        }
    }
}

impl ProcessStreetConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty()
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
