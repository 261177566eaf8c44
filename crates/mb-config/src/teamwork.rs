//! Teamwork (source system) configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TeamworkConfig {
    /// API key, sent as the basic-auth username.
    #[serde(default)]
    pub api_key: String,

    /// Site URL, for example `https://companyname.teamwork.com`.
    #[serde(default)]
    pub base_url: String,
}

impl TeamworkConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.base_url.is_empty()
    }

    /// Base URL without a trailing slash, ready for route concatenation.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        assert!(!TeamworkConfig::default().is_configured());
    }

    #[test]
    fn api_base_strips_trailing_slashes() {
        let config = TeamworkConfig {
            api_key: "twp_key".into(),
            base_url: "https://acme.teamwork.com//".into(),
        };
        assert!(config.is_configured());
        assert_eq!(config.api_base(), "https://acme.teamwork.com");
    }
}
