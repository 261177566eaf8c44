//! Teamwork (source system) client. Read-only.

use mb_config::{HttpConfig, TeamworkConfig};
use mb_core::Milestone;
use serde::Deserialize;

use crate::error::ClientError;
use crate::http::{build_client, check_response, decode_json};

/// Teamwork ignores the password when authenticating with an API key, but
/// requires one to be present.
const PLACEHOLDER_PASSWORD: &str = "xxx";

#[derive(Deserialize)]
struct MilestoneEnvelope {
    milestone: Milestone,
}

pub struct TeamworkClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TeamworkClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying client cannot be built.
    pub fn new(config: &TeamworkConfig, http: &HttpConfig) -> Result<Self, ClientError> {
        Ok(Self::with_client(build_client(http)?, config))
    }

    /// Reuse an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(http: reqwest::Client, config: &TeamworkConfig) -> Self {
        Self {
            http,
            base_url: config.api_base().to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn milestone_url(&self, milestone_id: &str) -> String {
        format!(
            "{}/milestones/{}.json",
            self.base_url,
            urlencoding::encode(milestone_id)
        )
    }

    /// `GET /milestones/{id}.json`, returning the milestone with title and
    /// project name trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, a non-200 status, or a
    /// body without `milestone.title` and `milestone.project-name`.
    pub async fn fetch_milestone(&self, milestone_id: &str) -> Result<Milestone, ClientError> {
        let url = self.milestone_url(milestone_id);
        tracing::debug!(milestone_id, "fetching teamwork milestone");

        let resp = self
            .http
            .get(&url)
            .basic_auth(&self.api_key, Some(PLACEHOLDER_PASSWORD))
            .send()
            .await?;
        let resp = check_response(resp).await.inspect_err(|e| {
            tracing::error!(milestone_id, error = %e, "failed to get milestone");
        })?;

        let envelope: MilestoneEnvelope = decode_json(resp, "teamwork milestone").await?;
        Ok(envelope.milestone.trimmed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "milestone": {
            "id": "901",
            "title": "  Design Review ",
            "project-name": "Acme Launch\n",
            "completed": true,
            "deadline": "20261031"
        },
        "STATUS": "OK"
    }"#;

    fn client(base_url: &str) -> TeamworkClient {
        TeamworkClient::new(
            &TeamworkConfig {
                api_key: "twp_key".into(),
                base_url: base_url.into(),
            },
            &HttpConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn parse_milestone_envelope() {
        let envelope: MilestoneEnvelope = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(
            envelope.milestone.trimmed(),
            Milestone::new("Design Review", "Acme Launch")
        );
    }

    #[test]
    fn milestone_url_joins_base_and_route() {
        let client = client("https://acme.teamwork.com/");
        assert_eq!(
            client.milestone_url("901"),
            "https://acme.teamwork.com/milestones/901.json"
        );
    }

    #[test]
    fn milestone_url_encodes_id() {
        let client = client("https://acme.teamwork.com");
        assert_eq!(
            client.milestone_url("9/../1"),
            "https://acme.teamwork.com/milestones/9%2F..%2F1.json"
        );
    }
}
