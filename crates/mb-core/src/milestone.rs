//! Teamwork milestone snapshot.

use serde::{Deserialize, Serialize};

/// The two milestone attributes the bridge needs, read once per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    #[serde(rename = "project-name")]
    pub project_name: String,
}

impl Milestone {
    /// Build a snapshot with both names trimmed of surrounding whitespace.
    #[must_use]
    pub fn new(title: &str, project_name: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            project_name: project_name.trim().to_string(),
        }
    }

    /// Copy with both names trimmed.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self::new(&self.title, &self.project_name)
    }
}
