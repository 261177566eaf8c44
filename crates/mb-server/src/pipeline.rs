//! Milestone-completed pipeline: Teamwork milestone → Process Street task query
//! → task completion.
//!
//! Each call is an independent transaction. The first error aborts it; nothing
//! is retried and no partial result is kept.

use mb_clients::{ProcessStreetClient, TeamworkClient, build_client};
use mb_config::BridgeConfig;
use mb_core::event::{EVENT_FIELD, OBJECT_ID_FIELD};
use mb_core::{ChecklistTaskQuery, EventKind, Milestone, WebhookEvent};
use serde::Serialize;

use crate::error::BridgeError;
use crate::receiver::FormParams;

/// How a delivery ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Event type the bridge does not handle.
    Ignored { event: String },
    /// No active checklist task matches the milestone. Expected, not an error.
    NoMatchingTask { milestone: Milestone },
    Completed { task_id: String },
}

pub struct Bridge {
    teamwork: TeamworkClient,
    process_street: ProcessStreetClient,
}

impl Bridge {
    /// Validate `config` and build both clients on one shared connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if a required value is missing or
    /// invalid, or [`BridgeError::Upstream`] if the HTTP client cannot be built.
    pub fn from_config(config: &BridgeConfig) -> Result<Self, BridgeError> {
        config.validate()?;
        let http = build_client(&config.http)?;
        Ok(Self {
            teamwork: TeamworkClient::with_client(http.clone(), &config.teamwork),
            process_street: ProcessStreetClient::with_client(http, &config.process_street),
        })
    }

    /// Dispatch one webhook delivery on its `event` field.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Request`] if `event`, or `objectId` for a
    /// milestone completion, is missing. Otherwise see
    /// [`Self::handle_milestone_completed`].
    pub async fn handle_webhook(&self, params: &FormParams) -> Result<Outcome, BridgeError> {
        match EventKind::from(params.required(EVENT_FIELD)?) {
            EventKind::MilestoneCompleted => {
                let milestone_id = params.required(OBJECT_ID_FIELD)?;
                self.handle_milestone_completed(&WebhookEvent::milestone_completed(milestone_id))
                    .await
            }
            EventKind::Other(event) => {
                tracing::info!(%event, "ignoring unhandled event");
                Ok(Outcome::Ignored { event })
            }
        }
    }

    /// Complete the Process Street task named after the milestone in the
    /// checklist named after its project.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Upstream`] if any of the three API calls fails.
    pub async fn handle_milestone_completed(
        &self,
        event: &WebhookEvent,
    ) -> Result<Outcome, BridgeError> {
        let milestone_id = event.object_id.as_str();
        let milestone = self.teamwork.fetch_milestone(milestone_id).await?;
        tracing::info!(
            event = %event.kind,
            milestone_id,
            project_name = %milestone.project_name,
            milestone_name = %milestone.title,
            "fetched milestone"
        );

        let query = ChecklistTaskQuery::for_milestone(&milestone);
        let Some(task) = self.process_street.find_task(&query).await? else {
            tracing::info!(
                milestone_id,
                project_name = %milestone.project_name,
                milestone_name = %milestone.title,
                "no task found in process street for milestone"
            );
            return Ok(Outcome::NoMatchingTask { milestone });
        };

        let updated = self.process_street.complete_task(&task.id).await?;
        tracing::info!(
            milestone_id,
            task_id = %task.id,
            status = ?updated.and_then(|t| t.status),
            "completed process street task"
        );
        Ok(Outcome::Completed { task_id: task.id })
    }
}
