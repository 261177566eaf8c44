//! Process Street (target system) client.

use mb_config::{HttpConfig, ProcessStreetConfig};
use mb_core::{ChecklistTask, ChecklistTaskQuery, TaskUpdate};

use crate::error::ClientError;
use crate::http::{build_client, check_response, decode_json};

pub struct ProcessStreetClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ProcessStreetClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying client cannot be built.
    pub fn new(config: &ProcessStreetConfig, http: &HttpConfig) -> Result<Self, ClientError> {
        Ok(Self::with_client(build_client(http)?, config))
    }

    #[must_use]
    pub fn with_client(http: reqwest::Client, config: &ProcessStreetConfig) -> Self {
        Self {
            http,
            base_url: config.api_base().to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn tasks_url(&self) -> String {
        format!("{}/1/tasks", self.base_url)
    }

    fn task_url(&self, task_id: &str) -> String {
        format!("{}/1/tasks/{}", self.base_url, urlencoding::encode(task_id))
    }

    /// `GET /1/tasks` with the query's parameters. Filtering, ordering and
    /// limiting happen server-side; the first returned task wins.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, a non-200 status, or a
    /// body that is not an array of tasks.
    pub async fn find_task(
        &self,
        query: &ChecklistTaskQuery,
    ) -> Result<Option<ChecklistTask>, ClientError> {
        let params = query.to_query_pairs()?;

        let resp = self
            .http
            .get(self.tasks_url())
            .basic_auth(&self.api_key, None::<&str>)
            .query(&params)
            .send()
            .await?;
        let resp = check_response(resp).await.inspect_err(|e| {
            tracing::error!(error = %e, "failed to get tasks");
        })?;

        let tasks: Vec<ChecklistTask> = decode_json(resp, "process street tasks").await?;
        tracing::debug!(candidates = tasks.len(), "process street task query returned");
        Ok(tasks.into_iter().next())
    }

    /// `PATCH /1/tasks/{id}` with `{"changes": {"status": "Completed"}}`.
    ///
    /// Only the status decides success. The updated task is returned when the
    /// body has the expected shape and is `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-200 status.
    pub async fn complete_task(
        &self,
        task_id: &str,
    ) -> Result<Option<ChecklistTask>, ClientError> {
        let resp = self
            .http
            .patch(self.task_url(task_id))
            .basic_auth(&self.api_key, None::<&str>)
            .json(&TaskUpdate::complete())
            .send()
            .await?;
        let resp = check_response(resp).await.inspect_err(|e| {
            tracing::error!(task_id, error = %e, "failed to update task");
        })?;

        let body = match resp.text().await {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(task_id, %error, "failed to read task update response");
                return Ok(None);
            }
        };
        match serde_json::from_str::<ChecklistTask>(&body) {
            Ok(task) => Ok(Some(task)),
            Err(error) => {
                tracing::warn!(task_id, %error, "unexpected task update response body");
                Ok(None)
            }
        }
    }
}
