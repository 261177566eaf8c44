//! Process Street checklist tasks and the typed query that locates them.
//!
//! The query is built from named fields and only turned into Process Street's
//! `where`/`include`/`orderBy`/`limit` parameters by [`ChecklistTaskQuery::to_query_pairs`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::milestone::Milestone;

/// Related entities expanded alongside each matched task.
pub const DEFAULT_INCLUDE: [&str; 2] = ["taskTemplate", "checklistRevision.checklist"];

/// Field used to pick the earliest-created revision.
pub const REVISION_CREATED_DATE: &str = "checklistRevision.createdDate";

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

/// Lifecycle status of checklists and checklist revisions. Lookups only ever
/// filter on `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChecklistStatus {
    Active,
}

impl ChecklistStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
        }
    }
}

impl fmt::Display for ChecklistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single task.
///
/// `NotCompleted` → `Completed` is the only transition the bridge performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    NotCompleted,
    Completed,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotCompleted => "NotCompleted",
            Self::Completed => "Completed",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Ascending sort key in Process Street's `orderBy` notation (`+field`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
}

impl OrderBy {
    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.field)
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Filter, expansion, ordering and limit for a task lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistTaskQuery {
    pub task_template_name: String,
    pub checklist_name: String,
    pub checklist_status: ChecklistStatus,
    pub revision_status: ChecklistStatus,
    pub include: Vec<String>,
    pub order_by: OrderBy,
    pub limit: u32,
}

#[derive(Serialize)]
struct Equals<T> {
    #[serde(rename = "_eq")]
    eq: T,
}

#[derive(Serialize)]
struct WhereClause<'a> {
    #[serde(rename = "taskTemplate.name")]
    task_template_name: Equals<&'a str>,
    #[serde(rename = "checklistRevision.checklist.name")]
    checklist_name: Equals<&'a str>,
    #[serde(rename = "checklistRevision.checklist.status")]
    checklist_status: Equals<ChecklistStatus>,
    #[serde(rename = "checklistRevision.status")]
    revision_status: Equals<ChecklistStatus>,
}

impl ChecklistTaskQuery {
    /// Task whose template is named after the milestone, inside the active
    /// checklist named after the milestone's project. Earliest revision first,
    /// one result.
    #[must_use]
    pub fn for_milestone(milestone: &Milestone) -> Self {
        Self {
            task_template_name: milestone.title.clone(),
            checklist_name: milestone.project_name.clone(),
            checklist_status: ChecklistStatus::Active,
            revision_status: ChecklistStatus::Active,
            include: DEFAULT_INCLUDE.iter().map(ToString::to_string).collect(),
            order_by: OrderBy::ascending(REVISION_CREATED_DATE),
            limit: 1,
        }
    }

    /// Encoded `where` parameter, keys in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::QueryEncoding`] if serialization fails.
    pub fn where_json(&self) -> Result<String, CoreError> {
        let clause = WhereClause {
            task_template_name: Equals {
                eq: &self.task_template_name,
            },
            checklist_name: Equals {
                eq: &self.checklist_name,
            },
            checklist_status: Equals {
                eq: self.checklist_status,
            },
            revision_status: Equals {
                eq: self.revision_status,
            },
        };
        Ok(serde_json::to_string(&clause)?)
    }

    /// Query-string pairs for `GET /1/tasks`. Values are not yet URL-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::QueryEncoding`] if the `where` clause cannot be
    /// serialized.
    pub fn to_query_pairs(&self) -> Result<Vec<(&'static str, String)>, CoreError> {
        Ok(vec![
            ("where", self.where_json()?),
            ("include", self.include.join(",")),
            ("orderBy", self.order_by.to_string()),
            ("limit", self.limit.to_string()),
        ])
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// A task returned by Process Street. Only the id is relied on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistTask {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

/// Body of `PATCH /1/tasks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    pub changes: TaskChanges,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskChanges {
    pub status: TaskStatus,
}

impl TaskUpdate {
    #[must_use]
    pub const fn complete() -> Self {
        Self {
            changes: TaskChanges {
                status: TaskStatus::Completed,
            },
        }
    }
}
