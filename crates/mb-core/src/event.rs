//! Inbound Teamwork webhook events.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wire value Teamwork sends in the `event` form field when a milestone is
/// marked complete.
pub const MILESTONE_COMPLETED: &str = "MILESTONE.COMPLETED";

/// Form field carrying the event type.
pub const EVENT_FIELD: &str = "event";

/// Form field carrying the identifier of the object the event refers to.
pub const OBJECT_ID_FIELD: &str = "objectId";

/// Event type of a webhook delivery.
///
/// Only [`EventKind::MilestoneCompleted`] triggers work. Every other value is
/// kept verbatim so it can be logged before being ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    MilestoneCompleted,
    Other(String),
}

impl EventKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::MilestoneCompleted => MILESTONE_COMPLETED,
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for EventKind {
    fn from(raw: &str) -> Self {
        if raw == MILESTONE_COMPLETED {
            Self::MilestoneCompleted
        } else {
            Self::Other(raw.to_string())
        }
    }
}

impl From<String> for EventKind {
    fn from(raw: String) -> Self {
        if raw == MILESTONE_COMPLETED {
            Self::MilestoneCompleted
        } else {
            Self::Other(raw)
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::MilestoneCompleted => MILESTONE_COMPLETED.to_string(),
            EventKind::Other(raw) => raw,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A webhook delivery that passed field validation. Lives for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookEvent {
    pub kind: EventKind,
    /// Teamwork identifier of the object the event refers to. Opaque.
    pub object_id: String,
}

impl WebhookEvent {
    #[must_use]
    pub fn milestone_completed(object_id: impl Into<String>) -> Self {
        Self {
            kind: EventKind::MilestoneCompleted,
            object_id: object_id.into(),
        }
    }
}
