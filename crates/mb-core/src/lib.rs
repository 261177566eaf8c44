//! # mb-core
//!
//! Domain types shared across the milestone-bridge crates:
//! - Inbound webhook events and their recognized kinds
//! - The milestone snapshot fetched from Teamwork
//! - The typed Process Street task query and the task it matches
//! - Cross-cutting error types

pub mod checklist;
pub mod errors;
pub mod event;
pub mod milestone;

pub use checklist::{
    ChecklistStatus, ChecklistTask, ChecklistTaskQuery, OrderBy, TaskStatus, TaskUpdate,
};
pub use errors::CoreError;
pub use event::{EventKind, WebhookEvent};
pub use milestone::Milestone;
