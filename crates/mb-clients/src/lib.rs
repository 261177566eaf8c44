//! # mb-clients
//!
//! HTTP clients for the two systems milestone-bridge connects:
//! - Teamwork, read for milestone details
//! - Process Street, queried for the matching checklist task and updated to
//!   mark it complete
//!
//! Every call is a single attempt with the configured timeout. Any non-200
//! answer is a [`ClientError`].

mod error;
mod http;
pub mod process_street;
pub mod teamwork;

pub use error::ClientError;
pub use http::build_client;
pub use process_street::ProcessStreetClient;
pub use teamwork::TeamworkClient;
