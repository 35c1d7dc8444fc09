//! GitHub side of the action
//!
//! Loads the triggering webhook event and extracts the JIRA issue keys it
//! mentions.

pub mod event;
pub mod extract;

pub use event::EventPayload;
pub use extract::{extract, sanitize_issue_key, IssuePattern};
