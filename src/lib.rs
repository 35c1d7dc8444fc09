//! JiraLink - Link GitHub activity to JIRA releases
//!
//! JiraLink runs as a GitHub Actions step. It collects the JIRA issue keys
//! mentioned by the triggering pull request, push or release, then:
//!
//! - creates or updates the `{app}/{version}` JIRA version and adds it to the
//!   fix versions of every issue (when a version is given)
//! - adds the `{app}` component to the main project's issues and optionally
//!   transitions them
//!
//! # Architecture
//!
//! - **config**: Action inputs, YAML config file and validation
//! - **github**: Event payloads and issue key extraction
//! - **integrations**: Tracker trait and the JIRA REST client
//! - **sync**: Release and update phases
//! - **run**: Orchestration and failure reporting

pub mod config;
pub mod error;
pub mod github;
pub mod integrations;
pub mod logging;
pub mod run;
pub mod sync;

// Re-exports
pub use error::{JiraLinkError, Result, TrackerErrorBody};
