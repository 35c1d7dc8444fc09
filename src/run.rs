//! Run orchestration
//!
//! Resolves the issue list, then runs the release phase (when a version is
//! configured) followed by the update phase.

use crate::config::ActionConfig;
use crate::github::{extract, EventPayload, IssuePattern};
use crate::integrations::Tracker;
use crate::sync::{release_issues, update_issues, ReleaseSummary, UpdateSummary};
use crate::{JiraLinkError, Result};
use tracing::{debug, error, info};

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub issues: Vec<String>,
    pub release: Option<ReleaseSummary>,
    pub update: UpdateSummary,
}

/// Configured issue keys, or the keys mentioned by the event when none are
pub fn resolve_issues(config: &ActionConfig, event: &EventPayload) -> Result<Vec<String>> {
    if !config.issues.is_empty() {
        return Ok(config.issues.clone());
    }
    let pattern = IssuePattern::new(&config.pattern())?;
    Ok(extract(event, &pattern))
}

/// Run both synchronization phases against the tracker
pub async fn run(
    config: &ActionConfig,
    tracker: &dyn Tracker,
    event: &EventPayload,
) -> Result<RunSummary> {
    debug!(config = ?config.redacted(), "Configuration");

    let issues = resolve_issues(config, event)?;
    info!(event = %event.name(), issues = ?issues, "Resolved JIRA issues");

    let release = match config.version {
        Some(ref version) => Some(
            release_issues(
                tracker,
                &config.app,
                &config.project_key,
                &issues,
                version,
                config.draft,
                config.description.as_deref(),
            )
            .await?,
        ),
        None => None,
    };

    let update = update_issues(
        tracker,
        &config.app,
        &config.project_key,
        &issues,
        config.transition_id.as_deref(),
    )
    .await?;

    Ok(RunSummary {
        issues,
        release,
        update,
    })
}

/// Log the structured details of a failed run
///
/// Returns the logged entries: each JIRA error message, then the `errors`
/// object serialized as one entry. The top-level message is not included;
/// the caller reports it when failing the run.
pub fn report_failure(err: &JiraLinkError) -> Vec<String> {
    let mut entries = Vec::new();

    if let Some(body) = err.error_body() {
        entries.extend(body.error_messages.iter().cloned());
        if let Some(ref errors) = body.errors {
            entries.push(errors.to_string());
        }
    }

    for entry in &entries {
        error!("{}", entry);
    }
    entries
}
