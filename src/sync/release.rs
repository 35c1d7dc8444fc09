//! Release phase
//!
//! Ensures a JIRA version `{app}/{version}` exists and adds it to the fix
//! versions of every issue.

use crate::integrations::{IssueUpdate, Tracker, Version, VersionRequest};
use crate::Result;
use tracing::{debug, info};

/// Outcome of the release phase
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSummary {
    pub version: Version,
    pub created: bool,
    pub tagged: Vec<String>,
}

/// JIRA version name for an application release, without a leading `v`
pub fn version_name(app: &str, version: &str) -> String {
    format!("{}/{}", app, version.strip_prefix('v').unwrap_or(version))
}

/// Create or update the release version and tag every issue with it
///
/// The version lookup takes the last entry of the filtered page as the match.
/// Issues of every project are tagged. The first failing call aborts the
/// phase; edits already applied stay applied.
pub async fn release_issues(
    tracker: &dyn Tracker,
    app: &str,
    project_key: &str,
    issues: &[String],
    version: &str,
    draft: bool,
    description: Option<&str>,
) -> Result<ReleaseSummary> {
    let name = version_name(app, version);
    let project = tracker.get_project(project_key).await?;

    let request = VersionRequest {
        name: name.clone(),
        project_id: project.numeric_id()?,
        released: !draft,
        description: description.map(str::to_string),
    };

    let existing = tracker
        .get_versions_paginated(project_key, &name)
        .await?
        .into_last();

    let (version, created) = match existing {
        None => {
            debug!(version = %name, "JIRA version not found. Creating...");
            (tracker.create_version(&request).await?, true)
        }
        Some(found) => {
            debug!(version = %name, version_id = %found.id, "JIRA version found. Updating...");
            let updated = tracker.update_version(&found.id, &request).await?;
            (updated, false)
        }
    };

    let update = IssueUpdate::add_fix_version(&version);
    let mut tagged = Vec::with_capacity(issues.len());
    for key in issues {
        tracker.edit_issue(key, &update).await?;
        tagged.push(key.clone());
    }

    info!(version = %name, created, issues = tagged.len(), "Released JIRA issues");

    Ok(ReleaseSummary {
        version,
        created,
        tagged,
    })
}
