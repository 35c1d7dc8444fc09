//! Update phase
//!
//! Ensures the application component exists in the main project, adds it to
//! the main project's issues and optionally transitions them.

use crate::integrations::{ComponentRequest, IssueUpdate, Tracker, TransitionRequest};
use crate::Result;
use tracing::{debug, info};

/// Outcome of the update phase
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateSummary {
    pub component_created: bool,
    pub tagged: Vec<String>,
    pub transitioned: Vec<String>,
    pub skipped: Vec<String>,
}

/// Tag the main project's issues with the application component
///
/// Only keys starting with `project_key` are touched; the component and the
/// transition id belong to that project. The check is a plain prefix test, so
/// `PROJ` also accepts `PROJECT-1`. Each issue gets its component before its
/// transition.
pub async fn update_issues(
    tracker: &dyn Tracker,
    app: &str,
    project_key: &str,
    issues: &[String],
    transition_id: Option<&str>,
) -> Result<UpdateSummary> {
    let mut summary = UpdateSummary::default();

    let existing = tracker
        .get_components_paginated(project_key, app)
        .await?
        .into_last();

    let component = match existing {
        Some(component) => {
            debug!(component = %component.name, component_id = %component.id, "Reusing JIRA component");
            component
        }
        None => {
            summary.component_created = true;
            tracker
                .create_component(&ComponentRequest {
                    name: app.to_string(),
                    project: project_key.to_string(),
                })
                .await?
        }
    };

    let update = IssueUpdate::add_component(&component);
    let transition = transition_id.map(TransitionRequest::new);

    for key in issues {
        if !key.starts_with(project_key) {
            summary.skipped.push(key.clone());
            continue;
        }

        tracker.edit_issue(key, &update).await?;
        summary.tagged.push(key.clone());

        if let Some(ref transition) = transition {
            tracker.do_transition(key, transition).await?;
            summary.transitioned.push(key.clone());
        }
    }

    info!(
        component = %component.name,
        tagged = summary.tagged.len(),
        transitioned = summary.transitioned.len(),
        skipped = summary.skipped.len(),
        "Updated JIRA issues"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::mock::{component, Call, MockTracker};

    const APP: &str = "myapp";
    const PROJECT_KEY: &str = "PROJ";

    fn issues() -> Vec<String> {
        vec!["PROJ-1".to_string(), "JIRA-2".to_string(), "JIRA-3".to_string()]
    }

    #[tokio::test]
    async fn test_create_and_assign_new_component() {
        let tracker = MockTracker::new();

        let summary = update_issues(&tracker, APP, PROJECT_KEY, &issues(), None)
            .await
            .unwrap();

        assert!(summary.component_created);
        assert_eq!(summary.tagged, vec!["PROJ-1"]);
        assert_eq!(summary.skipped, vec!["JIRA-2", "JIRA-3"]);

        let calls = tracker.calls();
        assert_eq!(
            calls[0],
            Call::GetComponents {
                project: PROJECT_KEY.to_string(),
                query: APP.to_string(),
            }
        );
        assert_eq!(
            calls[1],
            Call::CreateComponent(ComponentRequest {
                name: APP.to_string(),
                project: PROJECT_KEY.to_string(),
            })
        );

        let edits = tracker.edits();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].0, "PROJ-1");
        assert_eq!(
            edits[0].1,
            IssueUpdate::add_component(&component("200", APP))
        );
    }

    #[tokio::test]
    async fn test_transition_issues_with_existing_component() {
        let tracker = MockTracker::new().with_components(vec![component("0", APP)]);

        let summary = update_issues(&tracker, APP, PROJECT_KEY, &issues(), Some("3"))
            .await
            .unwrap();

        assert!(!summary.component_created);
        assert_eq!(summary.transitioned, vec!["PROJ-1"]);

        let calls = tracker.calls();
        assert!(!calls.iter().any(|c| matches!(c, Call::CreateComponent(_))));
        assert_eq!(
            calls[1..],
            [
                Call::EditIssue {
                    key: "PROJ-1".to_string(),
                    update: IssueUpdate::add_component(&component("0", APP)),
                },
                Call::DoTransition {
                    key: "PROJ-1".to_string(),
                    request: TransitionRequest::new("3"),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_prefix_check_is_plain_starts_with() {
        let tracker = MockTracker::new().with_components(vec![component("0", APP)]);
        let issues = vec!["PROJECT-1".to_string(), "XPROJ-2".to_string()];

        let summary = update_issues(&tracker, APP, PROJECT_KEY, &issues, None)
            .await
            .unwrap();

        assert_eq!(summary.tagged, vec!["PROJECT-1"]);
        assert_eq!(summary.skipped, vec!["XPROJ-2"]);
    }

    #[tokio::test]
    async fn test_no_issues_still_ensures_component() {
        let tracker = MockTracker::new();

        let summary = update_issues(&tracker, APP, PROJECT_KEY, &[], Some("3"))
            .await
            .unwrap();

        assert!(summary.component_created);
        assert_eq!(tracker.calls().len(), 2);
    }
}
