//! In-memory tracker recording every call, for synchronizer tests

use crate::integrations::{
    Component, ComponentRequest, IssueUpdate, Page, Project, Tracker, TransitionRequest, Version,
    VersionRequest,
};
use crate::{JiraLinkError, Result};
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetProject(String),
    GetVersions { project: String, query: String },
    CreateVersion(VersionRequest),
    UpdateVersion { id: String, request: VersionRequest },
    GetComponents { project: String, query: String },
    CreateComponent(ComponentRequest),
    EditIssue { key: String, update: IssueUpdate },
    DoTransition { key: String, request: TransitionRequest },
}

pub struct MockTracker {
    pub project: Project,
    pub versions: Vec<Version>,
    pub components: Vec<Component>,
    pub failing_issue: Option<String>,
    calls: Mutex<Vec<Call>>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self {
            project: Project {
                id: "1".to_string(),
                key: "PROJ".to_string(),
                name: Some("PROJECT".to_string()),
            },
            versions: Vec::new(),
            components: Vec::new(),
            failing_issue: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_versions(mut self, versions: Vec<Version>) -> Self {
        self.versions = versions;
        self
    }

    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = components;
        self
    }

    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing_issue = Some(key.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<(String, IssueUpdate)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::EditIssue { key, update } => Some((key, update)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Single, last page holding `values`
pub fn page<T>(values: Vec<T>) -> Page<T> {
    let total = values.len() as u32;
    Page {
        values,
        start_at: 0,
        max_results: 50,
        total,
        is_last: true,
    }
}

pub fn version(id: &str, name: &str) -> Version {
    Version {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        released: false,
        project_id: Some(1),
    }
}

pub fn component(id: &str, name: &str) -> Component {
    Component {
        id: id.to_string(),
        name: name.to_string(),
        project: Some("PROJ".to_string()),
    }
}

#[async_trait]
impl Tracker for MockTracker {
    async fn get_project(&self, key: &str) -> Result<Project> {
        self.record(Call::GetProject(key.to_string()));
        Ok(self.project.clone())
    }

    async fn get_versions_paginated(
        &self,
        project_key: &str,
        query: &str,
    ) -> Result<Page<Version>> {
        self.record(Call::GetVersions {
            project: project_key.to_string(),
            query: query.to_string(),
        });
        Ok(page(self.versions.clone()))
    }

    async fn create_version(&self, request: &VersionRequest) -> Result<Version> {
        self.record(Call::CreateVersion(request.clone()));
        Ok(Version {
            id: "100".to_string(),
            name: request.name.clone(),
            description: request.description.clone(),
            released: request.released,
            project_id: Some(request.project_id),
        })
    }

    async fn update_version(&self, id: &str, request: &VersionRequest) -> Result<Version> {
        self.record(Call::UpdateVersion {
            id: id.to_string(),
            request: request.clone(),
        });
        Ok(Version {
            id: id.to_string(),
            name: request.name.clone(),
            description: request.description.clone(),
            released: request.released,
            project_id: Some(request.project_id),
        })
    }

    async fn get_components_paginated(
        &self,
        project_key: &str,
        query: &str,
    ) -> Result<Page<Component>> {
        self.record(Call::GetComponents {
            project: project_key.to_string(),
            query: query.to_string(),
        });
        Ok(page(self.components.clone()))
    }

    async fn create_component(&self, request: &ComponentRequest) -> Result<Component> {
        self.record(Call::CreateComponent(request.clone()));
        Ok(Component {
            id: "200".to_string(),
            name: request.name.clone(),
            project: Some(request.project.clone()),
        })
    }

    async fn edit_issue(&self, key: &str, update: &IssueUpdate) -> Result<()> {
        self.record(Call::EditIssue {
            key: key.to_string(),
            update: update.clone(),
        });
        if self.failing_issue.as_deref() == Some(key) {
            return Err(JiraLinkError::tracker(
                format!("JIRA API error editing issue {}: HTTP 404 Not Found", key),
                None,
            ));
        }
        Ok(())
    }

    async fn do_transition(&self, key: &str, request: &TransitionRequest) -> Result<()> {
        self.record(Call::DoTransition {
            key: key.to_string(),
            request: request.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_helper_is_single_last_page() {
        let listing = page(vec![component("1", "a"), component("2", "b")]);
        assert!(listing.is_last);
        assert_eq!(listing.total, 2);
        assert_eq!(listing.into_last().unwrap().id, "2");
    }
}
