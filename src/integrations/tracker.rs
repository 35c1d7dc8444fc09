//! Issue tracker abstraction
//!
//! The synchronizer only talks to JIRA through the [`Tracker`] trait, so the
//! HTTP client can be swapped for an in-memory one in tests.

use crate::{JiraLinkError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// JIRA project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Project {
    /// Numeric project id required by the version endpoints
    pub fn numeric_id(&self) -> Result<i64> {
        self.id.parse().map_err(|_| {
            JiraLinkError::tracker(
                format!("JIRA project {} has a non-numeric id: {}", self.key, self.id),
                None,
            )
        })
    }
}

/// One page of a paginated JIRA listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
    #[serde(rename = "startAt", default)]
    pub start_at: u32,
    #[serde(rename = "maxResults", default)]
    pub max_results: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(rename = "isLast", default)]
    pub is_last: bool,
}

impl<T> Page<T> {
    /// Last entry of the page, taken as the match for the lookup query
    pub fn into_last(mut self) -> Option<T> {
        self.values.pop()
    }
}

/// JIRA project version (release marker)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub released: bool,
    #[serde(rename = "projectId", default)]
    pub project_id: Option<i64>,
}

/// Request to create or update a JIRA version
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionRequest {
    pub name: String,
    #[serde(rename = "projectId")]
    pub project_id: i64,
    pub released: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// JIRA project component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub project: Option<String>,
}

/// Request to create a JIRA component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRequest {
    pub name: String,
    pub project: String,
}

/// Reference to a version or component by id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddOperation {
    pub add: EntityRef,
}

/// Field operations of an issue edit
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueUpdateFields {
    #[serde(rename = "fixVersions", skip_serializing_if = "Vec::is_empty")]
    pub fix_versions: Vec<AddOperation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AddOperation>,
}

/// Body of `PUT /issue/{key}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueUpdate {
    pub update: IssueUpdateFields,
}

impl IssueUpdate {
    pub fn add_fix_version(version: &Version) -> Self {
        Self {
            update: IssueUpdateFields {
                fix_versions: vec![AddOperation {
                    add: EntityRef {
                        id: version.id.clone(),
                    },
                }],
                ..Default::default()
            },
        }
    }

    pub fn add_component(component: &Component) -> Self {
        Self {
            update: IssueUpdateFields {
                components: vec![AddOperation {
                    add: EntityRef {
                        id: component.id.clone(),
                    },
                }],
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionRef {
    pub id: String,
    #[serde(rename = "isGlobal")]
    pub is_global: bool,
    #[serde(rename = "isConditional")]
    pub is_conditional: bool,
}

/// Body of `POST /issue/{key}/transitions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionRequest {
    pub transition: TransitionRef,
}

impl TransitionRequest {
    /// Global, unconditional transition
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            transition: TransitionRef {
                id: id.into(),
                is_global: true,
                is_conditional: false,
            },
        }
    }
}

/// Operations the synchronizer needs from the issue tracker
///
/// Every call may fail; failures are never retried.
#[async_trait]
pub trait Tracker: Send + Sync {
    async fn get_project(&self, key: &str) -> Result<Project>;

    /// First page of the project's versions filtered by `query`
    async fn get_versions_paginated(&self, project_key: &str, query: &str)
        -> Result<Page<Version>>;

    async fn create_version(&self, request: &VersionRequest) -> Result<Version>;

    async fn update_version(&self, id: &str, request: &VersionRequest) -> Result<Version>;

    /// First page of the project's components filtered by `query`
    async fn get_components_paginated(
        &self,
        project_key: &str,
        query: &str,
    ) -> Result<Page<Component>>;

    async fn create_component(&self, request: &ComponentRequest) -> Result<Component>;

    async fn edit_issue(&self, key: &str, update: &IssueUpdate) -> Result<()>;

    async fn do_transition(&self, key: &str, request: &TransitionRequest) -> Result<()>;
}
