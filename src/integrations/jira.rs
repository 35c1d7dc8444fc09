//! JIRA Integration Adapter
//!
//! [`Tracker`] implementation over the JIRA Cloud REST API (v3).

use super::tracker::{
    Component, ComponentRequest, IssueUpdate, Page, Project, Tracker, TransitionRequest, Version,
    VersionRequest,
};
use crate::config::ActionConfig;
use crate::error::TrackerErrorBody;
use crate::{JiraLinkError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

/// Per-request timeout for lookups
const GET_TIMEOUT: Duration = Duration::from_secs(10);
/// Per-request timeout for create/update operations
const WRITE_TIMEOUT: Duration = Duration::from_secs(15);

/// Credentials sent with every request
#[derive(Clone)]
enum Auth {
    Basic { email: String, token: String },
    Bearer(String),
}

/// Authenticated JIRA REST client
pub struct JiraClient {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl JiraClient {
    /// Create a client from the action configuration
    ///
    /// Uses basic authentication when an email is configured (JIRA Cloud API
    /// tokens), bearer authentication otherwise (personal access tokens).
    pub fn new(config: &ActionConfig) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let base_url = format!("{}/rest/api/3", config.host.trim_end_matches('/'));

        let auth = match config.email {
            Some(ref email) => Auth::Basic {
                email: email.clone(),
                token: config.api_token.clone(),
            },
            None => Auth::Bearer(config.api_token.clone()),
        };

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth {
            Auth::Basic {
                ref email,
                ref token,
            } => request.basic_auth(email, Some(token)),
            Auth::Bearer(ref token) => request.bearer_auth(token),
        }
    }
}

/// Turn a failed response into a tracker error, keeping JIRA's error payload
async fn tracker_error(response: Response, action: &str) -> JiraLinkError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<TrackerErrorBody>(&text)
        .ok()
        .filter(|b| !b.is_empty());

    let message = match status {
        StatusCode::UNAUTHORIZED => "JIRA authentication failed".to_string(),
        _ => format!("JIRA API error {}: HTTP {}", action, status),
    };
    debug!(status = %status, body = %text, "JIRA request failed");

    JiraLinkError::tracker(message, body)
}

#[async_trait]
impl Tracker for JiraClient {
    async fn get_project(&self, key: &str) -> Result<Project> {
        let url = format!("{}/project/{}", self.base_url, key);

        debug!(project = %key, "Fetching JIRA project");

        let request = self.authorize(self.client.get(&url));
        let response = request.timeout(GET_TIMEOUT).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            _ => Err(tracker_error(response, &format!("getting project {}", key)).await),
        }
    }

    async fn get_versions_paginated(
        &self,
        project_key: &str,
        query: &str,
    ) -> Result<Page<Version>> {
        let url = format!("{}/project/{}/version", self.base_url, project_key);

        debug!(project = %project_key, query = %query, "Searching JIRA versions");

        let request = self.authorize(self.client.get(&url).query(&[("query", query)]));
        let response = request.timeout(GET_TIMEOUT).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            _ => Err(tracker_error(response, "listing versions").await),
        }
    }

    async fn create_version(&self, request: &VersionRequest) -> Result<Version> {
        let url = format!("{}/version", self.base_url);

        info!(name = %request.name, released = request.released, "Creating JIRA version");

        let req = self.authorize(self.client.post(&url).json(request));
        let response = req.timeout(WRITE_TIMEOUT).send().await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                let version: Version = response.json().await?;
                info!(version_id = %version.id, name = %version.name, "Created JIRA version");
                Ok(version)
            }
            _ => Err(tracker_error(response, "creating version").await),
        }
    }

    async fn update_version(&self, id: &str, request: &VersionRequest) -> Result<Version> {
        let url = format!("{}/version/{}", self.base_url, id);

        info!(version_id = %id, name = %request.name, released = request.released, "Updating JIRA version");

        let req = self.authorize(self.client.put(&url).json(request));
        let response = req.timeout(WRITE_TIMEOUT).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            _ => Err(tracker_error(response, &format!("updating version {}", id)).await),
        }
    }

    async fn get_components_paginated(
        &self,
        project_key: &str,
        query: &str,
    ) -> Result<Page<Component>> {
        let url = format!("{}/project/{}/component", self.base_url, project_key);

        debug!(project = %project_key, query = %query, "Searching JIRA components");

        let request = self.authorize(self.client.get(&url).query(&[("query", query)]));
        let response = request.timeout(GET_TIMEOUT).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            _ => Err(tracker_error(response, "listing components").await),
        }
    }

    async fn create_component(&self, request: &ComponentRequest) -> Result<Component> {
        let url = format!("{}/component", self.base_url);

        info!(name = %request.name, project = %request.project, "Creating JIRA component");

        let req = self.authorize(self.client.post(&url).json(request));
        let response = req.timeout(WRITE_TIMEOUT).send().await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => Ok(response.json().await?),
            _ => Err(tracker_error(response, "creating component").await),
        }
    }

    async fn edit_issue(&self, key: &str, update: &IssueUpdate) -> Result<()> {
        let url = format!("{}/issue/{}", self.base_url, key);

        let req = self.authorize(self.client.put(&url).json(update));
        let response = req.timeout(WRITE_TIMEOUT).send().await?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => {
                info!(issue = %key, "Edited JIRA issue");
                Ok(())
            }
            _ => Err(tracker_error(response, &format!("editing issue {}", key)).await),
        }
    }

    async fn do_transition(&self, key: &str, request: &TransitionRequest) -> Result<()> {
        let url = format!("{}/issue/{}/transitions", self.base_url, key);

        info!(issue = %key, transition_id = %request.transition.id, "Transitioning JIRA issue");

        let req = self.authorize(self.client.post(&url).json(request));
        let response = req.timeout(WRITE_TIMEOUT).send().await?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
            _ => Err(tracker_error(response, &format!("transitioning issue {}", key)).await),
        }
    }
}
