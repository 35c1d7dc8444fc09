//! Action configuration handling
//!
//! The action is configured through GitHub Actions inputs (exported as
//! `INPUT_*` environment variables), command-line flags, or an optional YAML
//! file. Flags and environment variables override values from the file.

use crate::{JiraLinkError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Resolved configuration for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionConfig {
    /// Application name, used for the component and as version prefix
    #[serde(default)]
    pub app: String,

    /// JIRA instance URL (e.g. "https://company.atlassian.net")
    #[serde(default)]
    pub host: String,

    /// Account email for basic authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// JIRA API token
    #[serde(default)]
    pub api_token: String,

    /// Main JIRA project key; components and transitions only apply here
    #[serde(default)]
    pub project_key: String,

    /// Extra project keys recognised by the default issue pattern
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,

    /// Pre-resolved issue keys; when empty they are extracted from the event
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,

    /// Explicit issue pattern overriding the key-based default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_pattern: Option<String>,

    /// Workflow transition applied to every issue of the main project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_id: Option<String>,

    /// Release version; enables the release phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Create the JIRA version unreleased
    #[serde(default)]
    pub draft: bool,

    /// Description stored on the JIRA version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ActionConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self {
            app: String::new(),
            host: String::new(),
            email: None,
            api_token: String::new(),
            project_key: String::new(),
            keys: Vec::new(),
            issues: Vec::new(),
            issue_pattern: None,
            transition_id: None,
            version: None,
            draft: false,
            description: None,
        }
    }

    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(JiraLinkError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::debug!(path = %path.display(), "Loading JiraLink configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        Ok(config)
    }

    /// Issue pattern used when no explicit issue list is configured
    ///
    /// Defaults to an alternation of the main project key and the extra keys,
    /// e.g. `(PROJ|OPS)-[0-9]+`. Digits are ASCII only.
    pub fn pattern(&self) -> String {
        if let Some(ref pattern) = self.issue_pattern {
            return pattern.clone();
        }

        let keys: Vec<String> = std::iter::once(&self.project_key)
            .chain(self.keys.iter())
            .filter(|k| !k.is_empty())
            .map(|k| regex::escape(k))
            .collect();
        format!("({})-[0-9]+", keys.join("|"))
    }

    /// Copy of the configuration that is safe to log
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if !config.api_token.is_empty() {
            config.api_token = "***".to_string();
        }
        config
    }
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw action inputs from flags or `INPUT_*` environment variables
///
/// GitHub Actions exports every declared input, so unset inputs arrive as
/// empty strings; those leave the configuration untouched.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ActionInputs {
    /// Application name
    #[arg(long, env = "INPUT_APP")]
    pub app: Option<String>,

    /// JIRA host URL
    #[arg(long, env = "INPUT_HOST")]
    pub host: Option<String>,

    /// JIRA account email
    #[arg(long, env = "INPUT_EMAIL")]
    pub email: Option<String>,

    /// JIRA API token
    #[arg(long, env = "INPUT_APITOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Main JIRA project key
    #[arg(long, env = "INPUT_PROJECTKEY")]
    pub project_key: Option<String>,

    /// Extra project keys (comma-separated)
    #[arg(long, env = "INPUT_KEYS", value_delimiter = ',')]
    pub keys: Vec<String>,

    /// JSON array of issue keys, e.g. '["PROJ-1"]'
    #[arg(long, env = "INPUT_ISSUES")]
    pub issues: Option<String>,

    /// Regular expression matching issue keys
    #[arg(long, env = "INPUT_ISSUEPATTERN")]
    pub issue_pattern: Option<String>,

    /// Transition id applied to main project issues
    #[arg(long, env = "INPUT_TRANSITIONID")]
    pub transition_id: Option<String>,

    /// Release version
    #[arg(long, env = "INPUT_VERSION")]
    pub version: Option<String>,

    /// Create the version unreleased (true/false)
    #[arg(long, env = "INPUT_DRAFT")]
    pub draft: Option<String>,

    /// Version description
    #[arg(long, env = "INPUT_DESCRIPTION")]
    pub description: Option<String>,
}

impl ActionInputs {
    /// Override configuration values with every non-empty input
    pub fn apply_to(self, config: &mut ActionConfig) -> Result<()> {
        if let Some(app) = non_empty(self.app) {
            config.app = app;
        }
        if let Some(host) = non_empty(self.host) {
            config.host = host;
        }
        if let Some(email) = non_empty(self.email) {
            config.email = Some(email);
        }
        if let Some(token) = non_empty(self.api_token) {
            config.api_token = token;
        }
        if let Some(project_key) = non_empty(self.project_key) {
            config.project_key = project_key;
        }

        let keys: Vec<String> = self
            .keys
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if !keys.is_empty() {
            config.keys = keys;
        }

        if let Some(issues) = non_empty(self.issues) {
            config.issues = parse_issue_list(&issues)?;
        }
        if let Some(pattern) = non_empty(self.issue_pattern) {
            config.issue_pattern = Some(pattern);
        }
        if let Some(transition_id) = non_empty(self.transition_id) {
            config.transition_id = Some(transition_id);
        }
        if let Some(version) = non_empty(self.version) {
            config.version = Some(version);
        }
        if let Some(draft) = non_empty(self.draft) {
            config.draft = parse_bool_input("draft", &draft)?;
        }
        if let Some(description) = non_empty(self.description) {
            config.description = Some(description);
        }

        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse the `issues` input, a JSON array of issue keys
pub fn parse_issue_list(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| JiraLinkError::Config(format!("Invalid issues input '{}': {}", raw, e)))
}

/// Parse a boolean input the way GitHub Actions does (YAML 1.2 core schema)
pub fn parse_bool_input(name: &str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "true" | "True" | "TRUE" => Ok(true),
        "false" | "False" | "FALSE" => Ok(false),
        other => Err(JiraLinkError::Config(format!(
            "Input '{}' must be one of true/True/TRUE/false/False/FALSE, got '{}'",
            name, other
        ))),
    }
}
