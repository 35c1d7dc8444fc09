//! Configuration validation
//!
//! Validates the action configuration before any JIRA call is made:
//! - Required inputs are present
//! - The host is an http(s) URL
//! - Transition id and version are not blank

use super::action_config::ActionConfig;
use crate::JiraLinkError;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate an action configuration
pub fn validate_config(config: &ActionConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.app.trim().is_empty() {
        errors.push(ValidationError::new("app", "Application name cannot be empty"));
    }

    if !config.host.starts_with("http://") && !config.host.starts_with("https://") {
        errors.push(ValidationError::new(
            "host",
            format!("Invalid JIRA URL: {}", config.host),
        ));
    }

    if config.api_token.is_empty() {
        errors.push(ValidationError::new("api_token", "JIRA API token is required"));
    }

    if config.project_key.trim().is_empty() {
        errors.push(ValidationError::new(
            "project_key",
            "JIRA project key cannot be empty",
        ));
    }

    if let Some(ref transition_id) = config.transition_id {
        if transition_id.trim().is_empty() {
            errors.push(ValidationError::new(
                "transition_id",
                "Transition id cannot be blank",
            ));
        }
    }

    if let Some(ref version) = config.version {
        let stripped = version.strip_prefix('v').unwrap_or(version);
        if stripped.trim().is_empty() {
            errors.push(ValidationError::new(
                "version",
                format!("Version '{}' is empty once the 'v' prefix is removed", version),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate and convert errors to a single JiraLinkError
pub fn validate_config_result(config: &ActionConfig) -> crate::Result<()> {
    validate_config(config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        JiraLinkError::Config(format!(
            "Configuration validation failed:\n  {}",
            messages.join("\n  ")
        ))
    })
}
