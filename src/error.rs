//! Error types for JiraLink
//!
//! Every failure in a run is fatal, so a single enum covers configuration,
//! event loading and tracker failures. Uses thiserror for ergonomic error handling.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Result type alias for JiraLink operations
pub type Result<T> = std::result::Result<T, JiraLinkError>;

/// Structured error payload returned by the JIRA REST API
///
/// JIRA answers failed requests with `{"errorMessages": [...], "errors": {...}}`.
/// Either part may be missing. An `errorMessages` that is not a list is
/// ignored without losing `errors`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrackerErrorBody {
    #[serde(
        rename = "errorMessages",
        default,
        deserialize_with = "deserialize_error_messages"
    )]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: Option<Value>,
}

fn deserialize_error_messages<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let messages = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(message) => message,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(messages)
}

impl TrackerErrorBody {
    /// True when the payload carries nothing worth reporting
    pub fn is_empty(&self) -> bool {
        self.error_messages.is_empty() && self.errors.is_none()
    }
}

/// Error type for JiraLink operations
#[derive(Error, Debug)]
pub enum JiraLinkError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// GitHub event loading errors
    #[error("Event error: {0}")]
    Event(String),

    /// Invalid issue pattern
    #[error("Invalid issue pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors (connection, timeout, decoding)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JIRA answered with a non-success status
    #[error("{message}")]
    Tracker {
        message: String,
        body: Option<TrackerErrorBody>,
    },
}

impl JiraLinkError {
    pub fn tracker(message: impl Into<String>, body: Option<TrackerErrorBody>) -> Self {
        JiraLinkError::Tracker {
            message: message.into(),
            body,
        }
    }

    /// Structured payload of a tracker failure, if the response carried one
    pub fn error_body(&self) -> Option<&TrackerErrorBody> {
        match self {
            JiraLinkError::Tracker { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_deserialization() {
        let body: TrackerErrorBody = serde_json::from_str(
            r#"{"errorMessages":["Issue does not exist"],"errors":{"fixVersions":"bad"}}"#,
        )
        .unwrap();
        assert_eq!(body.error_messages, vec!["Issue does not exist"]);
        assert_eq!(
            body.errors,
            Some(serde_json::json!({"fixVersions": "bad"}))
        );
    }

    #[test]
    fn test_non_list_error_messages_keep_errors() {
        let body: TrackerErrorBody = serde_json::from_str(
            r#"{"errorMessages":"Issue does not exist","errors":{"components":"bad"}}"#,
        )
        .unwrap();
        assert!(body.error_messages.is_empty());
        assert_eq!(body.errors, Some(serde_json::json!({"components": "bad"})));
        assert!(!body.is_empty());

        let body: TrackerErrorBody =
            serde_json::from_str(r#"{"errorMessages":null,"errors":{}}"#).unwrap();
        assert!(body.error_messages.is_empty());
        assert_eq!(body.errors, Some(serde_json::json!({})));
    }

    #[test]
    fn test_empty_error_body() {
        let body: TrackerErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_tracker_error_display_is_message() {
        let err = JiraLinkError::tracker("Generic message", None);
        assert_eq!(err.to_string(), "Generic message");
        assert!(err.error_body().is_none());
    }

    #[test]
    fn test_error_body_only_on_tracker_errors() {
        let err = JiraLinkError::Config("missing app".to_string());
        assert!(err.error_body().is_none());
        assert_eq!(err.to_string(), "Configuration error: missing app");
    }
}
