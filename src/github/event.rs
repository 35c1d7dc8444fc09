//! GitHub event payloads
//!
//! Only the parts of the webhook payloads that can mention issue keys are
//! kept: pull request title and body, push commit messages, release notes.

use crate::{JiraLinkError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Event that triggered the workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    PullRequest { title: String, body: String },
    Push { messages: Vec<String> },
    Release { body: String },
    /// Any other event; carries no searchable text
    Unsupported { name: String },
}

#[derive(Debug, Deserialize)]
struct PullRequestEvent {
    pull_request: PullRequest,
}

#[derive(Debug, Deserialize)]
struct PullRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PushEvent {
    #[serde(default)]
    commits: Vec<Commit>,
}

#[derive(Debug, Deserialize)]
struct Commit {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReleaseEvent {
    release: Release,
}

#[derive(Debug, Deserialize)]
struct Release {
    #[serde(default)]
    body: Option<String>,
}

impl EventPayload {
    /// Build a payload from an event name and its raw webhook JSON
    ///
    /// Null titles, bodies and messages are read as empty text.
    pub fn from_json(name: &str, payload: &Value) -> Result<Self> {
        let event = match name {
            "pull_request" => {
                let event: PullRequestEvent = parse(name, payload)?;
                EventPayload::PullRequest {
                    title: event.pull_request.title.unwrap_or_default(),
                    body: event.pull_request.body.unwrap_or_default(),
                }
            }
            "push" => {
                let event: PushEvent = parse(name, payload)?;
                EventPayload::Push {
                    messages: event
                        .commits
                        .into_iter()
                        .map(|c| c.message.unwrap_or_default())
                        .collect(),
                }
            }
            "release" => {
                let event: ReleaseEvent = parse(name, payload)?;
                EventPayload::Release {
                    body: event.release.body.unwrap_or_default(),
                }
            }
            other => EventPayload::Unsupported {
                name: other.to_string(),
            },
        };
        Ok(event)
    }

    /// Load the event from a webhook payload file
    pub fn load(name: &str, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            JiraLinkError::Event(format!(
                "Failed to read event payload {}: {}",
                path.display(),
                e
            ))
        })?;
        let payload: Value = serde_json::from_str(&content)?;
        Self::from_json(name, &payload)
    }

    /// Event name as GitHub reports it
    pub fn name(&self) -> &str {
        match self {
            EventPayload::PullRequest { .. } => "pull_request",
            EventPayload::Push { .. } => "push",
            EventPayload::Release { .. } => "release",
            EventPayload::Unsupported { name } => name,
        }
    }

    /// Text searched for issue keys, `None` for unsupported events
    ///
    /// Pull requests join title and body with a newline; pushes prefix every
    /// commit message with a newline; releases use the body verbatim.
    pub fn search_text(&self) -> Option<String> {
        match self {
            EventPayload::PullRequest { title, body } => Some(format!("{}\n{}", title, body)),
            EventPayload::Push { messages } => Some(
                messages
                    .iter()
                    .fold(String::new(), |text, message| text + "\n" + message),
            ),
            EventPayload::Release { body } => Some(body.clone()),
            EventPayload::Unsupported { .. } => None,
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(name: &str, payload: &Value) -> Result<T> {
    debug!(event = %name, payload = %payload, "Found event payload");
    T::deserialize(payload)
        .map_err(|e| JiraLinkError::Event(format!("Malformed {} payload: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_pull_request_text() {
        let event = EventPayload::from_json(
            "pull_request",
            &json!({"pull_request": {"title": "My PR", "body": "Body", "number": 3}}),
        )
        .unwrap();
        assert_eq!(event.name(), "pull_request");
        assert_eq!(event.search_text().as_deref(), Some("My PR\nBody"));
    }

    #[test]
    fn test_pull_request_null_body() {
        let event = EventPayload::from_json(
            "pull_request",
            &json!({"pull_request": {"title": "My PR", "body": null}}),
        )
        .unwrap();
        assert_eq!(event.search_text().as_deref(), Some("My PR\n"));
    }

    #[test]
    fn test_push_text_prefixes_each_message() {
        let event = EventPayload::from_json(
            "push",
            &json!({"commits": [{"message": "first"}, {"message": "second"}]}),
        )
        .unwrap();
        assert_eq!(event.search_text().as_deref(), Some("\nfirst\nsecond"));
    }

    #[test]
    fn test_push_without_commits() {
        let event = EventPayload::from_json("push", &json!({"commits": []})).unwrap();
        assert_eq!(event.search_text().as_deref(), Some(""));
    }

    #[test]
    fn test_release_text() {
        let event =
            EventPayload::from_json("release", &json!({"release": {"body": "notes"}})).unwrap();
        assert_eq!(event.search_text().as_deref(), Some("notes"));
    }

    #[test]
    fn test_unknown_event_has_no_text() {
        let event = EventPayload::from_json("workflow_dispatch", &json!({"inputs": {}})).unwrap();
        assert_eq!(
            event,
            EventPayload::Unsupported {
                name: "workflow_dispatch".to_string()
            }
        );
        assert_eq!(event.search_text(), None);
    }

    #[test]
    fn test_malformed_payload() {
        let result = EventPayload::from_json("release", &json!({"action": "published"}));
        assert!(matches!(result, Err(JiraLinkError::Event(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"release": {{"body": "PROJ-1"}}}}"#).unwrap();
        let event = EventPayload::load("release", file.path()).unwrap();
        assert_eq!(
            event,
            EventPayload::Release {
                body: "PROJ-1".to_string()
            }
        );
    }
}
