//! Issue key extraction
//!
//! Finds issue keys mentioned in the text of a GitHub event.

use super::event::EventPayload;
use crate::Result;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Compiled issue key pattern
///
/// Matching is case-insensitive and multi-line over the whole event text.
#[derive(Debug, Clone)]
pub struct IssuePattern {
    regex: Regex,
}

impl IssuePattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Strip every character outside `[0-9A-Za-z-]`
pub fn sanitize_issue_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

/// Extract the unique, sanitized issue keys referenced by an event
///
/// Keys keep the order of their first match. Unsupported events yield no keys.
pub fn extract(event: &EventPayload, pattern: &IssuePattern) -> Vec<String> {
    let Some(text) = event.search_text() else {
        warn!(
            event = %event.name(),
            "GitHub event is none of pull_request, push, release. Unable to load JIRA issues."
        );
        return Vec::new();
    };

    let mut raw_seen = HashSet::new();
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    for m in pattern.regex.find_iter(&text) {
        if !raw_seen.insert(m.as_str()) {
            continue;
        }
        let key = sanitize_issue_key(m.as_str());
        // A key whose number was stripped entirely is not a key
        if key.is_empty() || key.ends_with('-') {
            continue;
        }
        // Distinct raw matches like "[PROJ-1]" and "PROJ-1" collapse here
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }

    debug!(event = %event.name(), pattern = %pattern.as_str(), keys = ?keys, "Extracted issue keys");
    keys
}
