//! Configuration system
//!
//! Resolves the action configuration from:
//! - An optional YAML file (`--config`)
//! - GitHub Actions inputs (`INPUT_*` environment variables)
//! - Command-line flags

mod action_config;
pub mod validation;

pub use action_config::{parse_bool_input, parse_issue_list, ActionConfig, ActionInputs};
pub use validation::{validate_config, validate_config_result, ValidationError};
