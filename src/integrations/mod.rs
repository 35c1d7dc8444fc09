//! External Integrations
//!
//! The issue tracker seam and its JIRA implementation.
//!
//! # Overview
//!
//! [`Tracker`] lists the eight JIRA operations the synchronizer relies on.
//! [`JiraClient`] implements them over the REST API; tests substitute an
//! in-memory tracker.

pub mod jira;
pub mod tracker;

pub use jira::JiraClient;
pub use tracker::{
    AddOperation, Component, ComponentRequest, EntityRef, IssueUpdate, IssueUpdateFields, Page,
    Project, Tracker, TransitionRef, TransitionRequest, Version, VersionRequest,
};
