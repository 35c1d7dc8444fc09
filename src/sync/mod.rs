//! JIRA synchronization
//!
//! Two sequential phases over the same issue list:
//!
//! 1. **Release** ([`release_issues`]): upsert the `{app}/{version}` version and
//!    add it to every issue's fix versions. Only runs when a version is given.
//! 2. **Update** ([`update_issues`]): upsert the `{app}` component, add it to the
//!    main project's issues and optionally transition them.
//!
//! Calls are issued one at a time, in issue order. The first failure aborts
//! the run without rolling back earlier edits.

pub mod release;
pub mod update;

#[cfg(test)]
pub(crate) mod mock;

pub use release::{release_issues, version_name, ReleaseSummary};
pub use update::{update_issues, UpdateSummary};
