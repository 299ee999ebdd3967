//! Tree policies for duplicate sibling values and removal.

use serde::{Deserialize, Serialize};

/// How an insert treats a child whose value already exists among the target's children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Accept silently; lookups resolve to the first match in sibling order
    #[default]
    Allow,
    /// Fail with `DuplicateCriterion`
    Reject,
}

/// Which siblings a remove-by-path detaches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalMode {
    /// Every child of the parent whose value equals the last path segment
    #[default]
    AllMatching,
    /// Only the child the traversal located
    Located,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreePolicy {
    pub duplicates: DuplicatePolicy,
    pub removal: RemovalMode,
}
