use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::error::{CriterionError, CriterionResult};
use crate::domain::operator::Operator;

/// Default applied when no splitability is given.
pub fn normalize_splitable(raw: Option<bool>) -> bool {
    raw.unwrap_or(true)
}

fn default_splitable() -> bool {
    normalize_splitable(None)
}

/// A labeled node of the criteria hierarchy.
///
/// Each node owns its children exclusively; there is no parent back-reference.
/// A node is identified within a path by its `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// Label of this criterion, one path segment
    pub value: String,
    /// Whether this node may hold more than one child
    #[serde(default = "default_splitable")]
    pub splitable: bool,
    /// Combinator for the children of this node
    #[serde(default)]
    pub operator: Operator,
    /// Children in insertion order
    #[serde(default)]
    pub children: Vec<Criterion>,
}

impl Criterion {
    /// Detached, splitable node with the `AND` operator.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            splitable: default_splitable(),
            operator: Operator::default(),
            children: Vec::new(),
        }
    }

    /// Build a node from loosely typed input, applying the normalization rules:
    /// missing splitability becomes `true`, unknown operators become `AND`.
    pub fn from_raw(value: impl Into<String>, splitable: Option<bool>, operator: Option<&str>) -> Self {
        Self {
            value: value.into(),
            splitable: normalize_splitable(splitable),
            operator: Operator::normalize(operator),
            children: Vec::new(),
        }
    }

    pub fn splitable(mut self, splitable: bool) -> Self {
        self.splitable = splitable;
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    /// Whether another child may be attached right now.
    ///
    /// The first child is always accepted; splitability only governs branching
    /// beyond it.
    pub fn accepts_child(&self) -> bool {
        self.splitable || self.children.is_empty()
    }

    /// Append `child` at the end of this node's children.
    #[instrument(level = "debug", skip(self, child), fields(parent = %self.value, value = %child.value))]
    pub fn add_criterion(&mut self, child: Criterion) -> CriterionResult<()> {
        if !self.accepts_child() {
            debug!("Rejecting second child of non-splitable criterion");
            return Err(CriterionError::NotSplitable {
                value: self.value.clone(),
            });
        }
        self.children.push(child);
        Ok(())
    }

    /// First direct child with the given value.
    pub fn child(&self, value: &str) -> Option<&Criterion> {
        self.children.iter().find(|c| c.value == value)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.value, self.operator)
    }
}
