//! Logical operator joining the children of a criterion.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Combinator applied to a node's children (not to the node itself).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Operator {
    #[default]
    And,
    Or,
}

impl Operator {
    /// Normalize a raw operator label.
    ///
    /// Only the exact labels `"AND"` and `"OR"` are recognized; anything else,
    /// including a missing label, falls back to [`Operator::And`].
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some("AND") => Operator::And,
            Some("OR") => Operator::Or,
            _ => Operator::default(),
        }
    }

    /// The opposite operator.
    pub fn toggled(self) -> Self {
        match self {
            Operator::And => Operator::Or,
            Operator::Or => Operator::And,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Operator {
    fn from(raw: String) -> Self {
        Operator::normalize(Some(raw.as_str()))
    }
}

impl From<Operator> for &'static str {
    fn from(op: Operator) -> Self {
        op.as_str()
    }
}
