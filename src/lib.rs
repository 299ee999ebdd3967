//! Hierarchical boolean criteria.
//!
//! A [`CriterionTree`] is a tree of named criteria whose children are joined by
//! `AND`/`OR`. Nodes are addressed by colon-delimited paths of their values,
//! root first (`People:Ethinicity:Hispanic`).
//!
//! ```
//! use critree::{Criterion, CriterionTree, CriterionError, Operator};
//!
//! let mut tree = CriterionTree::new(Criterion::new("People"));
//! tree.add_criterion("People", Criterion::new("Age").splitable(false))?;
//! tree.add_criterion("People:Age", Criterion::new("40+"))?;
//!
//! let err = tree.add_criterion("People:Age", Criterion::new("20-30")).unwrap_err();
//! assert!(matches!(err, CriterionError::NotSplitable { .. }));
//!
//! assert_eq!(tree.toggle_operator("People")?, Operator::Or);
//! # Ok::<(), CriterionError>(())
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod tree_traits;
pub mod util;

pub use domain::{
    locate_node, locate_stack, resolve_path, searched_criterion, Criterion, CriterionError,
    CriterionResult, CriterionTree, DuplicatePolicy, Operator, RemovalMode, TreePolicy,
};
pub use errors::{CritreeError, CritreeResult};
