//! Domain layer: the criteria tree and its path-addressing engine
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod criterion;
pub mod error;
pub mod operator;
pub mod path;
pub mod policy;
pub mod tree;

pub use criterion::{normalize_splitable, Criterion};
pub use error::{CriterionError, CriterionResult};
pub use operator::Operator;
pub use path::{locate_node, locate_stack, resolve_path, searched_criterion, segments, DELIMITER};
pub use policy::{DuplicatePolicy, RemovalMode, TreePolicy};
pub use tree::{CriterionTree, TreeIterator};
