//! Diagnostic rendering of criteria trees with `termtree`.

use termtree::Tree;
use tracing::instrument;

use crate::domain::{Criterion, CriterionTree};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for Criterion {
    #[instrument(level = "trace", skip(self), fields(value = %self.value))]
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children.iter().map(|c| c.to_tree_string()).collect();
        Tree::new(self.to_string()).with_leaves(leaves)
    }
}

impl TreeNodeConvert for CriterionTree {
    fn to_tree_string(&self) -> Tree<String> {
        self.root().to_tree_string()
    }
}
