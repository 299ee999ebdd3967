use tracing::{debug, instrument};

use crate::domain::criterion::Criterion;
use crate::domain::error::{CriterionError, CriterionResult};
use crate::domain::operator::Operator;
use crate::domain::path::{self, DELIMITER};
use crate::domain::policy::{DuplicatePolicy, RemovalMode, TreePolicy};

/// A criteria hierarchy addressed by colon-delimited paths.
///
/// The root is created by the caller; every path passed to the mutating
/// operations starts with the root's own value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionTree {
    root: Criterion,
    policy: TreePolicy,
}

impl CriterionTree {
    pub fn new(root: Criterion) -> Self {
        Self::with_policy(root, TreePolicy::default())
    }

    pub fn with_policy(root: Criterion, policy: TreePolicy) -> Self {
        Self { root, policy }
    }

    pub fn root(&self) -> &Criterion {
        &self.root
    }

    pub fn into_root(self) -> Criterion {
        self.root
    }

    pub fn policy(&self) -> TreePolicy {
        self.policy
    }

    pub fn locate(&self, path: &str) -> CriterionResult<&Criterion> {
        path::locate_node(&self.root, path)
    }

    pub fn locate_stack(&self, path: &str) -> Vec<&Criterion> {
        path::locate_stack(&self.root, path)
    }

    fn node_mut(&mut self, positions: &[usize], path: &str) -> CriterionResult<&mut Criterion> {
        path::node_at_mut(&mut self.root, positions).ok_or_else(|| CriterionError::NoSuchCriterion {
            path: path.to_string(),
        })
    }

    /// Attach `criterion` (with its subtree) as the last child of the node at `path`.
    #[instrument(level = "debug", skip(self, criterion), fields(value = %criterion.value))]
    pub fn add_criterion(&mut self, path: &str, criterion: Criterion) -> CriterionResult<()> {
        let positions = path::locate_positions(&self.root, path)?;
        let duplicates = self.policy.duplicates;
        let target = self.node_mut(&positions, path)?;

        if duplicates == DuplicatePolicy::Reject && target.child(&criterion.value).is_some() {
            debug!("Rejecting duplicate sibling value");
            return Err(CriterionError::DuplicateCriterion {
                path: path.to_string(),
                value: criterion.value,
            });
        }

        target.add_criterion(criterion)?;
        debug!("Attached under {}", path);
        Ok(())
    }

    /// Detach the node at `path` together with its subtree.
    ///
    /// Under [`RemovalMode::AllMatching`] every sibling sharing the last segment's
    /// value goes as well. Returns the number of detached children.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_criterion(&mut self, path: &str) -> CriterionResult<usize> {
        let positions = path::locate_positions(&self.root, path)?;
        let Some((&located, parent_positions)) = positions.split_last() else {
            debug!("Refusing to remove the root");
            return Err(CriterionError::NoParent {
                path: path.to_string(),
            });
        };

        let removal = self.policy.removal;
        let parent = self.node_mut(parent_positions, path)?;
        let before = parent.children.len();
        match removal {
            RemovalMode::AllMatching => {
                let value = path::searched_criterion(path);
                parent.children.retain(|c| c.value != value);
            }
            RemovalMode::Located => {
                parent.children.remove(located);
            }
        }
        let removed = before - parent.children.len();
        debug!(removed, "Detached from {}", parent.value);
        Ok(removed)
    }

    /// Flip the operator of the node at `path` between `AND` and `OR`.
    ///
    /// Returns the new operator.
    #[instrument(level = "debug", skip(self))]
    pub fn toggle_operator(&mut self, path: &str) -> CriterionResult<Operator> {
        let positions = path::locate_positions(&self.root, path)?;
        let node = self.node_mut(&positions, path)?;
        node.operator = node.operator.toggled();
        debug!(operator = %node.operator, "Toggled");
        Ok(node.operator)
    }

    /// Number of levels, the root counting as one.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        Self::calculate_depth(&self.root)
    }

    fn calculate_depth(node: &Criterion) -> usize {
        1 + node
            .children
            .iter()
            .map(Self::calculate_depth)
            .max()
            .unwrap_or(0)
    }

    /// Resolved paths of all leaf nodes, in traversal order.
    ///
    /// A tree holding only its root yields the root's path.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_paths(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(path, _)| path)
            .collect()
    }

    /// Pre-order walk yielding each node with its resolved path.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(&self.root)
    }
}

pub struct TreeIterator<'a> {
    stack: Vec<(String, &'a Criterion)>,
}

impl<'a> TreeIterator<'a> {
    fn new(root: &'a Criterion) -> Self {
        Self {
            stack: vec![(root.value.clone(), root)],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (String, &'a Criterion);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        for child in node.children.iter().rev() {
            self.stack
                .push((format!("{}{}{}", path, DELIMITER, child.value), child));
        }
        Some((path, node))
    }
}
