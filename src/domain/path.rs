//! Path primitives over a criteria tree.
//!
//! A path is the sequence of node values from the root to a target, joined by
//! [`DELIMITER`], root first: `People:Ethinicity:Hispanic`.
//!
//! Lookup is a depth-first, prefix-matching traversal: a candidate stack is kept
//! only while its resolved path is a prefix of the target (on segment boundaries),
//! and children are explored in sibling order. A branch that dead-ends is taken
//! off the stack before its next sibling is tried, and the search stops at the
//! first full match, so with duplicate sibling values the first match wins.

use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::domain::criterion::Criterion;
use crate::domain::error::{CriterionError, CriterionResult};

pub const DELIMITER: &str = ":";

/// Split a path into its segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split(DELIMITER).collect()
}

/// Final segment of a path: the value of the criterion being searched for.
pub fn searched_criterion(path: &str) -> &str {
    path.rsplit(DELIMITER).next().unwrap_or(path)
}

/// Join the values of a root-to-target node sequence into a path.
pub fn resolve_path(stack: &[&Criterion]) -> String {
    stack.iter().map(|c| c.value.as_str()).join(DELIMITER)
}

/// `resolved` equals `path` or is followed in `path` by a delimiter.
fn is_path_prefix(resolved: &str, path: &str) -> bool {
    match path.strip_prefix(resolved) {
        Some("") => true,
        Some(rest) => rest.starts_with(DELIMITER),
        None => false,
    }
}

fn ensure_not_empty(path: &str) -> CriterionResult<()> {
    if path.is_empty() {
        return Err(CriterionError::InvalidPath {
            path: path.to_string(),
            reason: "path is empty".to_string(),
        });
    }
    Ok(())
}

/// Nodes visited on the way to a target plus their child positions.
///
/// `positions[i]` is the index of `nodes[i + 1]` within `nodes[i].children`.
#[derive(Debug, Clone, Default)]
pub(crate) struct Descent<'a> {
    pub nodes: Vec<&'a Criterion>,
    pub positions: Vec<usize>,
    /// `nodes` resolves to the full target path
    pub found: bool,
}

/// Depth-first search state: the stack under test and the deepest partial match.
struct Walk<'a, 'p> {
    path: &'p str,
    current: Descent<'a>,
    deepest: Descent<'a>,
}

impl<'a> Walk<'a, '_> {
    fn visit(&mut self, node: &'a Criterion, position: Option<usize>) -> bool {
        self.current.nodes.push(node);
        if let Some(p) = position {
            self.current.positions.push(p);
        }

        let resolved = resolve_path(&self.current.nodes);
        if !is_path_prefix(&resolved, self.path) {
            trace!(%resolved, "Diverged");
            self.retreat();
            return false;
        }
        if self.current.nodes.len() > self.deepest.nodes.len() {
            self.deepest = self.current.clone();
        }
        if resolved == self.path {
            trace!(%resolved, "Found");
            return true;
        }
        for (i, child) in node.children.iter().enumerate() {
            if self.visit(child, Some(i)) {
                return true;
            }
        }
        trace!(%resolved, "Dead end");
        self.retreat();
        false
    }

    /// Drop the top node; positions always hold one entry less than nodes.
    fn retreat(&mut self) {
        self.current.nodes.pop();
        let depth = self.current.nodes.len().saturating_sub(1);
        self.current.positions.truncate(depth);
    }
}

/// Full descent to `path` if it resolves, else the deepest partial match
/// (first one in traversal order among equally deep candidates).
fn descend<'a>(root: &'a Criterion, path: &str) -> Descent<'a> {
    let mut walk = Walk {
        path,
        current: Descent::default(),
        deepest: Descent::default(),
    };
    if walk.visit(root, None) {
        walk.current.found = true;
        walk.current
    } else {
        walk.deepest
    }
}

/// Root-to-target node sequence for `path`.
///
/// If `path` does not fully resolve, the returned stack is the deepest chain of
/// nodes matching the leading segments, so it resolves to a strict prefix of
/// `path`; it is empty when even the root's value differs from the first segment.
#[instrument(level = "trace", skip(root))]
pub fn locate_stack<'a>(root: &'a Criterion, path: &str) -> Vec<&'a Criterion> {
    descend(root, path).nodes
}

/// Descent that fully resolves `path`, or `NoSuchCriterion`.
fn resolved_descent<'a>(root: &'a Criterion, path: &str) -> CriterionResult<Descent<'a>> {
    ensure_not_empty(path)?;
    let descent = descend(root, path);
    if !descent.found {
        debug!(
            resolved = %resolve_path(&descent.nodes),
            "Path did not resolve to {}",
            searched_criterion(path)
        );
        return Err(CriterionError::NoSuchCriterion {
            path: path.to_string(),
        });
    }
    Ok(descent)
}

/// The node addressed by `path`.
#[instrument(level = "trace", skip(root))]
pub fn locate_node<'a>(root: &'a Criterion, path: &str) -> CriterionResult<&'a Criterion> {
    resolved_descent(root, path)?
        .nodes
        .last()
        .copied()
        .ok_or_else(|| CriterionError::NoSuchCriterion {
            path: path.to_string(),
        })
}

/// Child positions leading from `root` to the node addressed by `path`.
///
/// An empty vector addresses the root itself.
pub(crate) fn locate_positions(root: &Criterion, path: &str) -> CriterionResult<Vec<usize>> {
    Ok(resolved_descent(root, path)?.positions)
}

/// Follow child positions from `root`, mutably.
pub(crate) fn node_at_mut<'a>(root: &'a mut Criterion, positions: &[usize]) -> Option<&'a mut Criterion> {
    positions
        .iter()
        .try_fold(root, |node, &i| node.children.get_mut(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Criterion {
        let mut root = Criterion::new("People");
        let mut age = Criterion::new("Age").splitable(false);
        age.add_criterion(Criterion::new("40+")).unwrap();
        let mut eth = Criterion::new("Ethinicity");
        eth.add_criterion(Criterion::new("Black")).unwrap();
        eth.add_criterion(Criterion::new("Hispanic")).unwrap();
        root.add_criterion(age).unwrap();
        root.add_criterion(eth).unwrap();
        root
    }

    #[test]
    fn given_path_when_splitting_then_yields_segments_and_last() {
        assert_eq!(segments("People:Age:40+"), vec!["People", "Age", "40+"]);
        assert_eq!(searched_criterion("People:Age:40+"), "40+");
        assert_eq!(searched_criterion("People"), "People");
    }

    #[test]
    fn given_stack_when_resolving_then_joins_values_root_first() {
        let a = Criterion::new("People");
        let b = Criterion::new("Age");
        assert_eq!(resolve_path(&[&a, &b]), "People:Age");
        assert_eq!(resolve_path(&[&a]), "People");
        assert_eq!(resolve_path(&[]), "");
    }

    #[test]
    fn given_prefix_candidates_when_testing_prefix_then_only_segment_boundaries_match() {
        assert!(is_path_prefix("People", "People"));
        assert!(is_path_prefix("People", "People:Age"));
        assert!(!is_path_prefix("People:Ag", "People:Age"));
        assert!(!is_path_prefix("People:Age:40+", "People:Age"));
    }

    #[test]
    fn given_existing_path_when_locating_stack_then_resolves_to_path() {
        let root = people();
        let stack = locate_stack(&root, "People:Ethinicity:Hispanic");
        assert_eq!(resolve_path(&stack), "People:Ethinicity:Hispanic");
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn given_missing_leaf_when_locating_stack_then_returns_strict_prefix() {
        let root = people();
        let stack = locate_stack(&root, "People:Ethinicity:Asian");
        assert_eq!(resolve_path(&stack), "People:Ethinicity");
    }

    #[test]
    fn given_foreign_root_when_locating_stack_then_empty() {
        let root = people();
        assert!(locate_stack(&root, "Animals:Age").is_empty());
    }

    #[test]
    fn given_string_prefix_sibling_when_locating_then_skips_it() {
        let mut root = Criterion::new("People");
        root.add_criterion(Criterion::new("Ag")).unwrap();
        root.add_criterion(Criterion::new("Age")).unwrap();

        let node = locate_node(&root, "People:Age").unwrap();
        assert_eq!(node.value, "Age");
        assert_eq!(locate_positions(&root, "People:Age").unwrap(), vec![1]);
    }

    #[test]
    fn given_repeated_segment_when_path_is_deeper_then_no_such_criterion() {
        let mut root = Criterion::new("A");
        root.add_criterion(Criterion::new("B")).unwrap();
        assert!(matches!(
            locate_node(&root, "A:B:B"),
            Err(CriterionError::NoSuchCriterion { .. })
        ));
    }

    /// A
    /// ├── B
    /// │   ├── X
    /// │   └── Y
    /// └── C
    fn dead_end_then_sibling() -> Criterion {
        let mut b = Criterion::new("B");
        b.add_criterion(Criterion::new("X")).unwrap();
        b.add_criterion(Criterion::new("Y")).unwrap();
        let mut root = Criterion::new("A");
        root.add_criterion(b).unwrap();
        root.add_criterion(Criterion::new("C")).unwrap();
        root
    }

    #[test]
    fn given_dead_end_followed_by_matching_sibling_when_locating_then_no_such_criterion() {
        let root = dead_end_then_sibling();

        let stack = locate_stack(&root, "A:B:C");
        assert_eq!(resolve_path(&stack), "A:B");
        assert!(matches!(
            locate_node(&root, "A:B:C"),
            Err(CriterionError::NoSuchCriterion { .. })
        ));
        assert!(locate_positions(&root, "A:B:C").is_err());
    }

    #[test]
    fn given_dead_end_sibling_when_locating_later_sibling_then_positions_are_exact() {
        let root = dead_end_then_sibling();
        assert_eq!(locate_positions(&root, "A:C").unwrap(), vec![1]);
        assert_eq!(locate_positions(&root, "A:B:Y").unwrap(), vec![0, 1]);
    }

    #[test]
    fn given_empty_path_when_locating_then_invalid_path() {
        let root = people();
        assert!(matches!(
            locate_node(&root, ""),
            Err(CriterionError::InvalidPath { .. })
        ));
    }

    #[test]
    fn given_positions_when_walking_mutably_then_reaches_node() {
        let mut root = people();
        let node = node_at_mut(&mut root, &[1, 0]).unwrap();
        assert_eq!(node.value, "Black");
        assert!(node_at_mut(&mut root, &[5]).is_none());
    }
}
