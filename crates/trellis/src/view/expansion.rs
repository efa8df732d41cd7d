//! Expansion state for tree views.
//!
//! The [`ExpansionRegistry`] records which paths currently show their
//! children. Membership alone does not make a path's subtree visible: a
//! node's rows appear only when every ancestor is expanded too: *effective*
//! visibility, which is computed by walking ancestors, never stored.
//!
//! Depth-0 paths never enter the registry; whether the root row itself is
//! shown is governed by the owning view's root-visible flag, which is passed
//! into visibility queries.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::model::{TreeModel, TreePath};

/// The set of currently expanded paths.
#[derive(Debug, Default)]
pub struct ExpansionRegistry {
    expanded: HashSet<TreePath>,
}

impl ExpansionRegistry {
    /// Creates a registry with nothing expanded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `path` is marked expanded.
    ///
    /// Always `false` for the root: root expansion is governed by the owning
    /// view's root-visible flag, not membership here.
    pub fn is_expanded(&self, path: &TreePath) -> bool {
        self.expanded.contains(path)
    }

    /// Marks `path` expanded. Returns `true` if the state changed.
    ///
    /// Depth-0 paths are rejected.
    pub fn insert(&mut self, path: TreePath) -> bool {
        if path.is_root() {
            return false;
        }
        self.expanded.insert(path)
    }

    /// Unmarks `path`. Returns `true` if the state changed.
    pub fn remove(&mut self, path: &TreePath) -> bool {
        self.expanded.remove(path)
    }

    /// The number of expanded paths.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Returns `true` if nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Forgets all expansion state.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    /// A snapshot of every expanded path, in batch processing order.
    pub fn expanded_paths(&self) -> Vec<TreePath> {
        let mut paths: Vec<TreePath> = self.expanded.iter().cloned().collect();
        paths.sort_by(batch_order);
        paths
    }

    /// Filters `paths` down to those an expand batch would actually change
    /// (depth > 0 and not yet expanded), ordered for processing.
    pub fn expand_candidates(&self, paths: impl IntoIterator<Item = TreePath>) -> Vec<TreePath> {
        let mut candidates: Vec<TreePath> = paths
            .into_iter()
            .filter(|path| path.depth() > 0 && !self.is_expanded(path))
            .collect();
        candidates.sort_by(batch_order);
        candidates.dedup();
        candidates
    }

    /// Filters `paths` down to those a collapse batch would actually change
    /// (depth > 0 and currently expanded), ordered for processing.
    pub fn collapse_candidates(&self, paths: impl IntoIterator<Item = TreePath>) -> Vec<TreePath> {
        let mut candidates: Vec<TreePath> = paths
            .into_iter()
            .filter(|path| path.depth() > 0 && self.is_expanded(path))
            .collect();
        candidates.sort_by(batch_order);
        candidates.dedup();
        candidates
    }

    /// Whether the node at `path` currently has a row at all: the root when
    /// root-visible, any depth-1 node, or a deeper node whose ancestors are
    /// all expanded.
    ///
    /// Short-circuits to `false` at the first collapsed ancestor.
    pub fn is_effectively_visible(&self, path: &TreePath, root_visible: bool) -> bool {
        if path.is_root() {
            return root_visible;
        }
        let mut ancestor = path.parent();
        while let Some(p) = ancestor {
            if p.is_root() {
                break;
            }
            if !self.is_expanded(&p) {
                return false;
            }
            ancestor = p.parent();
        }
        true
    }
}

/// The ordering used for structural batches: document order, with
/// prefix-related paths processed deepest-first.
///
/// Marking a deep target before its still-collapsed ancestor is cheap (it is
/// not yet visible), and the shallower operation then accounts for the whole
/// revealed or hidden subtree at once, keeping row-count deltas correct.
fn batch_order(a: &TreePath, b: &TreePath) -> Ordering {
    TreePath::cmp_document_order(a, b).then_with(|| b.depth().cmp(&a.depth()))
}

/// Computes the maximal expansion set for `model`: every non-leaf path below
/// the root, discovered by a full pre-order traversal. Leaves are skipped;
/// expanding a leaf can never reveal rows.
pub fn maximal_expansion<T: Clone, M: TreeModel<T> + ?Sized>(model: &M) -> HashSet<TreePath> {
    let mut result = HashSet::new();
    if model.is_empty() {
        return result;
    }

    let mut stack = vec![TreePath::root()];
    while let Some(path) = stack.pop() {
        for i in 0..model.num_children(&path) {
            let child = path.child(i);
            if !model.is_leaf(&child) {
                result.insert(child.clone());
                stack.push(child);
            }
        }
    }
    result
}
