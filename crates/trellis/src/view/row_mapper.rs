//! Row/path mapping for virtualized tree views.
//!
//! The [`RowMapper`] is the bidirectional mapping between the flat row
//! numbers a viewport scrolls over and the tree paths of a hierarchical
//! model. Rows are dense over the currently visible path set, ordered by a
//! pre-order walk that only descends into expanded paths:
//!
//! - [`path_from_row`](RowMapper::path_from_row) walks from the root,
//!   consuming the row number as a budget and descending only into expanded
//!   subtrees;
//! - [`row_from_path`](RowMapper::row_from_path) walks the path's index
//!   chain, accumulating the visible subtree sizes of preceding siblings;
//! - [`rows_below`](RowMapper::rows_below) counts a node's visible subtree.
//!
//! The traversals are pure (budgets and counts are passed and returned
//! explicitly), and both directions are memoized in generation-stamped
//! caches: every structural change (expand, collapse, root-visibility
//! toggle, model change) bumps the mapper's generation, so stale memos are
//! never served. Subtree counts are cached the same way, which keeps
//! `rows_below` linear in the visible subtree for the first query after a
//! structural change and O(1) afterwards.

use std::collections::BTreeSet;

use crate::model::{TreeModel, TreePath};

use super::cache::GenerationCache;
use super::expansion::ExpansionRegistry;

/// Maps between visible row numbers and tree paths.
///
/// The mapper owns the expansion state and the root-visibility flag the
/// mapping is derived from; the model is passed into each query, since it is
/// owned by the caller.
pub struct RowMapper {
    root_visible: bool,
    expansion: ExpansionRegistry,
    num_rows: usize,
    generation: u64,
    row_paths: GenerationCache<usize, TreePath>,
    subtree_rows: GenerationCache<TreePath, usize>,
}

impl Default for RowMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl RowMapper {
    /// Creates a mapper with the root hidden and nothing expanded.
    ///
    /// Call [`structure_changed`](Self::structure_changed) once the model is
    /// known to establish the initial row count.
    pub fn new() -> Self {
        Self {
            root_visible: false,
            expansion: ExpansionRegistry::new(),
            num_rows: 0,
            generation: 0,
            row_paths: GenerationCache::new(),
            subtree_rows: GenerationCache::new(),
        }
    }

    /// The total number of visible rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Whether the root node occupies row 0.
    pub fn root_visible(&self) -> bool {
        self.root_visible
    }

    /// The expansion state the mapping is derived from.
    pub fn expansion(&self) -> &ExpansionRegistry {
        &self.expansion
    }

    /// Returns `true` if `path` is marked expanded.
    pub fn is_expanded(&self, path: &TreePath) -> bool {
        self.expansion.is_expanded(path)
    }

    /// Returns `true` if `path` currently has a row (all ancestors expanded,
    /// or root/depth 1), independent of viewport scrolling.
    pub fn is_visible(&self, path: &TreePath) -> bool {
        self.expansion.is_effectively_visible(path, self.root_visible)
    }

    /// Shows or hides the root row. Returns `true` if the flag changed.
    pub fn set_root_visible<T: Clone, M: TreeModel<T> + ?Sized>(
        &mut self,
        model: &M,
        visible: bool,
    ) -> bool {
        if self.root_visible == visible {
            return false;
        }
        self.root_visible = visible;
        self.structure_changed(model);
        true
    }

    /// Marks `path` expanded or collapsed, refreshing the row count.
    /// Returns `true` if the state changed.
    pub fn set_expanded<T: Clone, M: TreeModel<T> + ?Sized>(
        &mut self,
        model: &M,
        path: TreePath,
        expanded: bool,
    ) -> bool {
        let changed = if expanded {
            self.expansion.insert(path)
        } else {
            self.expansion.remove(&path)
        };
        if changed {
            self.structure_changed(model);
        }
        changed
    }

    /// Invalidates all derived state after a structural change and
    /// recomputes the total row count.
    pub fn structure_changed<T: Clone, M: TreeModel<T> + ?Sized>(&mut self, model: &M) {
        self.generation += 1;
        self.row_paths.purge_stale(self.generation);
        self.subtree_rows.purge_stale(self.generation);

        self.num_rows = if model.is_empty() {
            0
        } else {
            self.rows_below(model, &TreePath::root()) + usize::from(self.root_visible)
        };

        tracing::trace!(
            target: "trellis::row_mapper",
            generation = self.generation,
            num_rows = self.num_rows,
            "structure changed"
        );
    }

    /// The path at visible row `row`, or `None` when `row >= num_rows` or
    /// the model is empty.
    pub fn path_from_row<T: Clone, M: TreeModel<T> + ?Sized>(
        &mut self,
        model: &M,
        row: usize,
    ) -> Option<TreePath> {
        if model.is_empty() || row >= self.num_rows {
            return None;
        }

        if let Some(path) = self.row_paths.get(self.generation, &row) {
            return Some(path.clone());
        }

        // The budget counts rows still to be consumed, including the target
        // itself; a visible root occupies row 0 without consuming budget.
        let budget = row + usize::from(!self.root_visible);
        let (path, remaining) = self.descend(model, TreePath::root(), budget);
        if remaining > 0 {
            return None;
        }

        self.row_paths.insert(self.generation, row, path.clone());
        Some(path)
    }

    /// The visible row showing `path`, or `None` when an ancestor is
    /// collapsed (the path has no row) or the path is invalid for the model.
    pub fn row_from_path<T: Clone, M: TreeModel<T> + ?Sized>(
        &mut self,
        model: &M,
        path: &TreePath,
    ) -> Option<usize> {
        if model.is_empty() {
            return None;
        }
        if path.is_root() {
            return self.root_visible.then_some(0);
        }

        let mut row: isize = if self.root_visible { 0 } else { -1 };
        let mut current = TreePath::root();
        let depth = path.depth();

        for (level, &target) in path.indices().iter().enumerate() {
            if target >= model.num_children(&current) {
                return None;
            }

            // Preceding siblings each occupy one row plus their visible
            // subtree.
            for i in 0..target {
                row += 1 + self.rows_below(model, &current.child(i)) as isize;
            }
            row += 1;

            current = current.child(target);
            if level + 1 < depth && !self.is_expanded(&current) {
                return None;
            }
        }

        Some(row as usize)
    }

    /// The number of visible rows in the subtree below `path`: 0 for a leaf
    /// or a node that is not expanded-and-visible, otherwise one row per
    /// child plus that child's own visible subtree.
    pub fn rows_below<T: Clone, M: TreeModel<T> + ?Sized>(
        &mut self,
        model: &M,
        path: &TreePath,
    ) -> usize {
        if let Some(&count) = self.subtree_rows.get(self.generation, path) {
            return count;
        }

        let descends =
            path.is_root() || (self.expansion.is_expanded(path) && self.is_visible(path));

        let count = if descends {
            let mut total = 0;
            for i in 0..model.num_children(path) {
                total += 1 + self.rows_below(model, &path.child(i));
            }
            total
        } else {
            0
        };

        self.subtree_rows.insert(self.generation, path.clone(), count);
        count
    }

    /// Walks pre-order below `path`, consuming one unit of budget per row
    /// visited and descending only into expanded children. Returns the last
    /// path reached and the unconsumed budget (0 when the target was found).
    fn descend<T: Clone, M: TreeModel<T> + ?Sized>(
        &self,
        model: &M,
        path: TreePath,
        budget: usize,
    ) -> (TreePath, usize) {
        if budget == 0 {
            return (path, 0);
        }

        let mut remaining = budget;
        let mut result = path.clone();

        for i in 0..model.num_children(&path) {
            result = path.child(i);
            remaining -= 1;
            if remaining == 0 {
                return (result, 0);
            }

            if self.expansion.is_expanded(&result) {
                let (deeper, left) = self.descend(model, result.clone(), remaining);
                if left == 0 {
                    return (deeper, 0);
                }
                result = deeper;
                remaining = left;
            }
        }

        (result, remaining)
    }
}

/// Every path following `path` in document order at each ancestor level: the
/// later siblings of the path itself, of its parent, and so on up to the
/// root's remaining children.
///
/// After an expand or collapse, these are exactly the visible paths whose
/// rows shifted and need a position refresh.
pub fn ancestral_siblings_after<T: Clone, M: TreeModel<T> + ?Sized>(
    model: &M,
    path: &TreePath,
) -> BTreeSet<TreePath> {
    let mut result = BTreeSet::new();
    let mut child = path.clone();

    while let Some(parent) = child.parent() {
        if let Some(index) = child.last() {
            for i in (index + 1)..model.num_children(&parent) {
                result.insert(parent.child(i));
            }
        }
        child = parent;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SimpleTreeModel, TreeNode};

    /// Root with three leaf children.
    fn flat_model() -> SimpleTreeModel<&'static str> {
        SimpleTreeModel::new(TreeNode::with_children(
            "root",
            vec![TreeNode::new("a"), TreeNode::new("b"), TreeNode::new("c")],
        ))
    }

    /// Root with children of 2, 1, and 0 children respectively.
    fn nested_model() -> SimpleTreeModel<&'static str> {
        SimpleTreeModel::new(TreeNode::with_children(
            "root",
            vec![
                TreeNode::with_children("a", vec![TreeNode::new("a0"), TreeNode::new("a1")]),
                TreeNode::with_children("b", vec![TreeNode::new("b0")]),
                TreeNode::new("c"),
            ],
        ))
    }

    fn mapper_for<T: Clone, M: TreeModel<T>>(model: &M) -> RowMapper {
        let mut mapper = RowMapper::new();
        mapper.structure_changed(model);
        mapper
    }

    #[test]
    fn test_flat_tree_row_count_and_paths() {
        let model = flat_model();
        let mut mapper = mapper_for(&model);

        assert_eq!(mapper.num_rows(), 3);
        assert_eq!(mapper.path_from_row(&model, 0), Some(TreePath::from([0])));
        assert_eq!(mapper.path_from_row(&model, 2), Some(TreePath::from([2])));
        assert_eq!(mapper.path_from_row(&model, 3), None);
    }

    #[test]
    fn test_root_visible_toggle() {
        let model = flat_model();
        let mut mapper = mapper_for(&model);

        let rows_below_root = mapper.rows_below(&model, &TreePath::root());
        assert_eq!(mapper.num_rows(), rows_below_root);

        assert!(mapper.set_root_visible(&model, true));
        assert_eq!(mapper.num_rows(), 4);
        assert_eq!(mapper.num_rows(), mapper.rows_below(&model, &TreePath::root()) + 1);
        assert_eq!(mapper.path_from_row(&model, 0), Some(TreePath::root()));
        assert_eq!(mapper.path_from_row(&model, 1), Some(TreePath::from([0])));
        assert_eq!(mapper.row_from_path(&model, &TreePath::root()), Some(0));

        // Setting the same value again reports no change.
        assert!(!mapper.set_root_visible(&model, true));
    }

    #[test]
    fn test_expand_shifts_following_rows() {
        let model = nested_model();
        let mut mapper = mapper_for(&model);

        assert_eq!(mapper.num_rows(), 3);
        assert_eq!(mapper.row_from_path(&model, &TreePath::from([1])), Some(1));

        assert!(mapper.set_expanded(&model, TreePath::from([0]), true));

        assert_eq!(mapper.num_rows(), 5);
        assert_eq!(mapper.path_from_row(&model, 1), Some(TreePath::from([0, 0])));
        assert_eq!(mapper.path_from_row(&model, 2), Some(TreePath::from([0, 1])));
        assert_eq!(mapper.path_from_row(&model, 3), Some(TreePath::from([1])));
        assert_eq!(mapper.row_from_path(&model, &TreePath::from([1])), Some(3));
    }

    #[test]
    fn test_collapsed_path_has_no_row() {
        let model = nested_model();
        let mut mapper = mapper_for(&model);

        assert_eq!(mapper.row_from_path(&model, &TreePath::from([0, 1])), None);

        mapper.set_expanded(&model, TreePath::from([0]), true);
        assert_eq!(mapper.row_from_path(&model, &TreePath::from([0, 1])), Some(2));
    }

    #[test]
    fn test_invalid_path_has_no_row() {
        let model = nested_model();
        let mut mapper = mapper_for(&model);

        assert_eq!(mapper.row_from_path(&model, &TreePath::from([9])), None);
        assert_eq!(mapper.row_from_path(&model, &TreePath::from([2, 0])), None);
    }

    #[test]
    fn test_round_trip_for_visible_paths() {
        let model = nested_model();
        let mut mapper = mapper_for(&model);
        mapper.set_expanded(&model, TreePath::from([0]), true);
        mapper.set_expanded(&model, TreePath::from([1]), true);
        mapper.set_root_visible(&model, true);

        for row in 0..mapper.num_rows() {
            let path = mapper.path_from_row(&model, row).expect("row should map");
            assert!(mapper.is_visible(&path));
            assert_eq!(mapper.row_from_path(&model, &path), Some(row), "row {row}");
        }
    }

    #[test]
    fn test_expand_collapse_inverse() {
        let model = nested_model();
        let mut mapper = mapper_for(&model);

        let before_rows = mapper.num_rows();
        let before: Vec<_> = (0..before_rows)
            .map(|row| mapper.path_from_row(&model, row))
            .collect();

        mapper.set_expanded(&model, TreePath::from([0]), true);
        mapper.set_expanded(&model, TreePath::from([0]), false);

        assert_eq!(mapper.num_rows(), before_rows);
        let after: Vec<_> = (0..before_rows)
            .map(|row| mapper.path_from_row(&model, row))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_rows_below_hidden_expansion() {
        let model = SimpleTreeModel::new(TreeNode::with_children(
            "root",
            vec![TreeNode::with_children(
                "a",
                vec![TreeNode::with_children("a0", vec![TreeNode::new("a00")])],
            )],
        ));
        let mut mapper = mapper_for(&model);

        // Expanding a path below a collapsed ancestor contributes no rows
        // until the ancestor is expanded too.
        mapper.set_expanded(&model, TreePath::from([0, 0]), true);
        assert_eq!(mapper.num_rows(), 1);

        mapper.set_expanded(&model, TreePath::from([0]), true);
        assert_eq!(mapper.num_rows(), 3);
        assert_eq!(
            mapper.path_from_row(&model, 2),
            Some(TreePath::from([0, 0, 0]))
        );
    }

    #[test]
    fn test_empty_model() {
        let model = SimpleTreeModel::<&str>::empty();
        let mut mapper = mapper_for(&model);

        assert_eq!(mapper.num_rows(), 0);
        assert_eq!(mapper.path_from_row(&model, 0), None);
        assert_eq!(mapper.row_from_path(&model, &TreePath::from([0])), None);
    }

    #[test]
    fn test_ancestral_siblings_after() {
        let model = SimpleTreeModel::new(TreeNode::with_children(
            "root",
            vec![
                TreeNode::with_children(
                    "a",
                    vec![TreeNode::new("a0"), TreeNode::new("a1"), TreeNode::new("a2")],
                ),
                TreeNode::new("b"),
                TreeNode::new("c"),
            ],
        ));

        let after = ancestral_siblings_after(&model, &TreePath::from([0, 0]));
        let expected: BTreeSet<TreePath> = [
            TreePath::from([0, 1]),
            TreePath::from([0, 2]),
            TreePath::from([1]),
            TreePath::from([2]),
        ]
        .into_iter()
        .collect();
        assert_eq!(after, expected);

        // The last top-level child has nothing after it.
        assert!(ancestral_siblings_after(&model, &TreePath::from([2])).is_empty());
    }
}
