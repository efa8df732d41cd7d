//! Keeping selection aligned with a mutating linear model.
//!
//! Selection is stored as row indices, so inserting or removing rows above a
//! selected row silently changes what the stored index points at. The
//! adapter recomputes the selection so it keeps following the *semantic* row
//! it pointed to, not its old numeric position:
//!
//! - inserting rows at or before a selected index pushes it down by the
//!   number inserted there;
//! - removing rows strictly before a selected index pulls it up by the
//!   number removed there;
//! - removing a selected row drops it from the selection.
//!
//! The surviving selection is re-applied as one replace batch.
//!
//! Tree views select by path rather than index, so no shifting is needed
//! there, only pruning of paths that were removed from the model.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::model::{SelectionModel, TreePath};

/// The selection after inserting the rows in `inserted`: every selected
/// index shifts down by the number of insertions at or before it.
pub fn shifted_after_insert(
    selected: impl IntoIterator<Item = usize>,
    inserted: &BTreeSet<usize>,
) -> BTreeSet<usize> {
    selected
        .into_iter()
        .map(|index| index + inserted.iter().filter(|&&i| i <= index).count())
        .collect()
}

/// The selection after removing the rows in `removed`: removed indices are
/// dropped, and every survivor shifts up by the number of removals strictly
/// before it.
pub fn shifted_after_remove(
    selected: impl IntoIterator<Item = usize>,
    removed: &BTreeSet<usize>,
) -> BTreeSet<usize> {
    selected
        .into_iter()
        .filter(|index| !removed.contains(index))
        .map(|index| index - removed.iter().filter(|&&i| i < index).count())
        .collect()
}

/// Translates model mutations into selection-model updates for an
/// index-addressed view.
pub struct SelectionAdapter {
    selection: Arc<SelectionModel<usize>>,
}

impl SelectionAdapter {
    /// Creates an adapter updating `selection`.
    pub fn new(selection: Arc<SelectionModel<usize>>) -> Self {
        Self { selection }
    }

    /// The selection model this adapter maintains.
    pub fn selection(&self) -> &Arc<SelectionModel<usize>> {
        &self.selection
    }

    /// Re-aligns the selection after rows were inserted at `inserted`.
    pub fn rows_inserted(&self, inserted: &BTreeSet<usize>) {
        if inserted.is_empty() || self.selection.is_empty() {
            return;
        }
        let shifted = shifted_after_insert(self.selection.iter(), inserted);
        self.selection.replace_all(shifted);
    }

    /// Re-aligns the selection after the rows at `removed` were removed.
    pub fn rows_removed(&self, removed: &BTreeSet<usize>) {
        if removed.is_empty() || self.selection.is_empty() {
            return;
        }
        let shifted = shifted_after_remove(self.selection.iter(), removed);
        self.selection.replace_all(shifted);
    }
}

/// Drops removed paths from a path-addressed selection, including the
/// descendants of removed subtrees. No index shifting applies to paths.
pub fn prune_removed_paths(selection: &SelectionModel<TreePath>, removed: &[TreePath]) {
    if removed.is_empty() {
        return;
    }
    let stale: Vec<TreePath> = selection
        .iter()
        .into_iter()
        .filter(|selected| {
            removed
                .iter()
                .any(|gone| gone == selected || gone.is_ancestor_of(selected))
        })
        .collect();
    selection.remove_all(stale);
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_insert_shifts_at_or_after() {
        let inserted: BTreeSet<usize> = [2].into_iter().collect();
        let shifted = shifted_after_insert([0, 2, 5], &inserted);
        assert_eq!(shifted, [0, 3, 6].into_iter().collect());
    }

    #[test]
    fn test_insert_of_k_rows_shifts_by_k() {
        let inserted: BTreeSet<usize> = [1, 2, 3].into_iter().collect();
        let shifted = shifted_after_insert([0, 4], &inserted);
        assert_eq!(shifted, [0, 7].into_iter().collect());
    }

    #[test]
    fn test_remove_drops_and_shifts() {
        let removed: BTreeSet<usize> = [1, 3].into_iter().collect();
        // 1 and 3 are dropped; 5 had two removals before it.
        let shifted = shifted_after_remove([0, 1, 3, 5], &removed);
        assert_eq!(shifted, [0, 3].into_iter().collect());
    }

    #[test]
    fn test_remove_after_selection_leaves_it_alone() {
        let removed: BTreeSet<usize> = [7].into_iter().collect();
        let shifted = shifted_after_remove([2], &removed);
        assert_eq!(shifted, [2].into_iter().collect());
    }

    #[test]
    fn test_adapter_applies_one_replace_batch() {
        let selection = Arc::new(SelectionModel::new());
        selection.add_all([1usize, 4]);

        let batches = Arc::new(Mutex::new(0));
        let batches_clone = batches.clone();
        selection.changed.connect(move |_| {
            *batches_clone.lock() += 1;
        });

        let adapter = SelectionAdapter::new(selection.clone());
        adapter.rows_inserted(&[0, 2].into_iter().collect());

        assert_eq!(selection.iter(), vec![3, 6]);
        assert_eq!(*batches.lock(), 1);
    }

    #[test]
    fn test_adapter_remove_keeps_unshifted_survivors() {
        let selection = Arc::new(SelectionModel::new());
        selection.add_all([0usize, 3, 5]);

        let adapter = SelectionAdapter::new(selection.clone());
        adapter.rows_removed(&[3].into_iter().collect());

        // 0 was untouched and survives; 5 shifts to 4; 3 is gone.
        assert_eq!(selection.iter(), vec![0, 4]);
    }

    #[test]
    fn test_adapter_noop_without_selection() {
        let selection = Arc::new(SelectionModel::<usize>::new());
        let adapter = SelectionAdapter::new(selection.clone());

        adapter.rows_removed(&[0].into_iter().collect());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_prune_removed_paths() {
        let selection = SelectionModel::new();
        selection.add_all([
            TreePath::from([0]),
            TreePath::from([1, 2]),
            TreePath::from([1, 2, 0]),
            TreePath::from([3]),
        ]);

        prune_removed_paths(&selection, &[TreePath::from([1, 2])]);

        // The removed path and its descendant are pruned; others keep their
        // paths untouched.
        assert_eq!(
            selection.iter(),
            vec![TreePath::from([0]), TreePath::from([3])]
        );
    }
}
