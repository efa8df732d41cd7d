//! Selection models.
//!
//! A [`SelectionModel`] owns selection storage for a view: a set of keys,
//! where the key type depends on the addressing scheme: [`TreePath`] for
//! trees, `usize` row indices for lists and tables. Views never own selection
//! state themselves; they translate between row space and key space and issue
//! add/remove/replace calls against a shared model.
//!
//! All mutations are batched: one [`changed`](SelectionModel::changed) signal
//! per call, carrying the keys that actually entered and left the selection.
//! Calls that change nothing emit nothing.
//!
//! [`TreePath`]: super::path::TreePath

use std::collections::BTreeSet;

use parking_lot::RwLock;
use trellis_core::Signal;

/// One batch of selection changes.
#[derive(Debug, Clone, Default)]
pub struct SelectionChange<K> {
    /// Keys that entered the selection, in ascending order.
    pub added: Vec<K>,
    /// Keys that left the selection, in ascending order.
    pub removed: Vec<K>,
}

/// A shared, observable set of selected keys.
///
/// # Example
///
/// ```
/// use trellis::model::SelectionModel;
///
/// let selection = SelectionModel::<usize>::new();
/// selection.changed.connect(|change| {
///     println!("selected +{} -{}", change.added.len(), change.removed.len());
/// });
///
/// selection.add_all([1, 3]);
/// assert!(selection.contains(&3));
///
/// selection.replace_all([2]);
/// assert_eq!(selection.iter(), vec![2]);
/// ```
pub struct SelectionModel<K: Clone + Ord + Send + 'static> {
    items: RwLock<BTreeSet<K>>,
    /// Emitted once per mutating call with the keys actually changed.
    pub changed: Signal<SelectionChange<K>>,
}

impl<K: Clone + Ord + Send + 'static> Default for SelectionModel<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Ord + Send + 'static> SelectionModel<K> {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeSet::new()),
            changed: Signal::new(),
        }
    }

    /// Returns `true` if `key` is selected.
    pub fn contains(&self, key: &K) -> bool {
        self.items.read().contains(key)
    }

    /// The number of selected keys.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// A snapshot of the selected keys, in ascending order.
    pub fn iter(&self) -> Vec<K> {
        self.items.read().iter().cloned().collect()
    }

    /// Selects a single key.
    pub fn add(&self, key: K) {
        self.add_all([key]);
    }

    /// Selects all of `keys`, emitting one change batch for those not
    /// already selected.
    pub fn add_all(&self, keys: impl IntoIterator<Item = K>) {
        let added: Vec<K> = {
            let mut items = self.items.write();
            keys.into_iter()
                .filter(|key| items.insert(key.clone()))
                .collect()
        };
        self.emit(added, Vec::new());
    }

    /// Deselects a single key.
    pub fn remove(&self, key: &K) {
        self.remove_all([key.clone()]);
    }

    /// Deselects all of `keys`, emitting one change batch for those that were
    /// selected.
    pub fn remove_all(&self, keys: impl IntoIterator<Item = K>) {
        let removed: Vec<K> = {
            let mut items = self.items.write();
            keys.into_iter().filter(|key| items.remove(key)).collect()
        };
        self.emit(Vec::new(), removed);
    }

    /// Replaces the entire selection with `keys`, emitting one change batch
    /// with the symmetric difference.
    pub fn replace_all(&self, keys: impl IntoIterator<Item = K>) {
        let (added, removed) = {
            let mut items = self.items.write();
            let new: BTreeSet<K> = keys.into_iter().collect();
            let added: Vec<K> = new.difference(&*items).cloned().collect();
            let removed: Vec<K> = items.difference(&new).cloned().collect();
            *items = new;
            (added, removed)
        };
        self.emit(added, removed);
    }

    /// Clears the selection.
    pub fn clear(&self) {
        self.replace_all([]);
    }

    fn emit(&self, mut added: Vec<K>, mut removed: Vec<K>) {
        if added.is_empty() && removed.is_empty() {
            return;
        }
        added.sort();
        removed.sort();
        tracing::trace!(
            target: "trellis::selection",
            added = added.len(),
            removed = removed.len(),
            "selection changed"
        );
        self.changed.emit(SelectionChange { added, removed });
    }
}
