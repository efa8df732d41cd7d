//! Linear (list) data models.
//!
//! A [`ListModel`] is the read capability views consume: a length, indexed
//! access, and a change stream. [`MutableListModel`] adds mutation, and
//! [`VecListModel`] is the vector-backed implementation most applications
//! use.
//!
//! Change notifications carry one [`ListChange`] batch per mutation: the
//! removed and added entries as index→value mappings. An index present in
//! both maps is an in-place edit. Mutations that change nothing (such as
//! setting an index to its current value) emit no change at all.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use trellis_core::Signal;

/// One batch of changes to a list model.
///
/// Keys are indices in the model *after* the change for `added` and *before*
/// the change for `removed`.
#[derive(Debug, Clone, Default)]
pub struct ListChange<T> {
    /// Entries removed from the model, keyed by their former index.
    pub removed: BTreeMap<usize, T>,
    /// Entries added to the model, keyed by their new index.
    pub added: BTreeMap<usize, T>,
}

impl<T> ListChange<T> {
    /// Returns `true` if the change contains no entries.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Signals emitted by list models.
pub struct ListModelSignals<T> {
    /// Emitted once per mutation with the batch of removed/added entries.
    pub changed: Signal<ListChange<T>>,
}

impl<T: Clone + Send + 'static> Default for ListModelSignals<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> ListModelSignals<T> {
    /// Creates a new set of list model signals.
    pub fn new() -> Self {
        Self {
            changed: Signal::new(),
        }
    }
}

/// Read access to a linear sequence of values.
///
/// Views never mutate a model through this trait; mutation goes through
/// [`MutableListModel`], owned by the caller.
pub trait ListModel<T: Clone + Send + 'static>: Send + Sync {
    /// The number of values in the model.
    fn len(&self) -> usize;

    /// The value at `index`, or `None` when out of range.
    fn get(&self, index: usize) -> Option<T>;

    /// Returns `true` if the model holds no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The signals for this model.
    fn signals(&self) -> &ListModelSignals<T>;
}

/// A list model that can be mutated in place.
///
/// Every mutation emits a single [`ListChange`] batch, except mutations
/// that leave the model unchanged, which emit nothing.
pub trait MutableListModel<T: Clone + PartialEq + Send + 'static>: ListModel<T> {
    /// Replaces the value at `index`, returning the prior value.
    ///
    /// No change is emitted when the new value equals the prior one; callers
    /// that need a visual refresh in that case must request it explicitly.
    fn set(&self, index: usize, value: T) -> Option<T>;

    /// Inserts `value` at `index`, shifting subsequent values up.
    fn insert(&self, index: usize, value: T);

    /// Inserts all of `values` starting at `index`, as one change batch.
    fn insert_all(&self, index: usize, values: Vec<T>);

    /// Appends `value` at the end.
    fn push(&self, value: T) {
        self.insert(self.len(), value);
    }

    /// Removes and returns the value at `index`, or `None` when out of range.
    fn remove_at(&self, index: usize) -> Option<T>;

    /// Removes the first occurrence of `value`, returning its former index.
    fn remove(&self, value: &T) -> Option<usize>;

    /// Removes all values, as one change batch.
    fn clear(&self);
}

/// A vector-backed [`MutableListModel`].
///
/// # Example
///
/// ```
/// use trellis::model::{ListModel, MutableListModel, VecListModel};
///
/// let model = VecListModel::from(vec!["a", "b", "c"]);
/// model.signals().changed.connect(|change| {
///     println!("+{} -{}", change.added.len(), change.removed.len());
/// });
///
/// model.insert(1, "d");
/// assert_eq!(model.len(), 4);
/// assert_eq!(model.get(1), Some("d"));
/// ```
pub struct VecListModel<T> {
    items: RwLock<Vec<T>>,
    signals: ListModelSignals<T>,
}

impl<T: Clone + PartialEq + Send + 'static> Default for VecListModel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq + Send + 'static> VecListModel<T> {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    fn emit(&self, change: ListChange<T>) {
        if change.is_empty() {
            return;
        }
        tracing::trace!(
            target: "trellis::model",
            removed = change.removed.len(),
            added = change.added.len(),
            "list model changed"
        );
        self.signals.changed.emit(change);
    }
}

impl<T: Clone + PartialEq + Send + 'static> From<Vec<T>> for VecListModel<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            signals: ListModelSignals::new(),
        }
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> ListModel<T> for VecListModel<T> {
    fn len(&self) -> usize {
        self.items.read().len()
    }

    fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    fn signals(&self) -> &ListModelSignals<T> {
        &self.signals
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> MutableListModel<T> for VecListModel<T> {
    fn set(&self, index: usize, value: T) -> Option<T> {
        let prior = {
            let mut items = self.items.write();
            let slot = items.get_mut(index)?;
            let prior = slot.clone();
            if prior == value {
                return Some(prior);
            }
            *slot = value.clone();
            prior
        };

        self.emit(ListChange {
            removed: BTreeMap::from([(index, prior.clone())]),
            added: BTreeMap::from([(index, value)]),
        });

        Some(prior)
    }

    fn insert(&self, index: usize, value: T) {
        self.insert_all(index, vec![value]);
    }

    fn insert_all(&self, index: usize, values: Vec<T>) {
        if values.is_empty() {
            return;
        }

        let added: BTreeMap<usize, T> = {
            let mut items = self.items.write();
            let index = index.min(items.len());
            let added = values
                .iter()
                .enumerate()
                .map(|(offset, value)| (index + offset, value.clone()))
                .collect();
            items.splice(index..index, values);
            added
        };

        self.emit(ListChange {
            removed: BTreeMap::new(),
            added,
        });
    }

    fn remove_at(&self, index: usize) -> Option<T> {
        let removed = {
            let mut items = self.items.write();
            if index >= items.len() {
                return None;
            }
            items.remove(index)
        };

        self.emit(ListChange {
            removed: BTreeMap::from([(index, removed.clone())]),
            added: BTreeMap::new(),
        });

        Some(removed)
    }

    fn remove(&self, value: &T) -> Option<usize> {
        let index = self.items.read().iter().position(|item| item == value)?;
        self.remove_at(index)?;
        Some(index)
    }

    fn clear(&self) {
        let removed: BTreeMap<usize, T> = {
            let mut items = self.items.write();
            items.drain(..).enumerate().collect()
        };

        self.emit(ListChange {
            removed,
            added: BTreeMap::new(),
        });
    }
}
