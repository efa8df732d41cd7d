//! Generation-stamped caches for derived row data.
//!
//! The row mapper memoizes row↔path lookups and subtree row counts. Those
//! memos are only valid until the next structural change (expand, collapse,
//! insert, remove, root-visibility toggle), so every entry is stamped with
//! the owner's monotonic generation counter: the owner bumps its generation
//! on each structural mutation, and reads from an older generation are
//! treated as misses. Stale entries are dropped lazily as slots are reused.

use std::collections::HashMap;
use std::hash::Hash;

struct Entry<V> {
    generation: u64,
    value: V,
}

/// A map whose entries are only served back at the generation they were
/// written.
pub(crate) struct GenerationCache<K, V> {
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V> Default for GenerationCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> GenerationCache<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The cached value for `key`, if it was written at `generation`.
    pub(crate) fn get(&self, generation: u64, key: &K) -> Option<&V> {
        let entry = self.entries.get(key)?;
        (entry.generation == generation).then_some(&entry.value)
    }

    /// Caches `value` for `key` at `generation`, displacing any older entry.
    pub(crate) fn insert(&mut self, generation: u64, key: K, value: V) {
        self.entries.insert(key, Entry { generation, value });
    }

    /// Drops every entry not written at `generation`.
    ///
    /// Staleness is already handled by [`get`](Self::get); this exists to
    /// bound memory after a large structural change.
    pub(crate) fn purge_stale(&mut self, generation: u64) {
        self.entries.retain(|_, entry| entry.generation == generation);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
