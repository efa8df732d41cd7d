//! The materialized row window.
//!
//! A virtualized view keeps view objects only for the contiguous row range
//! currently on screen. [`RowWindow`] tracks that range and stores the
//! materialized views in a circular slot buffer keyed by `row % capacity`,
//! so a row scrolling in lands on the slot of a row that scrolled out and
//! its predecessor's view is handed back for reuse.
//!
//! Capacity is the window length plus a bounded number of spare slots
//! (`cache_length`): views that leave the window survive in their slots until
//! displaced, but never more than `cache_length` beyond the window. Shrinking
//! the window evicts the occupants farthest from it first.

/// A materialized view and the row it was generated for.
struct MaterializedRow<V> {
    row: usize,
    view: V,
}

/// The contiguous visible row range and its materialized views.
pub struct RowWindow<V> {
    first: usize,
    last: Option<usize>,
    cache_length: usize,
    slots: Vec<Option<MaterializedRow<V>>>,
}

impl<V> RowWindow<V> {
    /// Creates an empty window retaining up to `cache_length` off-window
    /// views for reuse.
    pub fn new(cache_length: usize) -> Self {
        Self {
            first: 0,
            last: None,
            cache_length,
            slots: Vec::new(),
        }
    }

    /// The first visible row.
    pub fn first_visible(&self) -> usize {
        self.first
    }

    /// The last visible row, or `None` while the viewport is empty.
    pub fn last_visible(&self) -> Option<usize> {
        self.last
    }

    /// The number of rows in the visible range.
    pub fn window_len(&self) -> usize {
        match self.last {
            Some(last) if last >= self.first => last - self.first + 1,
            _ => 0,
        }
    }

    /// Returns `true` if `row` lies in the visible range.
    pub fn in_window(&self, row: usize) -> bool {
        row >= self.first && self.last.is_some_and(|last| row <= last)
    }

    /// Moves the visible range, resizing the slot buffer to the new window
    /// length plus the retention allowance and evicting whatever no longer
    /// fits (farthest from the window first).
    pub fn set_range(&mut self, first: usize, last: Option<usize>) {
        self.first = first;
        self.last = last;
        let capacity = self.window_len() + self.cache_length;
        self.rebuild(capacity);
    }

    /// The view materialized for exactly `row`, if any.
    pub fn view(&self, row: usize) -> Option<&V> {
        let slot = self.slot_index(row)?;
        let occupant = self.slots[slot].as_ref()?;
        (occupant.row == row).then_some(&occupant.view)
    }

    /// Mutable access to the view materialized for exactly `row`.
    pub fn view_mut(&mut self, row: usize) -> Option<&mut V> {
        let slot = self.slot_index(row)?;
        let occupant = self.slots[slot].as_mut()?;
        (occupant.row == row).then_some(&mut occupant.view)
    }

    /// Returns `true` if a view is materialized for exactly `row`.
    pub fn is_materialized(&self, row: usize) -> bool {
        self.view(row).is_some()
    }

    /// Removes and returns whatever view occupies `row`'s slot, as the
    /// recycling source when `row` is about to be materialized.
    ///
    /// The returned view may have been generated for a different row that
    /// scrolled out of the window.
    pub fn take_slot(&mut self, row: usize) -> Option<V> {
        let slot = self.slot_index(row)?;
        self.slots[slot].take().map(|occupant| occupant.view)
    }

    /// Stores `view` as the materialized view for `row`, displacing the
    /// slot's previous occupant.
    pub fn put(&mut self, row: usize, view: V) {
        let Some(slot) = self.slot_index(row) else {
            return;
        };
        self.slots[slot] = Some(MaterializedRow { row, view });
    }

    /// Swaps in `view` for `row`, returning the view it replaces. Used when
    /// an edit overlay takes a display view's place and vice versa.
    ///
    /// Returns `None` (leaving `view` installed) when no view was
    /// materialized for `row`.
    pub fn replace(&mut self, row: usize, view: V) -> Option<V> {
        let previous = {
            let slot = self.slot_index(row)?;
            let occupant = self.slots[slot].take();
            match occupant {
                Some(occupant) if occupant.row == row => Some(occupant.view),
                other => {
                    self.slots[slot] = other;
                    None
                }
            }
        };
        self.put(row, view);
        previous
    }

    /// Evicts every materialized view at `row >= num_rows`, rows that no
    /// longer exist after a collapse or removal.
    pub fn truncate(&mut self, num_rows: usize) {
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|occupant| occupant.row >= num_rows) {
                *slot = None;
            }
        }
    }

    /// Drops every materialized view, keeping the range.
    pub fn clear_views(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// The total number of materialized views, in and out of the window.
    pub fn materialized_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// The number of materialized views inside the visible range.
    ///
    /// Equals [`window_len`](Self::window_len) once the owning view has
    /// spliced in every visible row.
    pub fn materialized_in_window(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|occupant| self.in_window(occupant.row))
            .count()
    }

    fn slot_index(&self, row: usize) -> Option<usize> {
        if self.slots.is_empty() {
            return None;
        }
        Some(row % self.slots.len())
    }

    fn window_distance(&self, row: usize) -> usize {
        match self.last {
            Some(last) if last >= self.first => {
                if row < self.first {
                    self.first - row
                } else if row > last {
                    row - last
                } else {
                    0
                }
            }
            _ => usize::MAX,
        }
    }

    fn rebuild(&mut self, capacity: usize) {
        if capacity == self.slots.len() {
            return;
        }

        let mut occupants: Vec<MaterializedRow<V>> = self.slots.drain(..).flatten().collect();
        occupants.sort_by_key(|occupant| self.window_distance(occupant.row));

        self.slots.clear();
        self.slots.extend((0..capacity).map(|_| None));

        // Nearest-to-window first, so a slot collision drops the occupant
        // that is least likely to be needed again.
        for occupant in occupants {
            if capacity == 0 {
                break;
            }
            let slot = occupant.row % capacity;
            if self.slots[slot].is_none() {
                self.slots[slot] = Some(occupant);
            }
        }
    }
}
