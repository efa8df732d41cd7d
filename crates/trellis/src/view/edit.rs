//! The in-place edit lifecycle.
//!
//! At most one row is edited at a time. An [`EditSession`] holds the active
//! row and its [`EditOperation`], and moves through
//! `Idle → Editing → {Committed, Cancelled} → Idle`. The owning view drives
//! the session: it swaps the overlay view in and out of its row window,
//! writes committed values back to the model, and force-refreshes rows the
//! model will stay silent about.
//!
//! Session state is cleared *before* the committed value is written back, so
//! observers of the resulting model change never see a stale "editing"
//! state.

use super::traits::EditOperation;

/// How a completion request resolved.
#[derive(Debug, PartialEq, Eq)]
pub enum EditCompletion<T> {
    /// No edit was in progress.
    Inactive,
    /// The operation declined to produce a result; the edit was cancelled
    /// and the row's display view must be restored.
    Cancelled {
        /// The row that was being edited.
        row: usize,
    },
    /// The operation produced a value for the owner to write back to the
    /// model.
    Committed {
        /// The row that was being edited.
        row: usize,
        /// The edit result.
        value: T,
    },
}

/// The state of the single in-progress edit, if any.
pub struct EditSession<T, V> {
    active: Option<(usize, Box<dyn EditOperation<T, V>>)>,
}

impl<T, V> Default for EditSession<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> EditSession<T, V> {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Returns `true` while an edit is in progress.
    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    /// The row being edited, if any.
    pub fn editing_row(&self) -> Option<usize> {
        self.active.as_ref().map(|(row, _)| *row)
    }

    /// Starts editing `row` with `operation`, first cancelling any edit
    /// already in progress.
    ///
    /// Returns the operation's overlay view for the owner to swap in place
    /// of the row's display view, if the operation provides one.
    pub fn begin(&mut self, row: usize, mut operation: Box<dyn EditOperation<T, V>>) -> Option<V> {
        if let Some((stale_row, mut stale)) = self.active.take() {
            tracing::debug!(target: "trellis::view", row = stale_row, "implicitly cancelling edit");
            stale.cancel();
        }

        let overlay = operation.begin();
        self.active = Some((row, operation));
        tracing::debug!(target: "trellis::view", row, "editing started");
        overlay
    }

    /// Asks the operation for its result and clears the session.
    ///
    /// An absent result is treated as a cancel. On commit the operation is
    /// torn down and the session is idle by the time the caller sees the
    /// value, so the model write-back happens with `is_editing() == false`.
    pub fn complete(&mut self) -> EditCompletion<T> {
        let Some((row, mut operation)) = self.active.take() else {
            return EditCompletion::Inactive;
        };

        match operation.complete() {
            Some(value) => {
                operation.cancel();
                tracing::debug!(target: "trellis::view", row, "edit committed");
                EditCompletion::Committed { row, value }
            }
            None => {
                operation.cancel();
                tracing::debug!(target: "trellis::view", row, "edit abandoned");
                EditCompletion::Cancelled { row }
            }
        }
    }

    /// Discards the edit in progress.
    ///
    /// Returns the row that needs a forced refresh to restore its display
    /// view, or `None` when the session was idle.
    pub fn cancel(&mut self) -> Option<usize> {
        let (row, mut operation) = self.active.take()?;
        operation.cancel();
        tracing::debug!(target: "trellis::view", row, "edit cancelled");
        Some(row)
    }
}
