//! Capabilities the owning application supplies to the views.
//!
//! The virtualized views do not render; they materialize opaque view objects
//! through a [`TreeRowGenerator`]/[`ListRowGenerator`], place them with a
//! row positioner, and hand in-place editing to a [`ListEditor`] or
//! [`TableEditor`]. Implementations of these traits are where the host
//! toolkit's widgets, fonts, and input handling live.

use trellis_core::Rect;

use crate::model::TreePath;

/// The minimal surface a materialized row view must expose.
///
/// The views own layout: after generating or reusing a row view, they assign
/// the bounds reported by the row positioner.
pub trait RowView {
    /// Assigns the on-screen bounds of this view.
    fn set_bounds(&mut self, bounds: Rect);
}

/// Positions rows of a tree on the content surface.
pub trait TreeRowPositioner<T>: Send + Sync {
    /// The bounds of the row showing `value` at `path`, as row number `row`.
    fn row_bounds(&self, value: &T, path: &TreePath, row: usize) -> Rect;

    /// The row index at vertical position `y` on the content surface.
    fn row_at(&self, y: f64) -> usize;
}

/// Positions rows of a list or table on the content surface.
pub trait ListRowPositioner<T>: Send + Sync {
    /// The bounds of the row showing `value` as row number `row`.
    fn row_bounds(&self, value: &T, row: usize) -> Rect;

    /// The row index at vertical position `y` on the content surface.
    fn row_at(&self, y: f64) -> usize;
}

/// A positioner for uniform-height rows.
///
/// Construction validates its parameters: a non-positive row height is a
/// programming error and aborts.
#[derive(Debug, Clone, Copy)]
pub struct FixedRowPositioner {
    row_height: f64,
    row_width: f64,
}

impl FixedRowPositioner {
    /// Creates a positioner with the given row height and width.
    ///
    /// # Panics
    ///
    /// Panics when `row_height` is not a positive, finite number.
    pub fn new(row_height: f64, row_width: f64) -> Self {
        assert!(
            row_height.is_finite() && row_height > 0.0,
            "row height must be positive, got {row_height}"
        );
        Self {
            row_height,
            row_width,
        }
    }

    /// The uniform row height.
    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    fn bounds(&self, row: usize) -> Rect {
        Rect::new(0.0, row as f64 * self.row_height, self.row_width, self.row_height)
    }

    fn row_for(&self, y: f64) -> usize {
        (y.max(0.0) / self.row_height) as usize
    }
}

impl<T> TreeRowPositioner<T> for FixedRowPositioner {
    fn row_bounds(&self, _value: &T, _path: &TreePath, row: usize) -> Rect {
        self.bounds(row)
    }

    fn row_at(&self, y: f64) -> usize {
        self.row_for(y)
    }
}

impl<T> ListRowPositioner<T> for FixedRowPositioner {
    fn row_bounds(&self, _value: &T, row: usize) -> Rect {
        self.bounds(row)
    }

    fn row_at(&self, y: f64) -> usize {
        self.row_for(y)
    }
}

/// Produces the view object for a tree row.
///
/// When a row is (re)materialized, the view may hand back a previously
/// generated view for reuse, but only after [`can_reuse`] agrees. The
/// generator either updates that view in place or returns a replacement.
///
/// [`can_reuse`]: TreeRowGenerator::can_reuse
pub trait TreeRowGenerator<T, V>: Send + Sync {
    /// Reports whether `view` can be recycled to display `value` at `path`.
    ///
    /// The default accepts any previous view.
    fn can_reuse(&self, view: &V, value: &T, path: &TreePath) -> bool {
        let _ = (view, value, path);
        true
    }

    /// Returns the view to display `value` at `path`, as row number `row`.
    fn row_view(&self, value: &T, path: &TreePath, row: usize, previous: Option<V>) -> V;
}

/// Produces the view object for a list or table row.
pub trait ListRowGenerator<T, V>: Send + Sync {
    /// Reports whether `view` can be recycled to display `value`.
    ///
    /// The default accepts any previous view.
    fn can_reuse(&self, view: &V, value: &T) -> bool {
        let _ = (view, value);
        true
    }

    /// Returns the view to display `value` as row number `row`.
    fn row_view(&self, value: &T, row: usize, previous: Option<V>) -> V;
}

/// One in-progress edit of a single row.
///
/// Produced by an editor when editing starts; driven by the owning view's
/// edit session.
pub trait EditOperation<T, V> {
    /// Starts the operation, optionally returning an overlay view that the
    /// owning view swaps in place of the row's display view.
    fn begin(&mut self) -> Option<V>;

    /// Produces the edit result, or `None` to abandon the edit.
    fn complete(&mut self) -> Option<T>;

    /// Tears the operation down, discarding any transient state.
    fn cancel(&mut self);
}

/// Creates edit operations for list rows.
pub trait ListEditor<T, V>: Send + Sync {
    /// Begins editing `value` at `row`, given the row's current view.
    fn edit(&self, value: &T, row: usize, current: &V) -> Box<dyn EditOperation<T, V>>;
}

/// Creates edit operations for table cells.
pub trait TableEditor<T, V>: Send + Sync {
    /// Begins editing `value` at (`row`, `column`), given the cell's current
    /// view.
    fn edit(&self, value: &T, column: usize, row: usize, current: &V) -> Box<dyn EditOperation<T, V>>;
}
