//! The virtualized tree view.
//!
//! [`TreeView`] maps a hierarchical model onto a flat sequence of visible
//! rows and materializes view objects only for the rows inside the current
//! viewport. It owns the [`RowMapper`] (row↔path mapping and expansion
//! state) and the [`RowWindow`] (materialized views), consumes a
//! [`TreeRowGenerator`] and [`TreeRowPositioner`] supplied by the host, and
//! translates row-addressed selection calls onto a shared path-addressed
//! [`SelectionModel`].
//!
//! Structural operations are batched: one `expanded`/`collapsed` signal per
//! call, carrying the paths whose state actually changed, and none at all
//! when nothing changed.
//!
//! [`SelectionModel`]: crate::model::SelectionModel

use std::collections::BTreeSet;
use std::sync::Arc;

use trellis_core::{Rect, Signal};

use crate::model::{SelectionModel, TreeModel, TreePath};

use super::expansion::maximal_expansion;
use super::row_mapper::{ancestral_siblings_after, RowMapper};
use super::traits::{RowView, TreeRowGenerator, TreeRowPositioner};
use super::window::RowWindow;

/// The number of off-window views retained for reuse when none is specified.
pub const DEFAULT_SCROLL_CACHE: usize = 10;

/// A virtualized view over a [`TreeModel`].
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use trellis::model::{SimpleTreeModel, TreePath};
/// use trellis::view::TreeView;
///
/// let model = Arc::new(SimpleTreeModel::new(file_tree()));
/// let mut tree = TreeView::new(model)
///     .with_generator(Arc::new(FileRowGenerator))
///     .with_positioner(Arc::new(FixedRowPositioner::new(24.0, 320.0)));
///
/// tree.expanded.connect(|paths| {
///     println!("{} paths expanded", paths.len());
/// });
///
/// tree.expand(TreePath::from([0]));
/// ```
pub struct TreeView<T, V, M> {
    model: Arc<M>,
    selection: Option<Arc<SelectionModel<TreePath>>>,
    mapper: RowMapper,
    window: RowWindow<V>,
    generator: Option<Arc<dyn TreeRowGenerator<T, V>>>,
    positioner: Option<Arc<dyn TreeRowPositioner<T>>>,
    content_height: f64,

    /// Emitted once per expand batch with the paths that actually expanded.
    pub expanded: Signal<Vec<TreePath>>,
    /// Emitted once per collapse batch with the paths that actually
    /// collapsed.
    pub collapsed: Signal<Vec<TreePath>>,
}

impl<T, V, M> TreeView<T, V, M>
where
    T: Clone,
    V: RowView,
    M: TreeModel<T>,
{
    /// Creates a view over `model` with the root hidden and nothing
    /// expanded.
    pub fn new(model: Arc<M>) -> Self {
        Self::with_scroll_cache(model, DEFAULT_SCROLL_CACHE)
    }

    /// Creates a view retaining up to `cache_length` off-window views.
    pub fn with_scroll_cache(model: Arc<M>, cache_length: usize) -> Self {
        let mut mapper = RowMapper::new();
        mapper.structure_changed(&*model);

        Self {
            model,
            selection: None,
            mapper,
            window: RowWindow::new(cache_length),
            generator: None,
            positioner: None,
            content_height: 0.0,
            expanded: Signal::new(),
            collapsed: Signal::new(),
        }
    }

    /// Attaches a shared selection model.
    pub fn with_selection_model(mut self, selection: Arc<SelectionModel<TreePath>>) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Sets the row generator.
    pub fn with_generator(mut self, generator: Arc<dyn TreeRowGenerator<T, V>>) -> Self {
        self.set_generator(generator);
        self
    }

    /// Sets the row positioner.
    pub fn with_positioner(mut self, positioner: Arc<dyn TreeRowPositioner<T>>) -> Self {
        self.set_positioner(positioner);
        self
    }

    /// Replaces the row generator and rebuilds the visible rows.
    pub fn set_generator(&mut self, generator: Arc<dyn TreeRowGenerator<T, V>>) {
        self.generator = Some(generator);
        self.rebuild_visible();
    }

    /// Replaces the row positioner and rebuilds the visible rows.
    pub fn set_positioner(&mut self, positioner: Arc<dyn TreeRowPositioner<T>>) {
        self.positioner = Some(positioner);
        self.rebuild_visible();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// The model this view presents.
    pub fn model(&self) -> &Arc<M> {
        &self.model
    }

    /// The selection model, if one is attached.
    pub fn selection_model(&self) -> Option<&Arc<SelectionModel<TreePath>>> {
        self.selection.as_ref()
    }

    /// The total number of visible rows.
    pub fn num_rows(&self) -> usize {
        self.mapper.num_rows()
    }

    /// The height of the full visible content, per the positioner.
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Whether the root node occupies row 0.
    pub fn root_visible(&self) -> bool {
        self.mapper.root_visible()
    }

    /// The value at `path`, or `None` for an invalid path.
    pub fn get(&self, path: &TreePath) -> Option<T> {
        self.model.get(path)
    }

    /// The value shown at visible row `row`.
    pub fn get_row(&mut self, row: usize) -> Option<T> {
        let model = self.model.clone();
        let path = self.mapper.path_from_row(&*model, row)?;
        model.get(&path)
    }

    /// Returns `true` if the node at `path` can never have children.
    pub fn is_leaf(&self, path: &TreePath) -> bool {
        self.model.is_leaf(path)
    }

    /// Returns `true` if `path` is expanded.
    pub fn is_expanded(&self, path: &TreePath) -> bool {
        self.mapper.is_expanded(path)
    }

    /// Returns `true` if `path` currently has a row, independent of
    /// scrolling.
    pub fn is_visible(&self, path: &TreePath) -> bool {
        self.mapper.is_visible(path)
    }

    /// Returns `true` if `row` maps to a visible path.
    pub fn is_row_visible(&mut self, row: usize) -> bool {
        let model = self.model.clone();
        self.mapper.path_from_row(&*model, row).is_some()
    }

    /// The path at visible row `row`.
    pub fn path_at_row(&mut self, row: usize) -> Option<TreePath> {
        let model = self.model.clone();
        self.mapper.path_from_row(&*model, row)
    }

    /// The visible row showing `path`.
    pub fn row_of_path(&mut self, path: &TreePath) -> Option<usize> {
        let model = self.model.clone();
        self.mapper.row_from_path(&*model, path)
    }

    /// The materialized view for `row`, if the row is on screen.
    pub fn row_view(&self, row: usize) -> Option<&V> {
        self.window.view(row)
    }

    /// The materialized row window.
    pub fn window(&self) -> &RowWindow<V> {
        &self.window
    }

    // -------------------------------------------------------------------------
    // Root visibility
    // -------------------------------------------------------------------------

    /// Shows or hides the root row. The visible rows are rebuilt when the
    /// flag changes.
    pub fn set_root_visible(&mut self, visible: bool) {
        let model = self.model.clone();
        if self.mapper.set_root_visible(&*model, visible) {
            self.rebuild_visible();
        }
    }

    // -------------------------------------------------------------------------
    // Expand / Collapse
    // -------------------------------------------------------------------------

    /// Expands a single path.
    pub fn expand(&mut self, path: TreePath) {
        self.expand_paths([path]);
    }

    /// Expands every path in `paths` that is not already expanded, as one
    /// batch.
    ///
    /// Paths are processed in document order, descendants before their
    /// ancestors, so a deep target below a still-collapsed ancestor is
    /// marked cheaply and the ancestor's expand then splices the whole
    /// revealed subtree at once. Rows positioned after each revealed subtree
    /// are refreshed. One `expanded` signal fires with the paths that
    /// actually changed; none fires when the batch is empty.
    pub fn expand_paths(&mut self, paths: impl IntoIterator<Item = TreePath>) {
        let model = self.model.clone();
        let candidates = self.mapper.expansion().expand_candidates(paths);
        if candidates.is_empty() {
            return;
        }

        let mut pending_refresh: BTreeSet<TreePath> = BTreeSet::new();

        for path in &candidates {
            self.mapper.set_expanded(&*model, path.clone(), true);

            if self.mapper.is_visible(path) {
                pending_refresh.remove(path);
                self.content_height += self.height_below(path);

                if let Some(row) = self.mapper.row_from_path(&*model, path) {
                    self.place_row(path, row);
                }

                pending_refresh.extend(ancestral_siblings_after(&*model, path));
            }
        }

        for path in &pending_refresh {
            self.refresh_path(path);
        }

        tracing::debug!(target: "trellis::view", count = candidates.len(), "expanded");
        self.expanded.emit(candidates);
    }

    /// Expands the paths mapped from visible rows, as one batch.
    pub fn expand_rows(&mut self, rows: impl IntoIterator<Item = usize>) {
        let paths = self.paths_for_rows(rows);
        self.expand_paths(paths);
    }

    /// Expands every non-leaf path in the model, as one batch.
    pub fn expand_all(&mut self) {
        let paths = maximal_expansion(&*self.model);
        self.expand_paths(paths);
    }

    /// Collapses a single path.
    pub fn collapse(&mut self, path: TreePath) {
        self.collapse_paths([path]);
    }

    /// Collapses every path in `paths` that is currently expanded, as one
    /// batch.
    ///
    /// Deepest paths within a branch are unmarked before their ancestors so
    /// row-count deltas accumulate correctly. Rows after each hidden subtree
    /// are refreshed into their shifted positions, and materialized views
    /// beyond the new row count are evicted. One `collapsed` signal fires
    /// with the paths that actually changed.
    pub fn collapse_paths(&mut self, paths: impl IntoIterator<Item = TreePath>) {
        let model = self.model.clone();
        let candidates = self.mapper.expansion().collapse_candidates(paths);
        if candidates.is_empty() {
            return;
        }

        for path in &candidates {
            self.mapper.set_expanded(&*model, path.clone(), false);

            if self.mapper.is_visible(path) {
                if let Some(row) = self.mapper.row_from_path(&*model, path) {
                    self.materialize(path, row);
                }
                for sibling in ancestral_siblings_after(&*model, path) {
                    self.refresh_path(&sibling);
                }
            }
        }

        self.window.truncate(self.mapper.num_rows());
        self.refresh_content_height();

        tracing::debug!(target: "trellis::view", count = candidates.len(), "collapsed");
        self.collapsed.emit(candidates);
    }

    /// Collapses the paths mapped from visible rows, as one batch.
    pub fn collapse_rows(&mut self, rows: impl IntoIterator<Item = usize>) {
        let paths = self.paths_for_rows(rows);
        self.collapse_paths(paths);
    }

    /// Collapses everything, as one batch.
    pub fn collapse_all(&mut self) {
        let paths = self.mapper.expansion().expanded_paths();
        self.collapse_paths(paths);
    }

    /// Expands all ancestors of `path`, as one batch, so its row exists.
    pub fn make_visible(&mut self, path: &TreePath) {
        self.expand_paths(path.ancestors());
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Returns `true` if `path` is selected.
    pub fn is_selected(&self, path: &TreePath) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.contains(path))
    }

    /// Returns `true` if the path at `row` is selected.
    pub fn is_row_selected(&mut self, row: usize) -> bool {
        self.path_at_row(row)
            .is_some_and(|path| self.is_selected(&path))
    }

    /// Adds `paths` to the selection.
    pub fn add_selection(&mut self, paths: impl IntoIterator<Item = TreePath>) {
        if let Some(selection) = &self.selection {
            selection.add_all(paths);
        }
    }

    /// Adds the paths at `rows` to the selection.
    pub fn add_selection_rows(&mut self, rows: impl IntoIterator<Item = usize>) {
        let paths = self.paths_for_rows(rows);
        self.add_selection(paths);
    }

    /// Replaces the selection with `paths`.
    pub fn set_selection(&mut self, paths: impl IntoIterator<Item = TreePath>) {
        if let Some(selection) = &self.selection {
            selection.replace_all(paths);
        }
    }

    /// Replaces the selection with the paths at `rows`.
    pub fn set_selection_rows(&mut self, rows: impl IntoIterator<Item = usize>) {
        let paths = self.paths_for_rows(rows);
        self.set_selection(paths);
    }

    /// Removes `paths` from the selection.
    pub fn remove_selection(&mut self, paths: impl IntoIterator<Item = TreePath>) {
        if let Some(selection) = &self.selection {
            selection.remove_all(paths);
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        if let Some(selection) = &self.selection {
            selection.clear();
        }
    }

    // -------------------------------------------------------------------------
    // Viewport
    // -------------------------------------------------------------------------

    /// Recomputes the visible row window after the viewport moved from `old`
    /// to `new`, splicing in rows revealed above or below.
    ///
    /// Views scrolled out of the window stay in their slots, bounded by the
    /// scroll cache, and are recycled as rows re-enter view.
    pub fn viewport_changed(&mut self, old: Rect, new: Rect) {
        let Some(positioner) = self.positioner.clone() else {
            return;
        };
        let model = self.model.clone();

        let num_rows = self.mapper.num_rows();
        if num_rows == 0 || new.is_empty() {
            self.window.set_range(0, None);
            return;
        }

        let old_first = self.window.first_visible();
        let old_last = self.window.last_visible();

        let first = if new.y() != old.y() || old_last.is_none() {
            positioner.row_at(new.y())
        } else {
            old_first
        }
        .min(num_rows - 1);

        let last = if new.bottom() != old.bottom() || old_last.is_none() {
            positioner.row_at(new.bottom())
        } else {
            old_last.unwrap_or(0)
        }
        .min(num_rows - 1);

        let first = first.min(last);
        self.window.set_range(first, Some(last));

        tracing::trace!(
            target: "trellis::view",
            first,
            last,
            "viewport window moved"
        );

        // Rows revealed above the old window.
        if first < old_first {
            for row in first..old_first.min(last + 1) {
                if let Some(path) = self.mapper.path_from_row(&*model, row) {
                    self.materialize(&path, row);
                }
            }
        }

        // Rows revealed below the old window (everything, on the first
        // event).
        let below_start = old_last.map_or(first, |l| (l + 1).max(first));
        for row in below_start..=last {
            if let Some(path) = self.mapper.path_from_row(&*model, row) {
                self.materialize(&path, row);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------------

    fn paths_for_rows(&mut self, rows: impl IntoIterator<Item = usize>) -> Vec<TreePath> {
        let model = self.model.clone();
        rows.into_iter()
            .filter_map(|row| self.mapper.path_from_row(&*model, row))
            .collect()
    }

    /// Regenerates the view for one visible row, recycling the slot's
    /// previous occupant when the generator allows.
    fn materialize(&mut self, path: &TreePath, row: usize) {
        if !self.window.in_window(row) {
            return;
        }
        let (Some(generator), Some(positioner)) =
            (self.generator.clone(), self.positioner.clone())
        else {
            return;
        };
        let Some(value) = self.model.get(path) else {
            return;
        };

        let previous = self
            .window
            .take_slot(row)
            .filter(|view| generator.can_reuse(view, &value, path));

        let mut view = generator.row_view(&value, path, row, previous);
        view.set_bounds(positioner.row_bounds(&value, path, row));
        self.window.put(row, view);
    }

    /// Materializes `path` at `row` and walks its visible subtree, returning
    /// the row after it. Subtrees entirely below the window are skipped by
    /// their row count.
    fn place_row(&mut self, path: &TreePath, row: usize) -> usize {
        let model = self.model.clone();

        if self.window.last_visible().is_none_or(|last| row > last) {
            return row + 1 + self.mapper.rows_below(&*model, path);
        }

        self.materialize(path, row);

        let mut next = row + 1;
        if path.is_root() || self.mapper.is_expanded(path) {
            for i in 0..model.num_children(path) {
                next = self.place_row(&path.child(i), next);
            }
        }
        next
    }

    /// Refreshes `path`'s row and visible subtree at their current
    /// positions, if the path has a row at all.
    fn refresh_path(&mut self, path: &TreePath) {
        let model = self.model.clone();
        if let Some(row) = self.mapper.row_from_path(&*model, path) {
            self.place_row(path, row);
        }
    }

    /// Clamps the window to the current row count and regenerates every
    /// visible row.
    fn rebuild_visible(&mut self) {
        self.window.clear_views();

        let num_rows = self.mapper.num_rows();
        if num_rows == 0 {
            self.window.set_range(0, None);
        } else if let Some(last) = self.window.last_visible() {
            let last = last.min(num_rows - 1);
            let first = self.window.first_visible().min(last);
            self.window.set_range(first, Some(last));

            let model = self.model.clone();
            for row in first..=last {
                if let Some(path) = self.mapper.path_from_row(&*model, row) {
                    self.materialize(&path, row);
                }
            }
        }

        self.refresh_content_height();
    }

    /// The height of the visible subtree below `path`, from the positioner's
    /// row height for the node.
    fn height_below(&mut self, path: &TreePath) -> f64 {
        let Some(positioner) = self.positioner.clone() else {
            return 0.0;
        };
        let model = self.model.clone();
        let Some(value) = model.get(path) else {
            return 0.0;
        };

        let rows = self.mapper.rows_below(&*model, path);
        rows as f64 * positioner.row_bounds(&value, path, 0).height()
    }

    fn refresh_content_height(&mut self) {
        let root = TreePath::root();
        let mut height = self.height_below(&root);

        if self.mapper.root_visible() {
            if let (Some(positioner), Some(value)) =
                (self.positioner.clone(), self.model.get(&root))
            {
                height += positioner.row_bounds(&value, &root, 0).height();
            }
        }

        self.content_height = height;
    }
}
