//! The virtualized list views.
//!
//! [`ListView`] is the linear counterpart of the tree view: it windows a
//! [`ListModel`] against a scrollable viewport and materializes view objects
//! only for the rows on screen, recycling them through its [`RowWindow`].
//!
//! [`MutableListView`] wraps a `ListView` over a [`MutableListModel`] and
//! adds the pieces mutation needs: model changes are applied to the window,
//! the selection is shifted so it follows the semantic rows it pointed to,
//! and a single row at a time can be edited in place through a
//! [`ListEditor`].
//!
//! Model changes are delivered cooperatively: the model's change signal
//! queues each batch, and the view applies queued batches at its next entry
//! point (or when [`flush_model_changes`] is called directly). Everything
//! runs on the single UI loop, so a batch is always fully applied before the
//! next mutation is accepted.
//!
//! [`flush_model_changes`]: MutableListView::flush_model_changes

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;
use trellis_core::{ConnectionId, Rect};

use crate::model::{ListChange, ListModel, MutableListModel, SelectionModel};

use super::edit::{EditCompletion, EditSession};
use super::selection_adapter::SelectionAdapter;
use super::traits::{ListEditor, ListRowGenerator, ListRowPositioner, RowView};
use super::tree_view::DEFAULT_SCROLL_CACHE;
use super::window::RowWindow;

/// A virtualized view over a [`ListModel`].
pub struct ListView<T, V, M> {
    model: Arc<M>,
    selection: Option<Arc<SelectionModel<usize>>>,
    window: RowWindow<V>,
    generator: Option<Arc<dyn ListRowGenerator<T, V>>>,
    positioner: Option<Arc<dyn ListRowPositioner<T>>>,
    content_height: f64,
}

impl<T, V, M> ListView<T, V, M>
where
    T: Clone + Send + 'static,
    V: RowView,
    M: ListModel<T>,
{
    /// Creates a view over `model`.
    pub fn new(model: Arc<M>) -> Self {
        Self::with_scroll_cache(model, DEFAULT_SCROLL_CACHE)
    }

    /// Creates a view retaining up to `cache_length` off-window views.
    pub fn with_scroll_cache(model: Arc<M>, cache_length: usize) -> Self {
        Self {
            model,
            selection: None,
            window: RowWindow::new(cache_length),
            generator: None,
            positioner: None,
            content_height: 0.0,
        }
    }

    /// Attaches a shared selection model.
    pub fn with_selection_model(mut self, selection: Arc<SelectionModel<usize>>) -> Self {
        self.set_selection_model(selection);
        self
    }

    /// Attaches a shared selection model in place.
    pub fn set_selection_model(&mut self, selection: Arc<SelectionModel<usize>>) {
        self.selection = Some(selection);
    }

    /// Sets the row generator.
    pub fn with_generator(mut self, generator: Arc<dyn ListRowGenerator<T, V>>) -> Self {
        self.set_generator(generator);
        self
    }

    /// Sets the row positioner.
    pub fn with_positioner(mut self, positioner: Arc<dyn ListRowPositioner<T>>) -> Self {
        self.set_positioner(positioner);
        self
    }

    /// Replaces the row generator and rebuilds the visible rows.
    pub fn set_generator(&mut self, generator: Arc<dyn ListRowGenerator<T, V>>) {
        self.generator = Some(generator);
        self.rebuild_visible();
    }

    /// Replaces the row positioner and rebuilds the visible rows.
    pub fn set_positioner(&mut self, positioner: Arc<dyn ListRowPositioner<T>>) {
        self.positioner = Some(positioner);
        self.rebuild_visible();
    }

    /// The model this view presents.
    pub fn model(&self) -> &Arc<M> {
        &self.model
    }

    /// The selection model, if one is attached.
    pub fn selection_model(&self) -> Option<&Arc<SelectionModel<usize>>> {
        self.selection.as_ref()
    }

    /// The total number of rows.
    pub fn num_rows(&self) -> usize {
        self.model.len()
    }

    /// The value at `row`.
    pub fn get(&self, row: usize) -> Option<T> {
        self.model.get(row)
    }

    /// The height of the full content, per the positioner.
    pub fn content_height(&self) -> f64 {
        self.content_height
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
    // Selection
    // -------------------------------------------------------------------------

    /// Returns `true` if `row` is selected.
    pub fn is_selected(&self, row: usize) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.contains(&row))
    }

    /// Adds `rows` to the selection.
    pub fn add_selection(&self, rows: impl IntoIterator<Item = usize>) {
        if let Some(selection) = &self.selection {
            selection.add_all(rows);
        }
    }

    /// Replaces the selection with `rows`.
    pub fn set_selection(&self, rows: impl IntoIterator<Item = usize>) {
        if let Some(selection) = &self.selection {
            selection.replace_all(rows);
        }
    }

    /// Removes `rows` from the selection.
    pub fn remove_selection(&self, rows: impl IntoIterator<Item = usize>) {
        if let Some(selection) = &self.selection {
            selection.remove_all(rows);
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&self) {
        if let Some(selection) = &self.selection {
            selection.clear();
        }
    }

    // -------------------------------------------------------------------------
    // Viewport
    // -------------------------------------------------------------------------

    /// Recomputes the visible row window after the viewport moved from `old`
    /// to `new`, splicing in rows revealed above or below.
    pub fn viewport_changed(&mut self, old: Rect, new: Rect) {
        let Some(positioner) = self.positioner.clone() else {
            return;
        };

        let num_rows = self.model.len();
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

        if first < old_first {
            for row in first..old_first.min(last + 1) {
                self.materialize_row(row);
            }
        }

        let below_start = old_last.map_or(first, |l| (l + 1).max(first));
        for row in below_start..=last {
            self.materialize_row(row);
        }
    }

    // -------------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------------

    /// Regenerates the view for one visible row, recycling the slot's
    /// previous occupant when the generator allows.
    pub(crate) fn materialize_row(&mut self, row: usize) {
        if !self.window.in_window(row) {
            return;
        }
        let (Some(generator), Some(positioner)) =
            (self.generator.clone(), self.positioner.clone())
        else {
            return;
        };
        let Some(value) = self.model.get(row) else {
            return;
        };

        let previous = self
            .window
            .take_slot(row)
            .filter(|view| generator.can_reuse(view, &value));

        let mut view = generator.row_view(&value, row, previous);
        view.set_bounds(positioner.row_bounds(&value, row));
        self.window.put(row, view);
    }

    /// Re-aligns the window and every visible row after the model grew or
    /// shrank.
    pub(crate) fn model_resized(&mut self) {
        self.refresh_content_height();
        self.window.truncate(self.model.len());
        self.clamp_window();
        self.refresh_visible();
    }

    /// Swaps `view` in for `row`, returning the displaced view. This is the
    /// edit overlay hook.
    pub(crate) fn install_view(&mut self, row: usize, view: V) -> Option<V> {
        self.window.replace(row, view)
    }

    /// Regenerates every row in the visible range.
    fn refresh_visible(&mut self) {
        if let Some(last) = self.window.last_visible() {
            for row in self.window.first_visible()..=last {
                self.materialize_row(row);
            }
        }
    }

    /// Clamps the window to the current row count after the model shrank.
    fn clamp_window(&mut self) {
        let num_rows = self.model.len();
        if num_rows == 0 {
            self.window.set_range(0, None);
            return;
        }
        if let Some(last) = self.window.last_visible() {
            if last > num_rows - 1 {
                let last = num_rows - 1;
                let first = self.window.first_visible().min(last);
                self.window.set_range(first, Some(last));
            }
        }
    }

    fn rebuild_visible(&mut self) {
        self.window.clear_views();
        self.clamp_window();
        self.refresh_visible();
        self.refresh_content_height();
    }

    fn refresh_content_height(&mut self) {
        let len = self.model.len();
        self.content_height = match (len, self.positioner.clone()) {
            (0, _) | (_, None) => 0.0,
            (len, Some(positioner)) => match self.model.get(len - 1) {
                Some(value) => positioner.row_bounds(&value, len - 1).bottom(),
                None => 0.0,
            },
        };
    }
}

/// A virtualized, editable view over a [`MutableListModel`].
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use trellis::model::VecListModel;
/// use trellis::view::MutableListView;
///
/// let model = Arc::new(VecListModel::from(names));
/// let mut list = MutableListView::new(model)
///     .with_generator(Arc::new(NameRowGenerator))
///     .with_positioner(Arc::new(FixedRowPositioner::new(24.0, 320.0)))
///     .with_editor(Arc::new(NameEditor));
///
/// list.start_editing(1);
/// assert!(list.editing());
/// list.complete_editing();
/// ```
pub struct MutableListView<T: Clone + Send + 'static, V, M: ListModel<T>> {
    list: ListView<T, V, M>,
    editor: Option<Arc<dyn ListEditor<T, V>>>,
    session: EditSession<T, V>,
    pending: Arc<Mutex<Vec<ListChange<T>>>>,
    model_connection: ConnectionId,
}

impl<T, V, M> MutableListView<T, V, M>
where
    T: Clone + PartialEq + Send + 'static,
    V: RowView,
    M: MutableListModel<T>,
{
    /// Creates a view over `model`, subscribing to its change stream.
    pub fn new(model: Arc<M>) -> Self {
        Self::with_scroll_cache(model, DEFAULT_SCROLL_CACHE)
    }

    /// Creates a view retaining up to `cache_length` off-window views.
    pub fn with_scroll_cache(model: Arc<M>, cache_length: usize) -> Self {
        let pending: Arc<Mutex<Vec<ListChange<T>>>> = Arc::new(Mutex::new(Vec::new()));

        let queue = pending.clone();
        let model_connection = model.signals().changed.connect(move |change| {
            queue.lock().push(change.clone());
        });

        Self {
            list: ListView::with_scroll_cache(model, cache_length),
            editor: None,
            session: EditSession::new(),
            pending,
            model_connection,
        }
    }

    /// Attaches a shared selection model.
    pub fn with_selection_model(mut self, selection: Arc<SelectionModel<usize>>) -> Self {
        self.list.set_selection_model(selection);
        self
    }

    /// Sets the row generator.
    pub fn with_generator(mut self, generator: Arc<dyn ListRowGenerator<T, V>>) -> Self {
        self.list.set_generator(generator);
        self
    }

    /// Sets the row positioner.
    pub fn with_positioner(mut self, positioner: Arc<dyn ListRowPositioner<T>>) -> Self {
        self.list.set_positioner(positioner);
        self
    }

    /// Sets the editor enabling in-place editing.
    pub fn with_editor(mut self, editor: Arc<dyn ListEditor<T, V>>) -> Self {
        self.editor = Some(editor);
        self
    }

    /// Sets or removes the editor.
    pub fn set_editor(&mut self, editor: Option<Arc<dyn ListEditor<T, V>>>) {
        self.editor = editor;
    }

    /// The underlying read-only view.
    pub fn as_list_view(&self) -> &ListView<T, V, M> {
        &self.list
    }

    /// The model this view presents.
    pub fn model(&self) -> &Arc<M> {
        &self.list.model
    }

    /// The total number of rows.
    pub fn num_rows(&self) -> usize {
        self.list.num_rows()
    }

    /// The value at `row`.
    pub fn get(&self, row: usize) -> Option<T> {
        self.list.get(row)
    }

    /// The materialized view for `row`, if the row is on screen.
    pub fn row_view(&self, row: usize) -> Option<&V> {
        self.list.row_view(row)
    }

    /// Forwards a viewport move to the underlying view, applying any queued
    /// model changes first.
    pub fn viewport_changed(&mut self, old: Rect, new: Rect) {
        self.flush_model_changes();
        self.list.viewport_changed(old, new);
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Appends `value`.
    pub fn push(&mut self, value: T) {
        self.list.model.push(value);
        self.flush_model_changes();
    }

    /// Inserts `value` at `row`.
    pub fn insert(&mut self, row: usize, value: T) {
        self.list.model.insert(row, value);
        self.flush_model_changes();
    }

    /// Inserts all of `values` starting at `row`, as one change batch.
    pub fn insert_all(&mut self, row: usize, values: Vec<T>) {
        self.list.model.insert_all(row, values);
        self.flush_model_changes();
    }

    /// Removes the value at `row`.
    pub fn remove_at(&mut self, row: usize) -> Option<T> {
        let removed = self.list.model.remove_at(row);
        self.flush_model_changes();
        removed
    }

    /// Removes the first occurrence of `value`.
    pub fn remove(&mut self, value: &T) -> Option<usize> {
        let removed = self.list.model.remove(value);
        self.flush_model_changes();
        removed
    }

    /// Replaces the value at `row`.
    ///
    /// When the new value compares equal to the prior one the model stays
    /// silent, so the row is explicitly refreshed to pick up any visual
    /// formatting change.
    pub fn set(&mut self, row: usize, value: T) {
        let prior = self.list.model.set(row, value.clone());
        self.flush_model_changes();
        if prior == Some(value) {
            self.list.materialize_row(row);
        }
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        self.list.model.clear();
        self.flush_model_changes();
    }

    // -------------------------------------------------------------------------
    // Model change application
    // -------------------------------------------------------------------------

    /// Applies every queued model change batch to the window and the
    /// selection.
    ///
    /// Mutations made through this view flush automatically; when the model
    /// is mutated from elsewhere, the owner calls this (or any entry point
    /// that does) on the UI loop.
    pub fn flush_model_changes(&mut self) {
        loop {
            let changes: Vec<ListChange<T>> = std::mem::take(&mut *self.pending.lock());
            if changes.is_empty() {
                return;
            }
            for change in changes {
                self.apply_change(&change);
            }
        }
    }

    fn apply_change(&mut self, change: &ListChange<T>) {
        // An index present on both sides is an in-place edit; everything
        // else genuinely moved rows.
        let true_removed: BTreeSet<usize> = change
            .removed
            .keys()
            .filter(|index| !change.added.contains_key(index))
            .copied()
            .collect();
        let true_added: BTreeSet<usize> = change
            .added
            .keys()
            .filter(|index| !change.removed.contains_key(index))
            .copied()
            .collect();

        tracing::trace!(
            target: "trellis::view",
            removed = true_removed.len(),
            added = true_added.len(),
            "applying list change"
        );

        if let Some(selection) = &self.list.selection {
            let adapter = SelectionAdapter::new(selection.clone());
            adapter.rows_removed(&true_removed);
            adapter.rows_inserted(&true_added);
        }

        if !true_removed.is_empty() || !true_added.is_empty() {
            self.list.model_resized();
        } else {
            for row in change.added.keys() {
                if change.removed.contains_key(row) {
                    self.list.materialize_row(*row);
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Returns `true` while a row is being edited.
    pub fn editing(&self) -> bool {
        self.session.is_editing()
    }

    /// The row being edited, if any.
    pub fn editing_row(&self) -> Option<usize> {
        self.session.editing_row()
    }

    /// Starts editing `row`.
    ///
    /// A silent no-op when no editor is configured, the row is absent from
    /// the model, or the row has no materialized view. On success the
    /// selection is replaced with the edited row and the editor's overlay
    /// view, if any, takes the display view's place.
    pub fn start_editing(&mut self, row: usize) {
        self.flush_model_changes();

        let Some(editor) = self.editor.clone() else {
            return;
        };
        let Some(value) = self.list.model.get(row) else {
            return;
        };

        let operation = {
            let Some(current) = self.list.window.view(row) else {
                return;
            };
            editor.edit(&value, row, current)
        };

        // Starting a new edit implicitly cancels any previous one; restore
        // that row's display view.
        let previous_edit = self.session.editing_row().filter(|&r| r != row);

        if let Some(mut overlay) = self.session.begin(row, operation) {
            if let Some(positioner) = self.list.positioner.clone() {
                overlay.set_bounds(positioner.row_bounds(&value, row));
            }
            self.list.window.replace(row, overlay);
        }

        if let Some(stale) = previous_edit {
            self.list.materialize_row(stale);
        }

        if let Some(selection) = &self.list.selection {
            selection.replace_all([row]);
        }
    }

    /// Completes the edit in progress, writing the result to the model.
    ///
    /// The session is idle before the write happens, so observers of the
    /// model change never see a stale editing state. A model write that
    /// changes nothing still refreshes the row so formatting-only edits
    /// render.
    pub fn complete_editing(&mut self) {
        match self.session.complete() {
            EditCompletion::Inactive => {}
            EditCompletion::Cancelled { row } => self.list.materialize_row(row),
            EditCompletion::Committed { row, value } => {
                let prior = self.list.model.set(row, value.clone());
                self.flush_model_changes();
                if prior == Some(value) {
                    self.list.materialize_row(row);
                }
            }
        }
    }

    /// Cancels the edit in progress, restoring the row's display view.
    pub fn cancel_editing(&mut self) {
        if let Some(row) = self.session.cancel() {
            self.list.materialize_row(row);
        }
    }

    /// Loss of focus implicitly cancels any edit in progress.
    pub fn focus_lost(&mut self) {
        self.cancel_editing();
    }
}

impl<T: Clone + Send + 'static, V, M: ListModel<T>> Drop for MutableListView<T, V, M> {
    fn drop(&mut self) {
        self.list
            .model
            .signals()
            .changed
            .disconnect(self.model_connection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VecListModel;
    use crate::view::traits::{EditOperation, FixedRowPositioner};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ROW_HEIGHT: f64 = 20.0;

    #[derive(Debug, Clone, PartialEq)]
    struct Label {
        text: String,
        editing: bool,
        bounds: Rect,
    }

    impl RowView for Label {
        fn set_bounds(&mut self, bounds: Rect) {
            self.bounds = bounds;
        }
    }

    struct LabelGenerator {
        created: AtomicUsize,
    }

    impl LabelGenerator {
        fn new() -> Self {
            Self {
                created: AtomicUsize::new(0),
            }
        }
    }

    impl ListRowGenerator<String, Label> for LabelGenerator {
        fn row_view(&self, value: &String, _row: usize, previous: Option<Label>) -> Label {
            match previous {
                Some(mut label) => {
                    label.text = value.clone();
                    label.editing = false;
                    label
                }
                None => {
                    self.created.fetch_add(1, Ordering::SeqCst);
                    Label {
                        text: value.clone(),
                        editing: false,
                        bounds: Rect::ZERO,
                    }
                }
            }
        }
    }

    /// An editor whose operation rewrites the value, or abandons the edit
    /// when given `None`.
    struct TextEditor {
        replacement: Option<String>,
    }

    struct TextEditOperation {
        replacement: Option<String>,
    }

    impl EditOperation<String, Label> for TextEditOperation {
        fn begin(&mut self) -> Option<Label> {
            Some(Label {
                text: "<editing>".to_string(),
                editing: true,
                bounds: Rect::ZERO,
            })
        }

        fn complete(&mut self) -> Option<String> {
            self.replacement.clone()
        }

        fn cancel(&mut self) {}
    }

    impl ListEditor<String, Label> for TextEditor {
        fn edit(&self, _value: &String, _row: usize, _current: &Label) -> Box<dyn EditOperation<String, Label>> {
            Box::new(TextEditOperation {
                replacement: self.replacement.clone(),
            })
        }
    }

    fn strings(values: &[&str]) -> Arc<VecListModel<String>> {
        Arc::new(VecListModel::from(
            values.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        ))
    }

    fn list(model: Arc<VecListModel<String>>) -> MutableListView<String, Label, VecListModel<String>> {
        MutableListView::new(model)
            .with_generator(Arc::new(LabelGenerator::new()))
            .with_positioner(Arc::new(FixedRowPositioner::new(ROW_HEIGHT, 200.0)))
    }

    fn show_rows(view: &mut MutableListView<String, Label, VecListModel<String>>, height: f64) {
        view.viewport_changed(Rect::ZERO, Rect::new(0.0, 0.0, 200.0, height));
    }

    #[test]
    fn test_viewport_materializes_visible_rows() {
        let model = Arc::new(VecListModel::from(
            (0..50).map(|i| format!("row{i}")).collect::<Vec<_>>(),
        ));
        let mut view: MutableListView<String, Label, VecListModel<String>> =
            MutableListView::new(model)
                .with_generator(Arc::new(LabelGenerator::new()))
                .with_positioner(Arc::new(FixedRowPositioner::new(ROW_HEIGHT, 200.0)));

        show_rows(&mut view, 80.0); // rows 0..=4

        let window = view.as_list_view().window();
        assert_eq!(window.window_len(), 5);
        assert_eq!(window.materialized_in_window(), 5);
        assert_eq!(view.row_view(2).map(|l| l.text.as_str()), Some("row2"));
        assert!(view.row_view(10).is_none());
        assert_eq!(view.as_list_view().content_height(), 50.0 * ROW_HEIGHT);
    }

    #[test]
    fn test_insert_above_window_refreshes_rows() {
        let mut view = list(strings(&["a", "b", "c"]));
        show_rows(&mut view, 100.0);

        view.insert(0, "start".to_string());

        assert_eq!(view.num_rows(), 4);
        assert_eq!(view.row_view(0).map(|l| l.text.as_str()), Some("start"));
        assert_eq!(view.row_view(1).map(|l| l.text.as_str()), Some("a"));
        assert_eq!(view.row_view(2).map(|l| l.text.as_str()), Some("b"));
        // The window itself does not grow until the next viewport event.
        assert!(view.row_view(3).is_none());
    }

    #[test]
    fn test_remove_truncates_and_refreshes() {
        let mut view = list(strings(&["a", "b", "c"]));
        show_rows(&mut view, 100.0); // window covers all 3 rows

        view.remove_at(1);

        assert_eq!(view.num_rows(), 2);
        assert_eq!(view.row_view(0).map(|l| l.text.as_str()), Some("a"));
        assert_eq!(view.row_view(1).map(|l| l.text.as_str()), Some("c"));
        // The stale third row is gone from the window.
        assert!(view.as_list_view().window().view(2).is_none());
        assert_eq!(view.as_list_view().content_height(), 2.0 * ROW_HEIGHT);
    }

    #[test]
    fn test_selection_shifts_on_insert() {
        let selection = Arc::new(SelectionModel::new());
        let mut view = list(strings(&["a", "b", "c"])).with_selection_model(selection.clone());
        selection.add_all([0usize, 2]);

        view.insert_all(1, vec!["x".to_string(), "y".to_string()]);

        // Index 0 is before the insertion point; index 2 shifts by two.
        assert_eq!(selection.iter(), vec![0, 4]);
    }

    #[test]
    fn test_selection_drops_removed_row_and_shifts_rest() {
        let selection = Arc::new(SelectionModel::new());
        let mut view = list(strings(&["a", "b", "c", "d"])).with_selection_model(selection.clone());
        selection.add_all([1usize, 3]);

        view.remove_at(1);

        assert_eq!(selection.iter(), vec![2]);
    }

    #[test]
    fn test_external_mutation_applies_on_flush() {
        let selection = Arc::new(SelectionModel::new());
        let model = strings(&["a", "b"]);
        let mut view = list(model.clone()).with_selection_model(selection.clone());
        selection.add(1usize);

        // Mutation from outside the view is queued until the next entry
        // point on the UI loop.
        model.insert(0, "first".to_string());
        assert_eq!(selection.iter(), vec![1]);

        view.flush_model_changes();
        assert_eq!(selection.iter(), vec![2]);
    }

    #[test]
    fn test_start_editing_without_editor_is_noop() {
        let mut view = list(strings(&["a", "b", "c"]));
        show_rows(&mut view, 100.0);

        view.start_editing(1);
        assert!(!view.editing());
    }

    #[test]
    fn test_start_editing_swaps_in_overlay() {
        let mut view = list(strings(&["a", "b", "c"])).with_editor(Arc::new(TextEditor {
            replacement: Some("B".to_string()),
        }));
        show_rows(&mut view, 100.0);

        view.start_editing(1);

        assert!(view.editing());
        assert_eq!(view.editing_row(), Some(1));
        let overlay = view.row_view(1).expect("overlay installed");
        assert!(overlay.editing);
        assert_eq!(overlay.bounds, Rect::new(0.0, ROW_HEIGHT, 200.0, ROW_HEIGHT));
    }

    #[test]
    fn test_start_editing_absent_row_is_noop() {
        let mut view = list(strings(&["a"])).with_editor(Arc::new(TextEditor {
            replacement: None,
        }));
        show_rows(&mut view, 100.0);

        view.start_editing(5);
        assert!(!view.editing());
    }

    #[test]
    fn test_editing_row_replaces_selection() {
        let selection = Arc::new(SelectionModel::new());
        let mut view = list(strings(&["a", "b", "c"]))
            .with_selection_model(selection.clone())
            .with_editor(Arc::new(TextEditor {
                replacement: Some("B".to_string()),
            }));
        show_rows(&mut view, 100.0);
        selection.add_all([0usize, 2]);

        view.start_editing(1);
        assert_eq!(selection.iter(), vec![1]);
    }

    #[test]
    fn test_cancel_editing_restores_display_view() {
        let mut view = list(strings(&["a", "b", "c"])).with_editor(Arc::new(TextEditor {
            replacement: Some("unused".to_string()),
        }));
        show_rows(&mut view, 100.0);

        view.start_editing(1);
        view.cancel_editing();

        assert!(!view.editing());
        // The model value is untouched and the display view is back.
        assert_eq!(view.get(1), Some("b".to_string()));
        let label = view.row_view(1).expect("display view restored");
        assert!(!label.editing);
        assert_eq!(label.text, "b");
    }

    #[test]
    fn test_complete_editing_writes_back() {
        let mut view = list(strings(&["a", "b", "c"])).with_editor(Arc::new(TextEditor {
            replacement: Some("B".to_string()),
        }));
        show_rows(&mut view, 100.0);

        view.start_editing(1);
        view.complete_editing();

        assert!(!view.editing());
        assert_eq!(view.get(1), Some("B".to_string()));
        assert_eq!(view.row_view(1).map(|l| l.text.as_str()), Some("B"));
    }

    #[test]
    fn test_complete_editing_with_unchanged_value_still_refreshes() {
        let mut view = list(strings(&["a", "b", "c"])).with_editor(Arc::new(TextEditor {
            replacement: Some("b".to_string()),
        }));
        show_rows(&mut view, 100.0);

        view.start_editing(1);
        assert!(view.row_view(1).is_some_and(|l| l.editing));

        // The model will not announce `b -> b`, so the view must refresh the
        // row itself to drop the overlay.
        view.complete_editing();

        assert!(!view.editing());
        let label = view.row_view(1).expect("display view restored");
        assert!(!label.editing);
        assert_eq!(label.text, "b");
    }

    #[test]
    fn test_absent_result_cancels() {
        let mut view = list(strings(&["a", "b", "c"])).with_editor(Arc::new(TextEditor {
            replacement: None,
        }));
        show_rows(&mut view, 100.0);

        view.start_editing(2);
        view.complete_editing();

        assert!(!view.editing());
        assert_eq!(view.get(2), Some("c".to_string()));
        assert!(view.row_view(2).is_some_and(|l| !l.editing));
    }

    #[test]
    fn test_focus_loss_cancels_edit() {
        let mut view = list(strings(&["a", "b"])).with_editor(Arc::new(TextEditor {
            replacement: Some("A".to_string()),
        }));
        show_rows(&mut view, 100.0);

        view.start_editing(0);
        view.focus_lost();

        assert!(!view.editing());
        assert_eq!(view.get(0), Some("a".to_string()));
    }
}
