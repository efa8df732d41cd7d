//! The virtualized table views.
//!
//! A [`TableView`] presents one [`ListModel`] through several columns. Each
//! column owns a [`ListView`] over the shared model whose generator produces
//! that column's cells, so every column windows the same row range through
//! the same row positioner and the row-management machinery is shared with
//! the plain list. Selection is row-addressed and lives at the table level,
//! on one shared [`SelectionModel`].
//!
//! Column sizing is deliberately simple: preferred widths clamped to each
//! column's min/max, laid out left to right, with the last column absorbing
//! any remaining width. Constraint-based column policies belong to the host.
//!
//! [`MutableTableView`] adds model mutation, selection shifting, and
//! cell-level in-place editing through a [`TableEditor`].

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;
use trellis_core::{ConnectionId, Rect};

use crate::model::{ListChange, ListModel, MutableListModel, SelectionModel};

use super::edit::{EditCompletion, EditSession};
use super::list_view::ListView;
use super::selection_adapter::SelectionAdapter;
use super::traits::{ListRowGenerator, ListRowPositioner, RowView, TableEditor};
use super::tree_view::DEFAULT_SCROLL_CACHE;

/// A column under construction: header, cell generator, and width limits.
pub struct ColumnSpec<T, V> {
    header: Option<String>,
    generator: Arc<dyn ListRowGenerator<T, V>>,
    preferred_width: Option<f64>,
    min_width: f64,
    max_width: Option<f64>,
}

impl<T, V> ColumnSpec<T, V> {
    /// Sets the preferred width.
    pub fn width(&mut self, width: f64) -> &mut Self {
        self.preferred_width = Some(width);
        self
    }

    /// Sets the minimum width.
    pub fn min_width(&mut self, width: f64) -> &mut Self {
        self.min_width = width;
        self
    }

    /// Sets the maximum width.
    pub fn max_width(&mut self, width: f64) -> &mut Self {
        self.max_width = Some(width);
        self
    }
}

/// Collects column definitions for a table.
pub struct ColumnBuilder<T, V> {
    specs: Vec<ColumnSpec<T, V>>,
}

impl<T, V> ColumnBuilder<T, V> {
    /// Adds a column producing its cells with `generator`.
    ///
    /// Returns the column spec for width configuration.
    pub fn column(
        &mut self,
        header: impl Into<Option<String>>,
        generator: Arc<dyn ListRowGenerator<T, V>>,
    ) -> &mut ColumnSpec<T, V> {
        self.specs.push(ColumnSpec {
            header: header.into(),
            generator,
            preferred_width: None,
            min_width: 0.0,
            max_width: None,
        });
        let index = self.specs.len() - 1;
        &mut self.specs[index]
    }
}

/// One realized table column.
struct InternalColumn<T, V, M> {
    header: Option<String>,
    preferred_width: Option<f64>,
    min_width: f64,
    max_width: Option<f64>,
    width: f64,
    x: f64,
    rows: ListView<T, V, M>,
}

impl<T, V, M> InternalColumn<T, V, M> {
    fn clamp(&self, width: f64) -> f64 {
        let width = width.max(self.min_width);
        match self.max_width {
            Some(max) => width.min(max),
            None => width,
        }
    }
}

/// A multi-column virtualized view over a [`ListModel`].
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use trellis::view::TableView;
///
/// let mut table = TableView::new(contacts, |columns| {
///     columns.column(Some("Name".into()), Arc::new(NameCell)).width(160.0);
///     columns.column(Some("Phone".into()), Arc::new(PhoneCell)).min_width(80.0);
/// })
/// .with_positioner(Arc::new(FixedRowPositioner::new(24.0, 480.0)));
/// ```
pub struct TableView<T: Clone + Send + 'static, V, M: ListModel<T>> {
    model: Arc<M>,
    selection: Option<Arc<SelectionModel<usize>>>,
    positioner: Option<Arc<dyn ListRowPositioner<T>>>,
    columns: Vec<InternalColumn<T, V, M>>,
}

impl<T, V, M> TableView<T, V, M>
where
    T: Clone + Send + 'static,
    V: RowView,
    M: ListModel<T>,
{
    /// Creates a table over `model` with the columns defined by `build`.
    pub fn new(model: Arc<M>, build: impl FnOnce(&mut ColumnBuilder<T, V>)) -> Self {
        Self::with_scroll_cache(model, DEFAULT_SCROLL_CACHE, build)
    }

    /// Creates a table whose columns retain up to `cache_length` off-window
    /// cells each.
    pub fn with_scroll_cache(
        model: Arc<M>,
        cache_length: usize,
        build: impl FnOnce(&mut ColumnBuilder<T, V>),
    ) -> Self {
        let mut builder = ColumnBuilder { specs: Vec::new() };
        build(&mut builder);

        let columns = builder
            .specs
            .into_iter()
            .map(|spec| InternalColumn {
                header: spec.header,
                preferred_width: spec.preferred_width,
                min_width: spec.min_width,
                max_width: spec.max_width,
                width: 0.0,
                x: 0.0,
                rows: ListView::with_scroll_cache(model.clone(), cache_length)
                    .with_generator(spec.generator),
            })
            .collect();

        let mut table = Self {
            model,
            selection: None,
            positioner: None,
            columns,
        };
        table.relayout_columns();
        table
    }

    /// Attaches a shared selection model.
    pub fn with_selection_model(mut self, selection: Arc<SelectionModel<usize>>) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Sets the shared row positioner for every column.
    pub fn with_positioner(mut self, positioner: Arc<dyn ListRowPositioner<T>>) -> Self {
        self.set_positioner(positioner);
        self
    }

    /// Replaces the shared row positioner, rebuilding every column's rows.
    pub fn set_positioner(&mut self, positioner: Arc<dyn ListRowPositioner<T>>) {
        self.positioner = Some(positioner.clone());
        for column in &mut self.columns {
            column.rows.set_positioner(positioner.clone());
        }
    }

    /// The model this table presents.
    pub fn model(&self) -> &Arc<M> {
        &self.model
    }

    /// The selection model, if one is attached.
    pub fn selection_model(&self) -> Option<&Arc<SelectionModel<usize>>> {
        self.selection.as_ref()
    }

    /// The number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// The total number of rows.
    pub fn num_rows(&self) -> usize {
        self.model.len()
    }

    /// The value at `row`.
    pub fn get(&self, row: usize) -> Option<T> {
        self.model.get(row)
    }

    /// The header of column `column`.
    pub fn column_header(&self, column: usize) -> Option<&str> {
        self.columns.get(column)?.header.as_deref()
    }

    /// The laid-out width of column `column`.
    pub fn column_width(&self, column: usize) -> Option<f64> {
        self.columns.get(column).map(|c| c.width)
    }

    /// The laid-out x offset of column `column`.
    pub fn column_x(&self, column: usize) -> Option<f64> {
        self.columns.get(column).map(|c| c.x)
    }

    /// The materialized cell view at (`row`, `column`), if on screen.
    pub fn cell_view(&self, row: usize, column: usize) -> Option<&V> {
        self.columns.get(column)?.rows.row_view(row)
    }

    /// The height of the full content, per the positioner.
    pub fn content_height(&self) -> f64 {
        self.columns
            .first()
            .map_or(0.0, |column| column.rows.content_height())
    }

    /// Assigns column widths and x offsets for `total_width`: preferred
    /// widths clamped to min/max, left to right, the last column absorbing
    /// the remainder.
    pub fn layout_columns(&mut self, total_width: f64) {
        let mut x = 0.0;
        let count = self.columns.len();

        for (index, column) in self.columns.iter_mut().enumerate() {
            let mut width = column.clamp(column.preferred_width.unwrap_or(column.min_width));
            if index + 1 == count && x + width < total_width {
                width = column.clamp(total_width - x);
            }
            column.x = x;
            column.width = width;
            x += width;
        }
    }

    fn relayout_columns(&mut self) {
        let total: f64 = self
            .columns
            .iter()
            .map(|c| c.clamp(c.preferred_width.unwrap_or(c.min_width)))
            .sum();
        self.layout_columns(total);
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

    /// Recomputes every column's visible row window after the viewport moved.
    pub fn viewport_changed(&mut self, old: Rect, new: Rect) {
        for column in &mut self.columns {
            column.rows.viewport_changed(old, new);
        }
    }

    // -------------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------------

    fn refresh_row(&mut self, row: usize) {
        for column in &mut self.columns {
            column.rows.materialize_row(row);
        }
    }

    fn model_resized(&mut self) {
        for column in &mut self.columns {
            column.rows.model_resized();
        }
    }
}

/// A multi-column view over a [`MutableListModel`], with cell editing.
pub struct MutableTableView<T: Clone + Send + 'static, V, M: ListModel<T>> {
    table: TableView<T, V, M>,
    editor: Option<Arc<dyn TableEditor<T, V>>>,
    session: EditSession<T, V>,
    editing_column: Option<usize>,
    pending: Arc<Mutex<Vec<ListChange<T>>>>,
    model_connection: ConnectionId,
}

impl<T, V, M> MutableTableView<T, V, M>
where
    T: Clone + PartialEq + Send + 'static,
    V: RowView,
    M: MutableListModel<T>,
{
    /// Creates a table over `model`, subscribing to its change stream.
    pub fn new(model: Arc<M>, build: impl FnOnce(&mut ColumnBuilder<T, V>)) -> Self {
        let pending: Arc<Mutex<Vec<ListChange<T>>>> = Arc::new(Mutex::new(Vec::new()));

        let queue = pending.clone();
        let model_connection = model.signals().changed.connect(move |change| {
            queue.lock().push(change.clone());
        });

        Self {
            table: TableView::new(model, build),
            editor: None,
            session: EditSession::new(),
            editing_column: None,
            pending,
            model_connection,
        }
    }

    /// Attaches a shared selection model.
    pub fn with_selection_model(mut self, selection: Arc<SelectionModel<usize>>) -> Self {
        self.table.selection = Some(selection);
        self
    }

    /// Sets the shared row positioner for every column.
    pub fn with_positioner(mut self, positioner: Arc<dyn ListRowPositioner<T>>) -> Self {
        self.table.set_positioner(positioner);
        self
    }

    /// Sets the editor enabling cell editing.
    pub fn with_editor(mut self, editor: Arc<dyn TableEditor<T, V>>) -> Self {
        self.editor = Some(editor);
        self
    }

    /// The underlying read-only table.
    pub fn as_table_view(&self) -> &TableView<T, V, M> {
        &self.table
    }

    /// The model this table presents.
    pub fn model(&self) -> &Arc<M> {
        &self.table.model
    }

    /// The total number of rows.
    pub fn num_rows(&self) -> usize {
        self.table.num_rows()
    }

    /// The value at `row`.
    pub fn get(&self, row: usize) -> Option<T> {
        self.table.get(row)
    }

    /// The materialized cell view at (`row`, `column`), if on screen.
    pub fn cell_view(&self, row: usize, column: usize) -> Option<&V> {
        self.table.cell_view(row, column)
    }

    /// Forwards a viewport move to every column, applying queued model
    /// changes first.
    pub fn viewport_changed(&mut self, old: Rect, new: Rect) {
        self.flush_model_changes();
        self.table.viewport_changed(old, new);
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Appends `value`.
    pub fn push(&mut self, value: T) {
        self.table.model.push(value);
        self.flush_model_changes();
    }

    /// Inserts `value` at `row`.
    pub fn insert(&mut self, row: usize, value: T) {
        self.table.model.insert(row, value);
        self.flush_model_changes();
    }

    /// Removes the value at `row`.
    pub fn remove_at(&mut self, row: usize) -> Option<T> {
        let removed = self.table.model.remove_at(row);
        self.flush_model_changes();
        removed
    }

    /// Replaces the value at `row`, refreshing the row even when the model
    /// reports no change.
    pub fn set(&mut self, row: usize, value: T) {
        let prior = self.table.model.set(row, value.clone());
        self.flush_model_changes();
        if prior == Some(value) {
            self.table.refresh_row(row);
        }
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        self.table.model.clear();
        self.flush_model_changes();
    }

    /// Applies every queued model change batch to the columns and the
    /// selection.
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

        if let Some(selection) = &self.table.selection {
            let adapter = SelectionAdapter::new(selection.clone());
            adapter.rows_removed(&true_removed);
            adapter.rows_inserted(&true_added);
        }

        if !true_removed.is_empty() || !true_added.is_empty() {
            self.table.model_resized();
        } else {
            for row in change.added.keys() {
                if change.removed.contains_key(row) {
                    self.table.refresh_row(*row);
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Returns `true` while a cell is being edited.
    pub fn editing(&self) -> bool {
        self.session.is_editing()
    }

    /// The (row, column) being edited, if any.
    pub fn editing_cell(&self) -> Option<(usize, usize)> {
        Some((self.session.editing_row()?, self.editing_column?))
    }

    /// Starts editing the cell at (`row`, `column`).
    ///
    /// A silent no-op when no editor is configured, the row is absent, or
    /// the cell has no materialized view.
    pub fn start_editing(&mut self, row: usize, column: usize) {
        self.flush_model_changes();

        let Some(editor) = self.editor.clone() else {
            return;
        };
        let Some(value) = self.table.model.get(row) else {
            return;
        };

        let operation = {
            let Some(current) = self.table.cell_view(row, column) else {
                return;
            };
            editor.edit(&value, column, row, current)
        };

        // Starting a new edit implicitly cancels any previous one; restore
        // that cell's display view.
        let previous_cell = self.editing_cell().filter(|&cell| cell != (row, column));

        self.editing_column = Some(column);
        if let Some(mut overlay) = self.session.begin(row, operation) {
            if let Some(positioner) = self.table.positioner.clone() {
                overlay.set_bounds(positioner.row_bounds(&value, row));
            }
            if let Some(target) = self.table.columns.get_mut(column) {
                target.rows.install_view(row, overlay);
            }
        }

        if let Some((stale_row, stale_column)) = previous_cell {
            if let Some(stale) = self.table.columns.get_mut(stale_column) {
                stale.rows.materialize_row(stale_row);
            }
        }

        if let Some(selection) = &self.table.selection {
            selection.replace_all([row]);
        }
    }

    /// Completes the edit in progress, writing the result to the model.
    pub fn complete_editing(&mut self) {
        let column = self.editing_column.take();
        match self.session.complete() {
            EditCompletion::Inactive => {
                self.editing_column = column;
            }
            EditCompletion::Cancelled { row } => self.table.refresh_row(row),
            EditCompletion::Committed { row, value } => {
                let prior = self.table.model.set(row, value.clone());
                self.flush_model_changes();
                if prior == Some(value) {
                    self.table.refresh_row(row);
                }
            }
        }
    }

    /// Cancels the edit in progress, restoring the cell's display view.
    pub fn cancel_editing(&mut self) {
        self.editing_column = None;
        if let Some(row) = self.session.cancel() {
            self.table.refresh_row(row);
        }
    }

    /// Loss of focus implicitly cancels any edit in progress.
    pub fn focus_lost(&mut self) {
        self.cancel_editing();
    }
}

impl<T: Clone + Send + 'static, V, M: ListModel<T>> Drop for MutableTableView<T, V, M> {
    fn drop(&mut self) {
        self.table
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

    const ROW_HEIGHT: f64 = 20.0;

    #[derive(Debug, Clone, PartialEq)]
    struct Contact {
        name: String,
        phone: String,
    }

    impl Contact {
        fn new(name: &str, phone: &str) -> Self {
            Self {
                name: name.to_string(),
                phone: phone.to_string(),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Cell {
        text: String,
        editing: bool,
        bounds: Rect,
    }

    impl RowView for Cell {
        fn set_bounds(&mut self, bounds: Rect) {
            self.bounds = bounds;
        }
    }

    /// A column cell generator projecting one field out of a contact.
    struct FieldCell {
        extract: fn(&Contact) -> &str,
    }

    impl ListRowGenerator<Contact, Cell> for FieldCell {
        fn row_view(&self, value: &Contact, _row: usize, previous: Option<Cell>) -> Cell {
            let text = (self.extract)(value).to_string();
            match previous {
                Some(mut cell) => {
                    cell.text = text;
                    cell.editing = false;
                    cell
                }
                None => Cell {
                    text,
                    editing: false,
                    bounds: Rect::ZERO,
                },
            }
        }
    }

    struct PhoneEditor {
        replacement: Option<String>,
    }

    struct PhoneEditOperation {
        value: Contact,
        replacement: Option<String>,
    }

    impl EditOperation<Contact, Cell> for PhoneEditOperation {
        fn begin(&mut self) -> Option<Cell> {
            Some(Cell {
                text: "<editing>".to_string(),
                editing: true,
                bounds: Rect::ZERO,
            })
        }

        fn complete(&mut self) -> Option<Contact> {
            let phone = self.replacement.clone()?;
            Some(Contact {
                name: self.value.name.clone(),
                phone,
            })
        }

        fn cancel(&mut self) {}
    }

    impl TableEditor<Contact, Cell> for PhoneEditor {
        fn edit(
            &self,
            value: &Contact,
            _column: usize,
            _row: usize,
            _current: &Cell,
        ) -> Box<dyn EditOperation<Contact, Cell>> {
            Box::new(PhoneEditOperation {
                value: value.clone(),
                replacement: self.replacement.clone(),
            })
        }
    }

    fn contacts() -> Arc<VecListModel<Contact>> {
        Arc::new(VecListModel::from(vec![
            Contact::new("Ada", "555-0100"),
            Contact::new("Grace", "555-0101"),
            Contact::new("Edsger", "555-0102"),
        ]))
    }

    fn build_columns(columns: &mut ColumnBuilder<Contact, Cell>) {
        columns
            .column(Some("Name".to_string()), Arc::new(FieldCell {
                extract: |c| c.name.as_str(),
            }))
            .width(120.0);
        columns
            .column(Some("Phone".to_string()), Arc::new(FieldCell {
                extract: |c| c.phone.as_str(),
            }))
            .min_width(80.0);
    }

    fn table(model: Arc<VecListModel<Contact>>) -> MutableTableView<Contact, Cell, VecListModel<Contact>> {
        MutableTableView::new(model, build_columns)
            .with_positioner(Arc::new(FixedRowPositioner::new(ROW_HEIGHT, 200.0)))
    }

    fn show_rows(view: &mut MutableTableView<Contact, Cell, VecListModel<Contact>>, height: f64) {
        view.viewport_changed(Rect::ZERO, Rect::new(0.0, 0.0, 200.0, height));
    }

    #[test]
    fn test_column_layout() {
        let mut view = table(contacts());
        let table = &mut view.table;

        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.column_header(0), Some("Name"));
        assert_eq!(table.column_header(1), Some("Phone"));

        table.layout_columns(300.0);
        assert_eq!(table.column_x(0), Some(0.0));
        assert_eq!(table.column_width(0), Some(120.0));
        assert_eq!(table.column_x(1), Some(120.0));
        // The last column absorbs the remaining width.
        assert_eq!(table.column_width(1), Some(180.0));
    }

    #[test]
    fn test_cells_materialize_per_column() {
        let mut view = table(contacts());
        show_rows(&mut view, 100.0);

        assert_eq!(view.cell_view(0, 0).map(|c| c.text.as_str()), Some("Ada"));
        assert_eq!(
            view.cell_view(0, 1).map(|c| c.text.as_str()),
            Some("555-0100")
        );
        assert_eq!(
            view.cell_view(2, 1).map(|c| c.text.as_str()),
            Some("555-0102")
        );
        assert_eq!(view.as_table_view().content_height(), 3.0 * ROW_HEIGHT);
    }

    #[test]
    fn test_insert_refreshes_all_columns_and_shifts_selection() {
        let selection = Arc::new(SelectionModel::new());
        let mut view = table(contacts()).with_selection_model(selection.clone());
        show_rows(&mut view, 100.0);
        selection.add(1usize);

        view.insert(0, Contact::new("Alan", "555-0199"));

        assert_eq!(view.num_rows(), 4);
        // One shift for the whole table, not one per column.
        assert_eq!(selection.iter(), vec![2]);
        assert_eq!(view.cell_view(0, 0).map(|c| c.text.as_str()), Some("Alan"));
        assert_eq!(view.cell_view(1, 1).map(|c| c.text.as_str()), Some("555-0100"));
    }

    #[test]
    fn test_remove_drops_selected_row() {
        let selection = Arc::new(SelectionModel::new());
        let mut view = table(contacts()).with_selection_model(selection.clone());
        show_rows(&mut view, 100.0);
        selection.add_all([0usize, 2]);

        view.remove_at(0);

        assert_eq!(selection.iter(), vec![1]);
        assert_eq!(view.cell_view(0, 0).map(|c| c.text.as_str()), Some("Grace"));
    }

    #[test]
    fn test_cell_edit_lifecycle() {
        let mut view = table(contacts()).with_editor(Arc::new(PhoneEditor {
            replacement: Some("555-9999".to_string()),
        }));
        show_rows(&mut view, 100.0);

        view.start_editing(1, 1);
        assert!(view.editing());
        assert_eq!(view.editing_cell(), Some((1, 1)));
        assert!(view.cell_view(1, 1).is_some_and(|c| c.editing));
        // The other column's cell is untouched.
        assert!(view.cell_view(1, 0).is_some_and(|c| !c.editing));

        view.complete_editing();
        assert!(!view.editing());
        assert_eq!(
            view.get(1),
            Some(Contact::new("Grace", "555-9999"))
        );
        assert_eq!(
            view.cell_view(1, 1).map(|c| c.text.as_str()),
            Some("555-9999")
        );
    }

    #[test]
    fn test_cancel_edit_restores_cell() {
        let mut view = table(contacts()).with_editor(Arc::new(PhoneEditor {
            replacement: Some("unused".to_string()),
        }));
        show_rows(&mut view, 100.0);

        view.start_editing(0, 1);
        view.cancel_editing();

        assert!(!view.editing());
        assert_eq!(view.get(0), Some(Contact::new("Ada", "555-0100")));
        assert_eq!(
            view.cell_view(0, 1).map(|c| c.text.as_str()),
            Some("555-0100")
        );
    }

    #[test]
    fn test_editing_without_editor_is_noop() {
        let mut view = table(contacts());
        show_rows(&mut view, 100.0);

        view.start_editing(0, 0);
        assert!(!view.editing());
    }
}
