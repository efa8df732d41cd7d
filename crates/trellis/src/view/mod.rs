//! Virtualized views: the data-to-visible-rows engine.
//!
//! This module maps models onto the small set of view objects actually on
//! screen, and keeps that mapping correct as data, expansion, selection, and
//! scroll position change:
//!
//! - [`RowMapper`]: the bidirectional mapping between flat visible row
//!   numbers and tree paths, derived from the [`ExpansionRegistry`] and the
//!   root-visible flag
//! - [`RowWindow`]: the contiguous on-screen row range and its materialized
//!   views, recycled through a bounded circular slot buffer
//! - [`SelectionAdapter`]: shifts index-addressed selection so it follows
//!   rows across insertions and removals
//! - [`EditSession`]: the single in-progress in-place edit
//! - [`TreeView`], [`ListView`]/[`MutableListView`],
//!   [`TableView`]/[`MutableTableView`]: the controls wiring it together
//!
//! Views consume capabilities from the host through the traits in this
//! module: a row positioner for geometry, a row generator for view objects,
//! and an editor for in-place editing. No rendering happens here.

mod cache;
mod edit;
mod expansion;
mod list_view;
mod row_mapper;
mod selection_adapter;
mod table_view;
mod traits;
mod tree_view;
mod window;

pub use edit::{EditCompletion, EditSession};
pub use expansion::{maximal_expansion, ExpansionRegistry};
pub use list_view::{ListView, MutableListView};
pub use row_mapper::{ancestral_siblings_after, RowMapper};
pub use selection_adapter::{
    prune_removed_paths, shifted_after_insert, shifted_after_remove, SelectionAdapter,
};
pub use table_view::{ColumnBuilder, ColumnSpec, MutableTableView, TableView};
pub use traits::{
    EditOperation, FixedRowPositioner, ListEditor, ListRowGenerator, ListRowPositioner, RowView,
    TableEditor, TreeRowGenerator, TreeRowPositioner,
};
pub use tree_view::{TreeView, DEFAULT_SCROLL_CACHE};
pub use window::RowWindow;
