//! Trellis: the model/view core of a retained-mode UI toolkit.
//!
//! Trellis separates *data* from *display* and concentrates on the piece in
//! between: mapping a sparse, lazily-expanded hierarchical or linear model
//! onto the small, reused set of view objects that are actually on screen.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   signals    ┌──────────────────┐   generator /
//! │    Model     │─────────────>│       View       │   positioner
//! │ (List/Tree)  │              │ (List/Tree/Table)│──────────────> host
//! └──────────────┘              └──────────────────┘   views
//!        │                          │          │
//!        │     ┌──────────────┐     │    ┌───────────┐
//!        └────>│  RowMapper   │<────┘    │ RowWindow │
//!              │ row ⇄ path   │          │ on-screen │
//!              └──────────────┘          │   views   │
//!                                        └───────────┘
//! ```
//!
//! - [`model`] holds the data side: list and tree models with batched change
//!   notification, tree paths, and shared selection models.
//! - [`view`] holds the engine: row↔path mapping with expansion state, the
//!   materialized row window, selection index adjustment, in-place editing,
//!   and the tree/list/table views that tie them together.
//!
//! Rendering, input, and layout constraints stay in the host toolkit, which
//! supplies row positioners, row generators, and editors to the views.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use trellis::model::{SimpleTreeModel, TreeNode, TreePath};
//! use trellis::view::RowMapper;
//!
//! let model = Arc::new(SimpleTreeModel::new(TreeNode::with_children(
//!     "root",
//!     vec![
//!         TreeNode::with_children("a", vec![TreeNode::new("a0")]),
//!         TreeNode::new("b"),
//!     ],
//! )));
//!
//! let mut mapper = RowMapper::new();
//! mapper.structure_changed(&*model);
//! assert_eq!(mapper.num_rows(), 2);
//!
//! mapper.set_expanded(&*model, TreePath::from([0]), true);
//! assert_eq!(mapper.num_rows(), 3);
//! assert_eq!(mapper.path_from_row(&*model, 1), Some(TreePath::from([0, 0])));
//! ```
//!
//! Everything runs on a single cooperative UI loop: mutation entry points
//! execute synchronously, each mutation's derived recomputation completes
//! before the next is accepted, and observers see one batched notification
//! per logical change.

pub mod model;
pub mod view;

/// The commonly used types in one import.
pub mod prelude {
    pub use crate::model::{
        ListChange, ListModel, MutableListModel, SelectionModel, SimpleTreeModel, TreeModel,
        TreeNode, TreePath, VecListModel,
    };
    pub use crate::view::{
        EditOperation, FixedRowPositioner, ListEditor, ListRowGenerator, ListRowPositioner,
        ListView, MutableListView, MutableTableView, RowMapper, RowView, RowWindow, TableEditor,
        TableView, TreeRowGenerator, TreeRowPositioner, TreeView,
    };
    pub use trellis_core::{Point, Rect, Signal, Size};
}
