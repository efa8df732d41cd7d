//! Data and selection models.
//!
//! This module provides the model half of the Trellis model/view split:
//!
//! - [`TreePath`]: addresses a node in a hierarchical model as an ordered
//!   sequence of child indices
//! - [`ListModel`]/[`MutableListModel`]: linear models with batched change
//!   notification; [`VecListModel`] is the vector-backed implementation
//! - [`TreeModel`]: read-only hierarchical models; [`SimpleTreeModel`] is
//!   the owned-node implementation
//! - [`SelectionModel`]: shared, observable selection storage keyed by
//!   path or row index
//!
//! Models are supplied to views from outside and observed through signals;
//! views read through the model traits and never mutate a model they did not
//! create.

mod list;
mod path;
pub mod selection;
mod tree;

pub use list::{ListChange, ListModel, ListModelSignals, MutableListModel, VecListModel};
pub use path::TreePath;
pub use selection::{SelectionChange, SelectionModel};
pub use tree::{SimpleTreeModel, TreeModel, TreeNode};
