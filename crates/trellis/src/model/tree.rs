//! Hierarchical (tree) data models.
//!
//! A [`TreeModel`] is the read capability tree views consume: node lookup by
//! [`TreePath`], leaf tests, and child counts. The model is supplied
//! externally and never mutated by the view layer.
//!
//! [`SimpleTreeModel`] is the owned-node implementation, built from
//! [`TreeNode`] values.

use parking_lot::RwLock;

use super::path::TreePath;

/// Read access to a hierarchical structure of values.
pub trait TreeModel<T: Clone>: Send + Sync {
    /// The value at `path`, or `None` when the path does not identify a node.
    fn get(&self, path: &TreePath) -> Option<T>;

    /// Returns `true` if the node at `path` can never have children.
    ///
    /// Paths that identify no node are reported as leaves.
    fn is_leaf(&self, path: &TreePath) -> bool;

    /// The number of children of the node at `path` (0 for invalid paths).
    fn num_children(&self, path: &TreePath) -> usize;

    /// Returns `true` if the model has no root node.
    fn is_empty(&self) -> bool;
}

/// A node in a [`SimpleTreeModel`]: a value plus an ordered list of children.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    value: T,
    children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    /// Creates a leaf node.
    pub fn new(value: T) -> Self {
        Self {
            value,
            children: Vec::new(),
        }
    }

    /// Creates a node with the given children.
    pub fn with_children(value: T, children: Vec<TreeNode<T>>) -> Self {
        Self { value, children }
    }

    /// Appends a child node.
    pub fn push_child(&mut self, child: TreeNode<T>) {
        self.children.push(child);
    }

    /// The node's value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The node's children.
    pub fn children(&self) -> &[TreeNode<T>] {
        &self.children
    }

    /// Follows `path` down from this node.
    fn descend(&self, path: &TreePath) -> Option<&TreeNode<T>> {
        let mut node = self;
        for i in path.indices() {
            node = node.children.get(*i)?;
        }
        Some(node)
    }
}

/// A [`TreeModel`] over an owned root node.
///
/// # Example
///
/// ```
/// use trellis::model::{SimpleTreeModel, TreeModel, TreeNode, TreePath};
///
/// let model = SimpleTreeModel::new(TreeNode::with_children(
///     "root",
///     vec![TreeNode::new("a"), TreeNode::new("b")],
/// ));
///
/// assert_eq!(model.get(&TreePath::root()), Some("root"));
/// assert_eq!(model.get(&TreePath::from([1])), Some("b"));
/// assert_eq!(model.num_children(&TreePath::root()), 2);
/// assert!(model.is_leaf(&TreePath::from([0])));
/// ```
pub struct SimpleTreeModel<T> {
    root: RwLock<Option<TreeNode<T>>>,
}

impl<T: Clone> Default for SimpleTreeModel<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone> SimpleTreeModel<T> {
    /// Creates a model rooted at `root`.
    pub fn new(root: TreeNode<T>) -> Self {
        Self {
            root: RwLock::new(Some(root)),
        }
    }

    /// Creates a model with no nodes at all.
    pub fn empty() -> Self {
        Self {
            root: RwLock::new(None),
        }
    }

    /// Replaces the entire tree.
    pub fn set_root(&self, root: Option<TreeNode<T>>) {
        *self.root.write() = root;
    }
}

impl<T: Clone + Send + Sync> TreeModel<T> for SimpleTreeModel<T> {
    fn get(&self, path: &TreePath) -> Option<T> {
        let root = self.root.read();
        Some(root.as_ref()?.descend(path)?.value.clone())
    }

    fn is_leaf(&self, path: &TreePath) -> bool {
        self.num_children(path) == 0
    }

    fn num_children(&self, path: &TreePath) -> usize {
        let root = self.root.read();
        root.as_ref()
            .and_then(|node| node.descend(path))
            .map_or(0, |node| node.children.len())
    }

    fn is_empty(&self) -> bool {
        self.root.read().is_none()
    }
}
