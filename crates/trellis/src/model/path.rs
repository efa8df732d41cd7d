//! Tree paths for addressing nodes in hierarchical models.
//!
//! A [`TreePath`] locates a node by the sequence of child indices walked from
//! the root: the empty path is the root itself, `[0]` is the root's first
//! child, `[0, 2]` that child's third child, and so on. Paths are immutable
//! value objects: equal sequences are equal paths.

use std::cmp::Ordering;

/// A location in a hierarchical model, as an ordered sequence of child
/// indices descending from the root.
///
/// # Example
///
/// ```
/// use trellis::model::TreePath;
///
/// let root = TreePath::root();
/// let child = root.child(1);
/// let grandchild = child.child(0);
///
/// assert_eq!(grandchild.depth(), 2);
/// assert_eq!(grandchild.parent(), Some(child));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct TreePath {
    indices: Vec<usize>,
}

impl TreePath {
    /// The root path (empty index sequence, depth 0).
    pub fn root() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    /// Creates a path from an index sequence.
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// The number of indices in the path. The root has depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if this is the root path.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.indices.is_empty()
    }

    /// The child index at position `i`, or `None` past the end.
    #[inline]
    pub fn get(&self, i: usize) -> Option<usize> {
        self.indices.get(i).copied()
    }

    /// The final child index, or `None` for the root.
    #[inline]
    pub fn last(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// The index sequence as a slice.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<TreePath> {
        if self.indices.is_empty() {
            return None;
        }
        Some(Self {
            indices: self.indices[..self.indices.len() - 1].to_vec(),
        })
    }

    /// Returns a new path descending into the child at `index`.
    pub fn child(&self, index: usize) -> TreePath {
        let mut indices = Vec::with_capacity(self.indices.len() + 1);
        indices.extend_from_slice(&self.indices);
        indices.push(index);
        Self { indices }
    }

    /// The chain of ancestors from the immediate parent up to the root.
    ///
    /// The first element is the immediate parent, and the last is the root
    /// path. Empty for the root.
    pub fn ancestors(&self) -> Vec<TreePath> {
        let mut ancestors = Vec::with_capacity(self.indices.len());
        let mut current = self.parent();
        while let Some(path) = current {
            current = path.parent();
            ancestors.push(path);
        }
        ancestors
    }

    /// Returns `true` if this path is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &TreePath) -> bool {
        self.indices.len() < other.indices.len()
            && other.indices[..self.indices.len()] == self.indices[..]
    }

    /// Compares two paths position-by-position up to the shorter depth; the
    /// first non-equal element wins.
    ///
    /// Paths where one is a prefix of the other compare `Equal`, so callers
    /// batching structural operations compose this with a depth comparison to
    /// decide whether ancestors or descendants are processed first. For a
    /// total pre-order, use the `Ord` implementation, which breaks prefix
    /// ties shallower-first.
    pub fn cmp_document_order(a: &TreePath, b: &TreePath) -> Ordering {
        for (x, y) in a.indices.iter().zip(b.indices.iter()) {
            match x.cmp(y) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

impl Ord for TreePath {
    fn cmp(&self, other: &Self) -> Ordering {
        Self::cmp_document_order(self, other).then_with(|| self.depth().cmp(&other.depth()))
    }
}

impl PartialOrd for TreePath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Debug for TreePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreePath{:?}", self.indices)
    }
}

impl From<Vec<usize>> for TreePath {
    fn from(indices: Vec<usize>) -> Self {
        Self::new(indices)
    }
}

impl<const N: usize> From<[usize; N]> for TreePath {
    fn from(indices: [usize; N]) -> Self {
        Self::new(indices.to_vec())
    }
}

impl From<&[usize]> for TreePath {
    fn from(indices: &[usize]) -> Self {
        Self::new(indices.to_vec())
    }
}

impl FromIterator<usize> for TreePath {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let root = TreePath::root();
        assert_eq!(root.depth(), 0);
        assert!(root.is_root());
        assert_eq!(root.parent(), None);
        assert_eq!(root.last(), None);
    }

    #[test]
    fn test_child_and_parent() {
        let path = TreePath::root().child(2).child(5);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.get(0), Some(2));
        assert_eq!(path.get(1), Some(5));
        assert_eq!(path.last(), Some(5));
        assert_eq!(path.parent(), Some(TreePath::from([2])));
        assert_eq!(path.parent().unwrap().parent(), Some(TreePath::root()));
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(TreePath::from([1, 2, 3]), TreePath::root().child(1).child(2).child(3));
        assert_ne!(TreePath::from([1, 2]), TreePath::from([1, 2, 0]));
    }

    #[test]
    fn test_ancestors() {
        let path = TreePath::from([0, 1, 2]);
        let ancestors = path.ancestors();
        assert_eq!(
            ancestors,
            vec![
                TreePath::from([0, 1]),
                TreePath::from([0]),
                TreePath::root(),
            ]
        );
    }

    #[test]
    fn test_is_ancestor_of() {
        let root = TreePath::root();
        let a = TreePath::from([1]);
        let b = TreePath::from([1, 0]);

        assert!(root.is_ancestor_of(&a));
        assert!(root.is_ancestor_of(&b));
        assert!(a.is_ancestor_of(&b));
        assert!(!b.is_ancestor_of(&a));
        assert!(!a.is_ancestor_of(&a));
        assert!(!TreePath::from([2]).is_ancestor_of(&b));
    }

    #[test]
    fn test_document_order_prefix_ties() {
        let a = TreePath::from([1]);
        let b = TreePath::from([1, 3]);
        assert_eq!(TreePath::cmp_document_order(&a, &b), Ordering::Equal);
        assert_eq!(
            TreePath::cmp_document_order(&TreePath::from([0]), &TreePath::from([1])),
            Ordering::Less
        );
        assert_eq!(
            TreePath::cmp_document_order(&TreePath::from([2, 0]), &TreePath::from([1, 9])),
            Ordering::Greater
        );
    }

    #[test]
    fn test_total_order_is_preorder() {
        let mut paths = vec![
            TreePath::from([1]),
            TreePath::from([0, 1]),
            TreePath::from([0]),
            TreePath::root(),
            TreePath::from([0, 0]),
        ];
        paths.sort();
        assert_eq!(
            paths,
            vec![
                TreePath::root(),
                TreePath::from([0]),
                TreePath::from([0, 0]),
                TreePath::from([0, 1]),
                TreePath::from([1]),
            ]
        );
    }
}
