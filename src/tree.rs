use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

use log::debug;

use crate::error::InvariantViolation;
use crate::node::{self, Link, Node};

/// An ordered set of unique values, kept balanced as an AVL tree.
///
/// ```
/// use avl_engine::AvlTree;
/// let mut tree = AvlTree::new();
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
/// assert!(tree.contains(&1));
/// assert_eq!(tree.in_order(), vec![&1, &2, &3]);
/// tree.remove(&1);
/// assert!(!tree.contains(&1));
/// ```
pub struct AvlTree<T> {
    root: Link<T>,
    num_nodes: usize,
}

impl<T> AvlTree<T> {
    /// Creates an empty tree.
    /// No memory is allocated until the first value is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of values in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree, i.e. the number of nodes on the longest
    /// path from the root down to a leaf. An empty tree has height 0.
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        let num_released = node::destroy(self.root.take());
        debug_assert_eq!(num_released, self.num_nodes);
        if num_released > 0 {
            debug!("released {} nodes", num_released);
        }
        self.num_nodes = 0;
    }

    /// Returns the smallest value in the tree.
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    /// Returns the largest value in the tree.
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// Collects the values in sorted order (left subtree, node, right subtree).
    pub fn in_order(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.num_nodes);
        self.traverse(|_| {}, |node| values.push(&node.value), |_| {});
        values
    }

    /// Collects the values in pre-order (node, left subtree, right subtree).
    /// The first value is the root.
    pub fn pre_order(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.num_nodes);
        self.traverse(|node| values.push(&node.value), |_| {}, |_| {});
        values
    }

    /// Collects the values in post-order (left subtree, right subtree, node).
    /// The last value is the root.
    pub fn post_order(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.num_nodes);
        self.traverse(|_| {}, |_| {}, |node| values.push(&node.value));
        values
    }

    pub(crate) fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    fn traverse<'a, Pre, In, Post>(&'a self, mut preorder: Pre, mut inorder: In, mut postorder: Post)
    where
        Pre: FnMut(&'a Node<T>),
        In: FnMut(&'a Node<T>),
        Post: FnMut(&'a Node<T>),
    {
        fn walk<'a, T>(
            link: &'a Link<T>,
            preorder: &mut dyn FnMut(&'a Node<T>),
            inorder: &mut dyn FnMut(&'a Node<T>),
            postorder: &mut dyn FnMut(&'a Node<T>),
        ) {
            if let Some(node) = link.as_deref() {
                preorder(node);
                walk(&node.left, preorder, inorder, postorder);
                inorder(node);
                walk(&node.right, preorder, inorder, postorder);
                postorder(node);
            }
        }

        walk(&self.root, &mut preorder, &mut inorder, &mut postorder);
    }
}

impl<T: Ord> AvlTree<T> {
    /// Inserts a value into the tree.
    /// Returns whether the value was newly inserted;
    /// a value equal to one already in the tree is ignored.
    pub fn insert(&mut self, value: T) -> bool {
        // Detached tree is lost if a comparison panics, keep the count in line
        let num_nodes = mem::take(&mut self.num_nodes);
        let (root, inserted) = node::insert(self.root.take(), value);
        self.root = Some(root);
        self.num_nodes = num_nodes + usize::from(inserted);
        inserted
    }

    /// Removes a value from the tree.
    /// Returns whether the value was previously in the tree.
    ///
    /// The value may be any borrowed form of the tree's value type, but the ordering
    /// on the borrowed form *must* match the ordering on the value type.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes a value from the tree.
    /// Returns the value if it was previously in the tree.
    ///
    /// The value may be any borrowed form of the tree's value type, but the ordering
    /// on the borrowed form *must* match the ordering on the value type.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let num_nodes = mem::take(&mut self.num_nodes);
        let (root, removed) = node::remove(self.root.take(), value);
        self.root = root;
        self.num_nodes = num_nodes;
        if removed.is_some() {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
        }
        removed
    }

    /// Returns true if the tree contains the value.
    ///
    /// The value may be any borrowed form of the tree's value type, but the ordering
    /// on the borrowed form *must* match the ordering on the value type.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(value).is_some()
    }

    /// Returns a reference to the value in the tree that is equal to the given value.
    ///
    /// The value may be any borrowed form of the tree's value type, but the ordering
    /// on the borrowed form *must* match the ordering on the value type.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(node.value.borrow()) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Checks search order, cached heights, AVL balance and node count
    /// of the whole tree. Returns the first violation found.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut num_nodes = 0;
        validate_subtree(&self.root, None, None, 0, &mut num_nodes)?;
        if num_nodes != self.num_nodes {
            return Err(InvariantViolation::Count {
                counted: num_nodes,
                recorded: self.num_nodes,
            });
        }
        Ok(())
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        if let Err(violation) = self.validate() {
            panic!("inconsistent tree: {}", violation);
        }
    }
}

// Returns the computed height of the subtree.
fn validate_subtree<T: Ord>(
    link: &Link<T>,
    lower: Option<&T>,
    upper: Option<&T>,
    depth: usize,
    num_nodes: &mut usize,
) -> Result<usize, InvariantViolation> {
    let node = match link.as_deref() {
        None => return Ok(0),
        Some(node) => node,
    };

    // Check search order against all ancestors
    if lower.map_or(false, |lower| *lower >= node.value)
        || upper.map_or(false, |upper| *upper <= node.value)
    {
        return Err(InvariantViolation::Order { depth });
    }

    let left_height = validate_subtree(&node.left, lower, Some(&node.value), depth + 1, num_nodes)?;
    let right_height = validate_subtree(&node.right, Some(&node.value), upper, depth + 1, num_nodes)?;

    // Check height
    let computed = 1 + left_height.max(right_height);
    if node.height != computed {
        return Err(InvariantViolation::Height {
            depth,
            cached: node.height,
            computed,
        });
    }

    // Check AVL condition (nearly balance)
    let factor = left_height as isize - right_height as isize;
    if !(-1..=1).contains(&factor) {
        return Err(InvariantViolation::Balance { depth, factor });
    }

    *num_nodes += 1;
    Ok(computed)
}

impl<T> Drop for AvlTree<T> {
    fn drop(&mut self) {
        node::destroy(self.root.take());
    }
}

impl<T> Default for AvlTree<T> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.in_order()).finish()
    }
}
