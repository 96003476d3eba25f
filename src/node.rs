use std::borrow::Borrow;
use std::cmp::{self, Ordering};

use log::trace;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
    pub(crate) height: usize,
}

/// Cached height of a subtree, 0 for an absent one.
pub(crate) fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Balance factor of a subtree, 0 for an absent one.
pub(crate) fn balance_factor<T>(link: &Link<T>) -> isize {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

impl<T> Node<T> {
    pub(crate) fn create(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    pub(crate) fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    fn update_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }
}

//     y        x
//    / \      / \
//   x   c -> a   y
//  / \          / \
// a   b        b   c
fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.left.take() {
        None => node,
        Some(mut left) => {
            node.left = left.right.take();
            node.update_height();
            left.right = Some(node);
            left.update_height();
            left
        }
    }
}

//   x            y
//  / \          / \
// a   y   ->   x   c
//    / \      / \
//   b   c    a   b
fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    match node.right.take() {
        None => node,
        Some(mut right) => {
            node.right = right.left.take();
            node.update_height();
            right.left = Some(node);
            right.update_height();
            right
        }
    }
}

/// Restores AVL condition (balance) at given node if necessary and adjusts height.
/// Resulting balance will be +1, 0 or -1 height difference between left and right subtree.
/// Both subtrees must already be balanced and the initial balance must not exceed
/// +2 or -2, which always holds after a single update below this node.
/// Returns the root of the rebalanced subtree.
fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();
    let balance = node.balance_factor();
    debug_assert!((-2..=2).contains(&balance));
    if balance > 1 {
        // Left subtree too high
        if balance_factor(&node.left) < 0 {
            trace!("left-right rotation at height {}", node.height);
            node.left = node.left.take().map(rotate_left);
        } else {
            trace!("right rotation at height {}", node.height);
        }
        rotate_right(node)
    } else if balance < -1 {
        // Right subtree too high
        if balance_factor(&node.right) > 0 {
            trace!("right-left rotation at height {}", node.height);
            node.right = node.right.take().map(rotate_right);
        } else {
            trace!("left rotation at height {}", node.height);
        }
        rotate_left(node)
    } else {
        node
    }
}

/// Inserts value into the subtree and returns its new root,
/// along with whether a node has been created.
/// Equal values are not inserted twice.
pub(crate) fn insert<T: Ord>(link: Link<T>, value: T) -> (Box<Node<T>>, bool) {
    let mut node = match link {
        None => return (Node::create(value), true),
        Some(node) => node,
    };
    let inserted = match value.cmp(&node.value) {
        Ordering::Less => {
            let (left, inserted) = insert(node.left.take(), value);
            node.left = Some(left);
            inserted
        }
        Ordering::Greater => {
            let (right, inserted) = insert(node.right.take(), value);
            node.right = Some(right);
            inserted
        }
        Ordering::Equal => return (node, false),
    };
    (rebalance(node), inserted)
}

/// Removes the value from the subtree and returns its new root,
/// along with the removed value if it was present.
pub(crate) fn remove<T, Q>(link: Link<T>, value: &Q) -> (Link<T>, Option<T>)
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut node = match link {
        None => return (None, None),
        Some(node) => node,
    };
    let removed = match value.cmp(node.value.borrow()) {
        Ordering::Less => {
            let (left, removed) = remove(node.left.take(), value);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove(node.right.take(), value);
            node.right = right;
            removed
        }
        Ordering::Equal => {
            let Node {
                value: stored,
                left,
                right,
                ..
            } = *node;
            let replacement = match right {
                // Left subtree is balanced already (or absent)
                None => left,
                Some(right) => {
                    // Replace by in-order successor
                    let (mut min, rest) = remove_min(right);
                    min.left = left;
                    min.right = rest;
                    Some(rebalance(min))
                }
            };
            return (replacement, Some(stored));
        }
    };
    (Some(rebalance(node)), removed)
}

/// Detaches the leftmost node of the subtree.
/// Returns the detached node and what is left of the subtree.
/// The detached node keeps a stale height and no children.
fn remove_min<T>(mut node: Box<Node<T>>) -> (Box<Node<T>>, Link<T>) {
    match node.left.take() {
        None => {
            let right = node.right.take();
            (node, right)
        }
        Some(left) => {
            let (min, rest) = remove_min(left);
            node.left = rest;
            (min, Some(rebalance(node)))
        }
    }
}

/// Releases every node of the subtree, children before parent.
/// Returns the number of released nodes.
pub(crate) fn destroy<T>(link: Link<T>) -> usize {
    match link {
        None => 0,
        Some(mut node) => {
            let num_left = destroy(node.left.take());
            let num_right = destroy(node.right.take());
            drop(node);
            num_left + num_right + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: i32) -> Link<i32> {
        Some(Node::create(value))
    }

    fn join(value: i32, left: Link<i32>, right: Link<i32>) -> Link<i32> {
        let mut node = Node::create(value);
        node.left = left;
        node.right = right;
        node.update_height();
        Some(node)
    }

    #[test]
    fn test_height_and_balance() {
        assert_eq!(height::<i32>(&None), 0);
        assert_eq!(balance_factor::<i32>(&None), 0);

        let tree = join(2, join(1, leaf(0), None), None);
        assert_eq!(height(&tree), 3);
        assert_eq!(balance_factor(&tree), 2);
        assert_eq!(balance_factor(&tree.as_ref().unwrap().left), 1);
    }

    #[test]
    fn test_rotate_right() {
        //     3      2
        //    / \    / \
        //   2   4  1   3
        //  /            \
        // 1              4
        let root = rotate_right(join(3, join(2, leaf(1), None), leaf(4)).unwrap());
        assert_eq!(root.value, 2);
        assert_eq!(root.height, 3);
        let left = root.left.as_ref().unwrap();
        let right = root.right.as_ref().unwrap();
        assert_eq!((left.value, left.height), (1, 1));
        assert_eq!((right.value, right.height), (3, 2));
        assert_eq!(right.right.as_ref().unwrap().value, 4);
    }

    #[test]
    fn test_rotate_left() {
        //   1          3
        //  / \        / \
        // 0   3  ->  1   4
        //    / \    / \
        //   2   4  0   2
        let root = rotate_left(join(1, leaf(0), join(3, leaf(2), leaf(4))).unwrap());
        assert_eq!(root.value, 3);
        assert_eq!(root.height, 3);
        let left = root.left.as_ref().unwrap();
        assert_eq!((left.value, left.height), (1, 2));
        assert_eq!(left.left.as_ref().unwrap().value, 0);
        assert_eq!(left.right.as_ref().unwrap().value, 2);
        assert_eq!(root.right.as_ref().unwrap().value, 4);
    }

    #[test]
    fn test_rotate_without_child() {
        let root = rotate_right(Node::create(7));
        assert_eq!(root.value, 7);
        let root = rotate_left(root);
        assert_eq!(root.value, 7);
        assert_eq!(root.height, 1);
    }

    #[test]
    fn test_rebalance_double_rotation() {
        //   3      2
        //  /      / \
        // 1   -> 1   3
        //  \
        //   2
        let root = rebalance(join(3, join(1, None, leaf(2)), None).unwrap());
        assert_eq!(root.value, 2);
        assert_eq!(root.height, 2);
        assert_eq!(root.balance_factor(), 0);

        // 1        2
        //  \      / \
        //   3 -> 1   3
        //  /
        // 2
        let root = rebalance(join(1, None, join(3, leaf(2), None)).unwrap());
        assert_eq!(root.value, 2);
        assert_eq!(root.height, 2);
        assert_eq!(root.balance_factor(), 0);
    }

    #[test]
    fn test_remove_min() {
        let (min, rest) = remove_min(join(2, join(1, None, None), leaf(3)).unwrap());
        assert_eq!(min.value, 1);
        assert!(min.left.is_none() && min.right.is_none());
        let rest = rest.unwrap();
        assert_eq!(rest.value, 2);
        assert!(rest.left.is_none());

        let (min, rest) = remove_min(join(1, None, leaf(2)).unwrap());
        assert_eq!(min.value, 1);
        assert_eq!(rest.unwrap().value, 2);
    }

    #[test]
    fn test_destroy() {
        assert_eq!(destroy::<i32>(None), 0);
        assert_eq!(destroy(join(2, leaf(1), join(4, leaf(3), None))), 4);
    }
}
