//! An ordered set of unique values implemented with an AVL tree.
//!
//! Values are kept in a binary search tree whose nodes cache their height.
//! After every insertion or removal each node on the path back to the root is
//! rebalanced with at most two rotations, so the heights of the two subtrees
//! of any node never differ by more than one. This bounds the tree height by
//! roughly `1.44 * log2(n)` and makes insert, remove and lookup `O(log n)`.
//!
//! ```
//! use avl_engine::AvlTree;
//! let mut tree = AvlTree::new();
//! for value in 1..=5 {
//!     tree.insert(value);
//! }
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.pre_order(), vec![&2, &1, &4, &3, &5]);
//! ```

mod error;
mod node;
mod print;
mod tree;

pub use error::InvariantViolation;
pub use print::Pretty;
pub use tree::AvlTree;
