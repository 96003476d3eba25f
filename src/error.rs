use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////

/// A broken tree invariant, as reported by [`AvlTree::validate`].
///
/// Depths are counted from the root, which is at depth 0.
///
/// [`AvlTree::validate`]: crate::AvlTree::validate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("search order violated at depth {depth}")]
    Order { depth: usize },
    #[error("cached height {cached} differs from computed height {computed} at depth {depth}")]
    Height {
        depth: usize,
        cached: usize,
        computed: usize,
    },
    #[error("balance factor {factor} out of range at depth {depth}")]
    Balance { depth: usize, factor: isize },
    #[error("counted {counted} nodes, but {recorded} are recorded")]
    Count { counted: usize, recorded: usize },
}
