//! Diagnostic rendering of the tree shape.

use std::fmt::{self, Display};
use std::io::{self, Write};

use crate::node::Node;
use crate::AvlTree;

const HEADER: &str = "AVL tree (h - height, b - balance):";
const EMPTY: &str = "Tree is empty";

/// Renders a tree one node per line, annotated with height and balance factor.
///
/// This `struct` is created by the [`pretty`] method on [`AvlTree`].
///
/// ```
/// use avl_engine::AvlTree;
/// let mut tree = AvlTree::new();
/// tree.insert(2);
/// tree.insert(1);
/// assert_eq!(
///     tree.pretty().to_string(),
///     "AVL tree (h - height, b - balance):\n\
///      └──2 (h:2, b:1)\n    \
///          ├──1 (h:1, b:0)\n",
/// );
/// ```
///
/// [`AvlTree`]: struct.AvlTree.html
/// [`pretty`]: struct.AvlTree.html#method.pretty
pub struct Pretty<'a, T> {
    tree: &'a AvlTree<T>,
}

impl<T: Display> AvlTree<T> {
    /// Returns a displayable rendering of the tree shape.
    pub fn pretty(&self) -> Pretty<'_, T> {
        Pretty { tree: self }
    }

    /// Writes the rendering of the tree shape, followed by an empty line.
    pub fn write_pretty<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.pretty())
    }

    /// Prints the rendering of the tree shape to standard output.
    pub fn print(&self) -> io::Result<()> {
        self.write_pretty(&mut io::stdout().lock())
    }
}

impl<T: Display> Display for Pretty<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.tree.root() {
            None => writeln!(f, "{}", EMPTY),
            Some(root) => {
                writeln!(f, "{}", HEADER)?;
                write_node(f, root, "", false)
            }
        }
    }
}

fn write_node<T: Display>(
    f: &mut fmt::Formatter,
    node: &Node<T>,
    prefix: &str,
    is_left: bool,
) -> fmt::Result {
    let branch = if is_left { "├──" } else { "└──" };
    writeln!(
        f,
        "{}{}{} (h:{}, b:{})",
        prefix,
        branch,
        node.value,
        node.height,
        node.balance_factor()
    )?;

    let child_prefix = format!("{}{}", prefix, if is_left { "│   " } else { "    " });
    if let Some(left) = node.left.as_deref() {
        write_node(f, left, &child_prefix, true)?;
    }
    if let Some(right) = node.right.as_deref() {
        write_node(f, right, &child_prefix, false)?;
    }
    Ok(())
}
