//! Positional trees built on linked primitives.
//!
//! - [`LinkedBinary`]: binary tree with fixed left/right slots
//! - [`GeneralTree`]: any number of ordered children, kept in a [`DoublyLinkedList`]
//! - [`Tree`] / [`BinaryTree`]: the shared navigation contract with preorder,
//!   postorder, breadth-first and (binary only) inorder traversals
//! - [`parse_parenthetic`] / [`Tree::parenthetic`]: nested-parenthesis text form
//!
//! Nodes are addressed through [`Position`] handles. A position is tied to the
//! container that produced it and becomes permanently invalid once its node is
//! deleted.

pub mod binary;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod general;
pub mod list;
pub mod parenthetic;
pub mod position;
pub mod tree_queue;
pub mod tree_stack;
pub mod tree_traits;
pub mod util;

pub use binary::{BinaryPosition, LinkedBinary};
pub use errors::{Conflict, PositionFault, TreeError, TreeResult};
pub use general::{GeneralPosition, GeneralTree};
pub use list::{DoublyLinkedList, ListPosition};
pub use parenthetic::{parenthetic, parse_parenthetic};
pub use position::{ContainerId, Position};
pub use tree_traits::{BinaryTree, Tree, TreeRender, RENDER_DEPTH_LIMIT};
