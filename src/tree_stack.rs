/*
Stack based depth-first traversals.

Each iterator mimics the call stack of the recursive definition with an explicit Vec,
so arbitrarily deep trees are walked without recursion limits. Iterators borrow the tree
immutably for their whole lifetime; calling `preorder()` again starts a fresh walk.
 */
use std::iter::FusedIterator;

use crate::tree_traits::{BinaryTree, Tree};

/// Node first, then each child subtree left to right.
pub struct Preorder<'a, T: Tree + ?Sized> {
    tree: &'a T,
    stack: Vec<T::Position>,
}

impl<'a, T: Tree + ?Sized> Preorder<'a, T> {
    pub(crate) fn new(tree: &'a T, start: Option<T::Position>) -> Self {
        Self {
            tree,
            stack: start.into_iter().collect(),
        }
    }
}

impl<T: Tree + ?Sized> Iterator for Preorder<'_, T> {
    type Item = T::Position;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        if let Ok(children) = self.tree.children(current) {
            // Push children in reverse order for left-to-right traversal
            self.stack.extend(children.rev());
        }
        Some(current)
    }
}

impl<T: Tree + ?Sized> FusedIterator for Preorder<'_, T> {}

/// Each child subtree left to right, then the node.
pub struct Postorder<'a, T: Tree + ?Sized> {
    tree: &'a T,
    /// (position, children already expanded)
    stack: Vec<(T::Position, bool)>,
}

impl<'a, T: Tree + ?Sized> Postorder<'a, T> {
    pub(crate) fn new(tree: &'a T, start: Option<T::Position>) -> Self {
        Self {
            tree,
            stack: start.map(|p| (p, false)).into_iter().collect(),
        }
    }
}

impl<T: Tree + ?Sized> Iterator for Postorder<'_, T> {
    type Item = T::Position;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, expanded)) = self.stack.pop() {
            if expanded {
                return Some(current);
            }
            self.stack.push((current, true));
            if let Ok(children) = self.tree.children(current) {
                self.stack.extend(children.rev().map(|c| (c, false)));
            }
        }
        None
    }
}

impl<T: Tree + ?Sized> FusedIterator for Postorder<'_, T> {}

/// Left subtree, node, right subtree.
pub struct Inorder<'a, T: BinaryTree + ?Sized> {
    tree: &'a T,
    stack: Vec<T::Position>,
    /// Next subtree whose left spine still has to be pushed
    pending: Option<T::Position>,
}

impl<'a, T: BinaryTree + ?Sized> Inorder<'a, T> {
    pub(crate) fn new(tree: &'a T, start: Option<T::Position>) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            pending: start,
        }
    }
}

impl<T: BinaryTree + ?Sized> Iterator for Inorder<'_, T> {
    type Item = T::Position;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(p) = self.pending {
            self.stack.push(p);
            self.pending = self.tree.left(p).ok().flatten();
        }
        let current = self.stack.pop()?;
        self.pending = self.tree.right(current).ok().flatten();
        Some(current)
    }
}

impl<T: BinaryTree + ?Sized> FusedIterator for Inorder<'_, T> {}
