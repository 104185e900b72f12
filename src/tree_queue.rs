use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::tree_traits::Tree;

/// Level order: FIFO queue seeded with the start node, each visited node
/// enqueues its children in their defined order.
pub struct BreadthFirst<'a, T: Tree + ?Sized> {
    tree: &'a T,
    queue: VecDeque<T::Position>,
}

impl<'a, T: Tree + ?Sized> BreadthFirst<'a, T> {
    pub(crate) fn new(tree: &'a T, start: Option<T::Position>) -> Self {
        Self {
            tree,
            queue: start.into_iter().collect(),
        }
    }
}

impl<T: Tree + ?Sized> Iterator for BreadthFirst<'_, T> {
    type Item = T::Position;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.queue.pop_front()?;
        if let Ok(children) = self.tree.children(current) {
            self.queue.extend(children);
        }
        Some(current)
    }
}

impl<T: Tree + ?Sized> FusedIterator for BreadthFirst<'_, T> {}
