//! Positional doubly-linked list bounded by header and trailer sentinels.
//!
//! Nodes live in a generational arena; `prev`/`next` links are arena indices.
//! The two sentinels are ordinary arena entries without an element and are
//! never exposed as positions.

use std::iter::FusedIterator;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::errors::{PositionFault, TreeError, TreeResult};
use crate::position::{kind, ContainerId, Position};

pub type ListPosition = Position<kind::Listed>;

#[derive(Debug)]
struct ListNode<T> {
    /// `None` only for the header and trailer sentinels
    element: Option<T>,
    prev: Option<Index>,
    next: Option<Index>,
}

impl<T> ListNode<T> {
    fn sentinel() -> Self {
        Self {
            element: None,
            prev: None,
            next: None,
        }
    }
}

#[derive(Debug)]
pub struct DoublyLinkedList<T> {
    id: ContainerId,
    nodes: Arena<ListNode<T>>,
    header: Index,
    trailer: Index,
    size: usize,
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DoublyLinkedList<T> {
    pub fn new() -> Self {
        let mut nodes = Arena::new();
        let header = nodes.insert(ListNode::sentinel());
        let trailer = nodes.insert(ListNode::sentinel());
        if let Some(h) = nodes.get_mut(header) {
            h.next = Some(trailer);
        }
        if let Some(t) = nodes.get_mut(trailer) {
            t.prev = Some(header);
        }
        Self {
            id: ContainerId::fresh(),
            nodes,
            header,
            trailer,
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Maps sentinels (and missing links) to `None`.
    fn make_position(&self, idx: Option<Index>) -> Option<ListPosition> {
        idx.filter(|&i| i != self.header && i != self.trailer)
            .map(|i| Position::new(self.id, i))
    }

    fn validate(&self, p: ListPosition) -> TreeResult<&ListNode<T>> {
        let node = p.resolve(self.id, &self.nodes)?;
        if node.element.is_none() {
            return Err(TreeError::InvalidPosition(PositionFault::Sentinel));
        }
        Ok(node)
    }

    fn next_of(&self, idx: Index) -> Option<Index> {
        self.nodes.get(idx).and_then(|n| n.next)
    }

    fn prev_of(&self, idx: Index) -> Option<Index> {
        self.nodes.get(idx).and_then(|n| n.prev)
    }

    /// First element position, or `None` if the list is empty.
    pub fn first(&self) -> Option<ListPosition> {
        self.make_position(self.next_of(self.header))
    }

    /// Last element position, or `None` if the list is empty.
    pub fn last(&self) -> Option<ListPosition> {
        self.make_position(self.prev_of(self.trailer))
    }

    pub fn before(&self, p: ListPosition) -> TreeResult<Option<ListPosition>> {
        let node = self.validate(p)?;
        Ok(self.make_position(node.prev))
    }

    pub fn after(&self, p: ListPosition) -> TreeResult<Option<ListPosition>> {
        let node = self.validate(p)?;
        Ok(self.make_position(node.next))
    }

    pub fn element(&self, p: ListPosition) -> TreeResult<&T> {
        self.validate(p)?
            .element
            .as_ref()
            .ok_or(TreeError::InvalidPosition(PositionFault::Sentinel))
    }

    /// Replaces the element at `p`, returning the previous one.
    pub fn replace(&mut self, p: ListPosition, e: T) -> TreeResult<T> {
        self.validate(p)?;
        let node = p.resolve_mut(self.id, &mut self.nodes)?;
        node.element
            .replace(e)
            .ok_or(TreeError::InvalidPosition(PositionFault::Sentinel))
    }

    // Links a new node between two adjacent nodes. Callers guarantee adjacency.
    fn insert_between(&mut self, e: T, predecessor: Index, successor: Index) -> ListPosition {
        let idx = self.nodes.insert(ListNode {
            element: Some(e),
            prev: Some(predecessor),
            next: Some(successor),
        });
        if let Some(pred) = self.nodes.get_mut(predecessor) {
            pred.next = Some(idx);
        }
        if let Some(succ) = self.nodes.get_mut(successor) {
            succ.prev = Some(idx);
        }
        self.size += 1;
        Position::new(self.id, idx)
    }

    #[instrument(level = "trace", skip(self, e))]
    pub fn insert_first(&mut self, e: T) -> ListPosition {
        let successor = self.next_of(self.header).unwrap_or(self.trailer);
        self.insert_between(e, self.header, successor)
    }

    #[instrument(level = "trace", skip(self, e))]
    pub fn insert_last(&mut self, e: T) -> ListPosition {
        let predecessor = self.prev_of(self.trailer).unwrap_or(self.header);
        self.insert_between(e, predecessor, self.trailer)
    }

    #[instrument(level = "trace", skip(self, e))]
    pub fn insert_before(&mut self, p: ListPosition, e: T) -> TreeResult<ListPosition> {
        let predecessor = self.validate(p)?.prev.unwrap_or(self.header);
        Ok(self.insert_between(e, predecessor, p.index()))
    }

    #[instrument(level = "trace", skip(self, e))]
    pub fn insert_after(&mut self, p: ListPosition, e: T) -> TreeResult<ListPosition> {
        let successor = self.validate(p)?.next.unwrap_or(self.trailer);
        Ok(self.insert_between(e, p.index(), successor))
    }

    fn delete_node(&mut self, idx: Index) -> TreeResult<T> {
        let node = self
            .nodes
            .remove(idx)
            .ok_or(TreeError::InvalidPosition(PositionFault::Deleted))?;
        let predecessor = node.prev.unwrap_or(self.header);
        let successor = node.next.unwrap_or(self.trailer);
        if let Some(pred) = self.nodes.get_mut(predecessor) {
            pred.next = Some(successor);
        }
        if let Some(succ) = self.nodes.get_mut(successor) {
            succ.prev = Some(predecessor);
        }
        self.size -= 1;
        node.element
            .ok_or(TreeError::InvalidPosition(PositionFault::Sentinel))
    }

    /// Removes the element at `p`; `p` and every copy of it become invalid.
    #[instrument(level = "trace", skip(self))]
    pub fn delete(&mut self, p: ListPosition) -> TreeResult<T> {
        self.validate(p)?;
        self.delete_node(p.index())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn delete_first(&mut self) -> TreeResult<T> {
        let first = self.first().ok_or(TreeError::EmptyContainer)?;
        self.delete_node(first.index())
    }

    #[instrument(level = "trace", skip(self))]
    pub fn delete_last(&mut self) -> TreeResult<T> {
        let last = self.last().ok_or(TreeError::EmptyContainer)?;
        self.delete_node(last.index())
    }

    /// Elements front to back; reversible.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.next_of(self.header),
            back: self.prev_of(self.trailer),
            remaining: self.size,
        }
    }

    /// Element positions front to back.
    pub fn positions(&self) -> Positions<'_, T> {
        Positions {
            list: self,
            cursor: self.first(),
        }
    }
}

impl<T> Extend<T> for DoublyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for e in iter {
            self.insert_last(e);
        }
    }
}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, T> {
    list: &'a DoublyLinkedList<T>,
    front: Option<Index>,
    back: Option<Index>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes.get(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        node.element.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.nodes.get(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        node.element.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

pub struct Positions<'a, T> {
    list: &'a DoublyLinkedList<T>,
    cursor: Option<ListPosition>,
}

impl<T> Iterator for Positions<'_, T> {
    type Item = ListPosition;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        self.cursor = self.list.after(current).ok().flatten();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_new_list_when_queried_then_empty_without_positions() {
        let list: DoublyLinkedList<i32> = DoublyLinkedList::new();
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
        assert_eq!(list.iter().next(), None);
    }

    #[test]
    fn given_mixed_inserts_when_iterating_then_order_follows_links() {
        let mut list = DoublyLinkedList::new();
        let b = list.insert_first("b");
        list.insert_first("a");
        list.insert_last("d");
        list.insert_after(b, "c").unwrap();

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec!["d", "c", "b", "a"]);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn given_single_element_when_navigating_then_neighbours_are_absent() {
        let mut list = DoublyLinkedList::new();
        let p = list.insert_last(7);
        assert_eq!(list.first(), Some(p));
        assert_eq!(list.last(), Some(p));
        assert_eq!(list.before(p).unwrap(), None);
        assert_eq!(list.after(p).unwrap(), None);
    }

    #[test]
    fn given_deleted_position_when_reused_then_invalid() {
        let mut list = DoublyLinkedList::new();
        let p = list.insert_last(1);
        assert_eq!(list.delete(p), Ok(1));
        assert_eq!(
            list.element(p),
            Err(TreeError::InvalidPosition(PositionFault::Deleted))
        );
        assert_eq!(
            list.delete(p),
            Err(TreeError::InvalidPosition(PositionFault::Deleted))
        );
    }

    #[test]
    fn given_empty_list_when_deleting_ends_then_empty_container() {
        let mut list: DoublyLinkedList<u8> = DoublyLinkedList::new();
        assert_eq!(list.delete_first(), Err(TreeError::EmptyContainer));
        assert_eq!(list.delete_last(), Err(TreeError::EmptyContainer));
    }

    #[rstest]
    #[case(&[true, true, false, true, false, false])]
    #[case(&[true, false, true, true, true, false])]
    #[case(&[false, true, false])]
    fn given_operation_sequence_when_replayed_then_len_matches_net_inserts(#[case] ops: &[bool]) {
        let mut list = DoublyLinkedList::new();
        let mut inserts = 0usize;
        let mut deletes = 0usize;
        for (i, &insert) in ops.iter().enumerate() {
            if insert {
                if i % 2 == 0 {
                    list.insert_first(i);
                } else {
                    list.insert_last(i);
                }
                inserts += 1;
            } else {
                let result = if i % 2 == 0 { list.delete_first() } else { list.delete_last() };
                if result.is_ok() {
                    deletes += 1;
                }
            }
            assert_eq!(list.len(), inserts - deletes);
            assert_eq!(list.is_empty(), list.len() == 0);
        }
    }

    #[test]
    fn given_foreign_position_when_used_then_rejected() {
        let mut a = DoublyLinkedList::new();
        let b: DoublyLinkedList<i32> = DoublyLinkedList::new();
        let p = a.insert_last(1);
        assert_eq!(
            b.element(p),
            Err(TreeError::InvalidPosition(PositionFault::ForeignContainer))
        );
    }

    #[test]
    fn given_positions_when_replacing_then_returns_previous_element() {
        let mut list: DoublyLinkedList<String> = ["x", "y"].iter().map(|s| s.to_string()).collect();
        let second = list.positions().nth(1).unwrap();
        assert_eq!(list.replace(second, "z".into()).unwrap(), "y");
        assert_eq!(list.iter().cloned().collect::<Vec<_>>(), vec!["x", "z"]);
    }
}
