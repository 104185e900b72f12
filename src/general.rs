use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::errors::{Conflict, PositionFault, TreeError, TreeResult};
use crate::list::{self, DoublyLinkedList};
use crate::position::{kind, ContainerId, Position};
use crate::tree_stack::Postorder;
use crate::tree_traits::Tree;

pub type GeneralPosition = Position<kind::General>;

/// General tree node in the arena.
#[derive(Debug)]
struct GeneralNode<T> {
    element: T,
    /// Index of parent node in the arena, None for the root
    parent: Option<Index>,
    /// Child indices in order; created on first insert, absent means no children
    children: Option<DoublyLinkedList<Index>>,
}

impl<T> GeneralNode<T> {
    fn new(element: T, parent: Option<Index>) -> Self {
        Self {
            element,
            parent,
            children: None,
        }
    }

    fn child_count(&self) -> usize {
        self.children.as_ref().map_or(0, DoublyLinkedList::len)
    }
}

#[derive(Debug, Clone, Copy)]
enum End {
    First,
    Last,
}

/// Tree with any number of ordered children per node.
///
/// Each node keeps its children in its own [`DoublyLinkedList`]; that list is
/// the only way children are added or removed.
#[derive(Debug)]
pub struct GeneralTree<T> {
    id: ContainerId,
    nodes: Arena<GeneralNode<T>>,
    root: Option<Index>,
}

impl<T> Default for GeneralTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GeneralTree<T> {
    pub fn new() -> Self {
        Self {
            id: ContainerId::fresh(),
            nodes: Arena::new(),
            root: None,
        }
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    fn make_position(&self, idx: Option<Index>) -> Option<GeneralPosition> {
        idx.map(|i| Position::new(self.id, i))
    }

    fn validate(&self, p: GeneralPosition) -> TreeResult<&GeneralNode<T>> {
        p.resolve(self.id, &self.nodes)
    }

    fn validate_mut(&mut self, p: GeneralPosition) -> TreeResult<&mut GeneralNode<T>> {
        p.resolve_mut(self.id, &mut self.nodes)
    }

    /// Creates the root of an empty tree.
    #[instrument(level = "trace", skip(self, e))]
    pub fn add_root(&mut self, e: T) -> TreeResult<GeneralPosition> {
        if self.root.is_some() {
            return Err(TreeError::StructuralConflict(Conflict::RootExists));
        }
        let idx = self.nodes.insert(GeneralNode::new(e, None));
        self.root = Some(idx);
        Ok(Position::new(self.id, idx))
    }

    /// Makes `e` the first child of `p`.
    #[instrument(level = "trace", skip(self, e))]
    pub fn insert_first(&mut self, e: T, p: GeneralPosition) -> TreeResult<GeneralPosition> {
        self.insert_child(e, p, End::First)
    }

    /// Makes `e` the last child of `p`.
    #[instrument(level = "trace", skip(self, e))]
    pub fn insert_last(&mut self, e: T, p: GeneralPosition) -> TreeResult<GeneralPosition> {
        self.insert_child(e, p, End::Last)
    }

    fn insert_child(&mut self, e: T, p: GeneralPosition, end: End) -> TreeResult<GeneralPosition> {
        self.validate(p)?;
        let idx = self.nodes.insert(GeneralNode::new(e, Some(p.index())));
        let children = self
            .validate_mut(p)?
            .children
            .get_or_insert_with(DoublyLinkedList::new);
        match end {
            End::First => children.insert_first(idx),
            End::Last => children.insert_last(idx),
        };
        Ok(Position::new(self.id, idx))
    }

    /// Removes the first child of `p` together with its subtree and returns
    /// the child's element.
    #[instrument(level = "trace", skip(self))]
    pub fn delete_first(&mut self, p: GeneralPosition) -> TreeResult<T> {
        self.delete_child(p, End::First)
    }

    /// Removes the last child of `p` together with its subtree and returns
    /// the child's element.
    #[instrument(level = "trace", skip(self))]
    pub fn delete_last(&mut self, p: GeneralPosition) -> TreeResult<T> {
        self.delete_child(p, End::Last)
    }

    fn delete_child(&mut self, p: GeneralPosition, end: End) -> TreeResult<T> {
        if self.validate(p)?.child_count() == 0 {
            return Err(TreeError::EmptyContainer);
        }
        let children = self
            .validate_mut(p)?
            .children
            .as_mut()
            .ok_or(TreeError::EmptyContainer)?;
        let child = match end {
            End::First => children.delete_first()?,
            End::Last => children.delete_last()?,
        };
        self.remove_subtree(child)
    }

    // Removes `top` and every descendant from the arena, returning `top`'s element.
    fn remove_subtree(&mut self, top: Index) -> TreeResult<T> {
        let node = self
            .nodes
            .remove(top)
            .ok_or(TreeError::InvalidPosition(PositionFault::Deleted))?;
        let mut stack: Vec<Index> = node
            .children
            .iter()
            .flat_map(|list| list.iter().copied())
            .collect();
        let mut removed = 1usize;
        while let Some(idx) = stack.pop() {
            if let Some(descendant) = self.nodes.remove(idx) {
                removed += 1;
                if let Some(list) = descendant.children {
                    stack.extend(list.iter().copied());
                }
            }
        }
        debug!("removed subtree of {} nodes", removed);
        Ok(node.element)
    }

    /// First child of `p`, `None` if `p` has no children.
    pub fn first(&self, p: GeneralPosition) -> TreeResult<Option<GeneralPosition>> {
        let node = self.validate(p)?;
        Ok(self.end_child(node, End::First))
    }

    /// Last child of `p`, `None` if `p` has no children.
    pub fn last(&self, p: GeneralPosition) -> TreeResult<Option<GeneralPosition>> {
        let node = self.validate(p)?;
        Ok(self.end_child(node, End::Last))
    }

    fn end_child(&self, node: &GeneralNode<T>, end: End) -> Option<GeneralPosition> {
        let list = node.children.as_ref()?;
        let lp = match end {
            End::First => list.first(),
            End::Last => list.last(),
        }?;
        let idx = list.element(lp).ok().copied();
        self.make_position(idx)
    }

    /// Stores `e` at `p` and returns the previous element.
    pub fn replace(&mut self, p: GeneralPosition, e: T) -> TreeResult<T> {
        Ok(std::mem::replace(&mut self.validate_mut(p)?.element, e))
    }

    pub fn set_element(&mut self, e: T, p: GeneralPosition) -> TreeResult<()> {
        self.validate_mut(p)?.element = e;
        Ok(())
    }

    pub fn element_mut(&mut self, p: GeneralPosition) -> TreeResult<&mut T> {
        Ok(&mut self.validate_mut(p)?.element)
    }
}

impl<T> Tree for GeneralTree<T> {
    type Element = T;
    type Position = GeneralPosition;
    type Children<'a> = Children<'a> where Self: 'a;
    type Positions<'a> = Postorder<'a, Self> where Self: 'a;

    fn root(&self) -> Option<GeneralPosition> {
        self.make_position(self.root)
    }

    fn parent(&self, p: GeneralPosition) -> TreeResult<Option<GeneralPosition>> {
        let node = self.validate(p)?;
        Ok(self.make_position(node.parent))
    }

    fn children(&self, p: GeneralPosition) -> TreeResult<Children<'_>> {
        let node = self.validate(p)?;
        Ok(Children {
            owner: self.id,
            inner: node.children.as_ref().map(DoublyLinkedList::iter),
        })
    }

    fn num_children(&self, p: GeneralPosition) -> TreeResult<usize> {
        Ok(self.validate(p)?.child_count())
    }

    fn element(&self, p: GeneralPosition) -> TreeResult<&T> {
        Ok(&self.validate(p)?.element)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Postorder is the default traversal of a general tree.
    fn positions(&self) -> Self::Positions<'_> {
        self.postorder()
    }
}

/// Child positions of one general-tree node, in child-list order.
pub struct Children<'a> {
    owner: ContainerId,
    inner: Option<list::Iter<'a, Index>>,
}

impl Iterator for Children<'_> {
    type Item = GeneralPosition;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.inner.as_mut()?.next()?;
        Some(Position::new(self.owner, *idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.as_ref().map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let idx = self.inner.as_mut()?.next_back()?;
        Some(Position::new(self.owner, *idx))
    }
}

impl ExactSizeIterator for Children<'_> {}

impl FusedIterator for Children<'_> {}

impl<T: fmt::Display> fmt::Display for GeneralTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parenthetic())
    }
}

impl FromStr for GeneralTree<String> {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parenthetic::parse_parenthetic(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // r
    // ├── a
    // │   ├── a1
    // │   └── a2
    // └── b
    fn sample() -> (GeneralTree<&'static str>, [GeneralPosition; 5]) {
        let mut t = GeneralTree::new();
        let r = t.add_root("r").unwrap();
        let b = t.insert_first("b", r).unwrap();
        let a = t.insert_first("a", r).unwrap();
        let a2 = t.insert_last("a2", a).unwrap();
        let a1 = t.insert_first("a1", a).unwrap();
        (t, [r, a, b, a1, a2])
    }

    fn labels<'a>(t: &'a GeneralTree<&'static str>, ps: impl Iterator<Item = GeneralPosition>) -> Vec<&'a str> {
        ps.map(|p| *t.element(p).unwrap()).collect()
    }

    #[test]
    fn given_sample_when_reading_children_then_list_order_is_kept() {
        let (t, [r, a, b, a1, a2]) = sample();
        assert_eq!(t.children(r).unwrap().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(t.first(a).unwrap(), Some(a1));
        assert_eq!(t.last(a).unwrap(), Some(a2));
        assert_eq!(t.first(b).unwrap(), None);
        assert_eq!(t.num_children(b).unwrap(), 0);
        assert_eq!(t.len(), 5);
    }

    #[test]
    fn given_sample_when_default_positions_then_postorder() {
        let (t, _) = sample();
        assert_eq!(labels(&t, t.positions()), vec!["a1", "a2", "a", "b", "r"]);
        assert_eq!(t.elements().copied().collect::<Vec<_>>(), vec!["a1", "a2", "a", "b", "r"]);
    }

    #[test]
    fn given_leaf_when_deleting_children_then_empty_container() {
        let (mut t, [_, _, b, _, _]) = sample();
        assert_eq!(t.delete_first(b), Err(TreeError::EmptyContainer));
        assert_eq!(t.delete_last(b), Err(TreeError::EmptyContainer));
        assert_eq!(t.len(), 5);
    }

    #[test]
    fn given_child_with_subtree_when_deleted_then_whole_subtree_is_gone() {
        let (mut t, [r, a, b, a1, _]) = sample();
        assert_eq!(t.delete_first(r), Ok("a"));
        assert_eq!(t.len(), 2);
        assert_eq!(t.first(r).unwrap(), Some(b));
        assert_eq!(
            t.element(a1),
            Err(TreeError::InvalidPosition(PositionFault::Deleted))
        );
        assert_eq!(
            t.parent(a),
            Err(TreeError::InvalidPosition(PositionFault::Deleted))
        );
    }

    #[test]
    fn given_delete_last_when_applied_then_returns_last_child() {
        let (mut t, [_, a, _, a1, a2]) = sample();
        assert_eq!(t.delete_last(a), Ok("a2"));
        assert_eq!(t.last(a).unwrap(), Some(a1));
        assert!(t.element(a2).is_err());
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn given_sample_when_measuring_then_depth_and_height_match() {
        let (t, [r, a, b, a1, _]) = sample();
        assert_eq!(t.depth(r).unwrap(), 0);
        assert_eq!(t.depth(a).unwrap(), 1);
        assert_eq!(t.depth(a1).unwrap(), 2);
        assert_eq!(t.height().unwrap(), 2);
        assert_eq!(t.height_of(a).unwrap(), 1);
        assert_eq!(t.height_of(b).unwrap(), 0);
    }

    #[test]
    fn given_empty_tree_when_height_then_empty_container() {
        let t: GeneralTree<u8> = GeneralTree::new();
        assert_eq!(t.height(), Err(TreeError::EmptyContainer));
        assert_eq!(t.positions().count(), 0);
    }

    #[test]
    fn given_elements_when_replaced_or_set_then_values_change() {
        let (mut t, [r, ..]) = sample();
        assert_eq!(t.replace(r, "root"), Ok("r"));
        t.set_element("top", r).unwrap();
        assert_eq!(t.element(r), Ok(&"top"));
    }
}
