use std::array;
use std::iter::Flatten;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::errors::{Conflict, PositionFault, TreeError, TreeResult};
use crate::position::{kind, ContainerId, Position};
use crate::tree_stack::Preorder;
use crate::tree_traits::{BinaryTree, Tree};

pub type BinaryPosition = Position<kind::Binary>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Binary tree node in the arena.
#[derive(Debug)]
struct BinaryNode<T> {
    element: T,
    /// Index of parent node in the arena, None for the root
    parent: Option<Index>,
    left: Option<Index>,
    right: Option<Index>,
}

impl<T> BinaryNode<T> {
    fn new(element: T, parent: Option<Index>) -> Self {
        Self {
            element,
            parent,
            left: None,
            right: None,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut Option<Index> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Linked binary tree; node links are arena indices.
///
/// Every node is owned by exactly one tree. [`attach`](Self::attach) moves the
/// donor trees' nodes into the receiver and leaves the donors empty.
#[derive(Debug)]
pub struct LinkedBinary<T> {
    id: ContainerId,
    nodes: Arena<BinaryNode<T>>,
    root: Option<Index>,
}

impl<T> Default for LinkedBinary<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedBinary<T> {
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

    fn make_position(&self, idx: Option<Index>) -> Option<BinaryPosition> {
        idx.map(|i| Position::new(self.id, i))
    }

    fn validate(&self, p: BinaryPosition) -> TreeResult<&BinaryNode<T>> {
        p.resolve(self.id, &self.nodes)
    }

    fn validate_mut(&mut self, p: BinaryPosition) -> TreeResult<&mut BinaryNode<T>> {
        p.resolve_mut(self.id, &mut self.nodes)
    }

    pub fn element_mut(&mut self, p: BinaryPosition) -> TreeResult<&mut T> {
        Ok(&mut self.validate_mut(p)?.element)
    }

    /// Creates the root of an empty tree.
    #[instrument(level = "trace", skip(self, e))]
    pub fn add_root(&mut self, e: T) -> TreeResult<BinaryPosition> {
        if self.root.is_some() {
            return Err(TreeError::StructuralConflict(Conflict::RootExists));
        }
        let idx = self.nodes.insert(BinaryNode::new(e, None));
        self.root = Some(idx);
        Ok(Position::new(self.id, idx))
    }

    fn add_child(&mut self, p: BinaryPosition, e: T, side: Side) -> TreeResult<BinaryPosition> {
        let node = self.validate(p)?;
        let occupied = match side {
            Side::Left => node.left.is_some(),
            Side::Right => node.right.is_some(),
        };
        if occupied {
            let conflict = match side {
                Side::Left => Conflict::LeftOccupied,
                Side::Right => Conflict::RightOccupied,
            };
            return Err(TreeError::StructuralConflict(conflict));
        }
        let idx = self.nodes.insert(BinaryNode::new(e, Some(p.index())));
        *self.validate_mut(p)?.slot_mut(side) = Some(idx);
        Ok(Position::new(self.id, idx))
    }

    #[instrument(level = "trace", skip(self, e))]
    pub fn add_left(&mut self, p: BinaryPosition, e: T) -> TreeResult<BinaryPosition> {
        self.add_child(p, e, Side::Left)
    }

    #[instrument(level = "trace", skip(self, e))]
    pub fn add_right(&mut self, p: BinaryPosition, e: T) -> TreeResult<BinaryPosition> {
        self.add_child(p, e, Side::Right)
    }

    /// Stores `e` at `p` and returns the previous element.
    pub fn replace(&mut self, p: BinaryPosition, e: T) -> TreeResult<T> {
        Ok(std::mem::replace(&mut self.validate_mut(p)?.element, e))
    }

    /// Removes the node at `p`, promoting its only child (if any) into its slot.
    ///
    /// Nodes with two children cannot be deleted: which subtree should survive
    /// is ambiguous.
    #[instrument(level = "trace", skip(self))]
    pub fn delete(&mut self, p: BinaryPosition) -> TreeResult<T> {
        let node = self.validate(p)?;
        if node.left.is_some() && node.right.is_some() {
            return Err(TreeError::StructuralConflict(Conflict::TwoChildren));
        }
        let idx = p.index();
        let child = node.left.or(node.right);
        let parent = node.parent;

        if let Some(c) = child.and_then(|c| self.nodes.get_mut(c)) {
            c.parent = parent;
        }
        match parent {
            None => self.root = child,
            Some(par) => {
                if let Some(par) = self.nodes.get_mut(par) {
                    if par.left == Some(idx) {
                        par.left = child;
                    } else {
                        par.right = child;
                    }
                }
            }
        }
        self.nodes
            .remove(idx)
            .map(|removed| removed.element)
            .ok_or(TreeError::InvalidPosition(PositionFault::Deleted))
    }

    /// Attaches `t1` and `t2` as the left and right subtrees of leaf `p`.
    ///
    /// Both donors are left empty; positions previously taken from them are
    /// invalid afterwards.
    #[instrument(level = "debug", skip(self, t1, t2))]
    pub fn attach(
        &mut self,
        p: BinaryPosition,
        t1: &mut LinkedBinary<T>,
        t2: &mut LinkedBinary<T>,
    ) -> TreeResult<()> {
        if !self.is_leaf(p)? {
            return Err(TreeError::StructuralConflict(Conflict::NotALeaf));
        }
        debug!("attaching {} + {} nodes", t1.len(), t2.len());
        self.adopt(t1, p.index(), Side::Left);
        self.adopt(t2, p.index(), Side::Right);
        Ok(())
    }

    // Moves every node of `donor` into this arena, hanging the donor root in
    // `parent`'s `side` slot. Donor nodes are removed one by one so their old
    // indices stay dead.
    fn adopt(&mut self, donor: &mut LinkedBinary<T>, parent: Index, side: Side) {
        let Some(donor_root) = donor.root.take() else {
            return;
        };
        let mut stack = vec![(donor_root, parent, side)];
        while let Some((old, new_parent, side)) = stack.pop() {
            let Some(node) = donor.nodes.remove(old) else {
                continue;
            };
            let new = self.nodes.insert(BinaryNode::new(node.element, Some(new_parent)));
            if let Some(par) = self.nodes.get_mut(new_parent) {
                *par.slot_mut(side) = Some(new);
            }
            if let Some(left) = node.left {
                stack.push((left, new, Side::Left));
            }
            if let Some(right) = node.right {
                stack.push((right, new, Side::Right));
            }
        }
    }
}

impl<T> Tree for LinkedBinary<T> {
    type Element = T;
    type Position = BinaryPosition;
    type Children<'a> = Flatten<array::IntoIter<Option<BinaryPosition>, 2>> where Self: 'a;
    type Positions<'a> = Preorder<'a, Self> where Self: 'a;

    fn root(&self) -> Option<BinaryPosition> {
        self.make_position(self.root)
    }

    fn parent(&self, p: BinaryPosition) -> TreeResult<Option<BinaryPosition>> {
        let node = self.validate(p)?;
        Ok(self.make_position(node.parent))
    }

    fn children(&self, p: BinaryPosition) -> TreeResult<Self::Children<'_>> {
        let node = self.validate(p)?;
        Ok([self.make_position(node.left), self.make_position(node.right)]
            .into_iter()
            .flatten())
    }

    fn num_children(&self, p: BinaryPosition) -> TreeResult<usize> {
        let node = self.validate(p)?;
        Ok(usize::from(node.left.is_some()) + usize::from(node.right.is_some()))
    }

    fn element(&self, p: BinaryPosition) -> TreeResult<&T> {
        Ok(&self.validate(p)?.element)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Preorder is the default traversal of a binary tree.
    fn positions(&self) -> Self::Positions<'_> {
        self.preorder()
    }
}

impl<T> BinaryTree for LinkedBinary<T> {
    fn left(&self, p: BinaryPosition) -> TreeResult<Option<BinaryPosition>> {
        let node = self.validate(p)?;
        Ok(self.make_position(node.left))
    }

    fn right(&self, p: BinaryPosition) -> TreeResult<Option<BinaryPosition>> {
        let node = self.validate(p)?;
        Ok(self.make_position(node.right))
    }
}
