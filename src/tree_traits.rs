/*
Capability contracts shared by both tree variants.

The traversal engine (tree_stack, tree_queue) and the parenthetic codec are written
once against these traits; LinkedBinary and GeneralTree only provide navigation.
 */
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use termtree::Tree as TermTree;
use tracing::{instrument, warn};

use crate::errors::{TreeError, TreeResult};
use crate::tree_queue::BreadthFirst;
use crate::tree_stack::{Inorder, Postorder, Preorder};

/// Position-based navigation over a rooted tree.
pub trait Tree {
    type Element;
    type Position: Copy + Eq + Hash + Debug;
    /// Children of one node in their defined left-to-right order.
    type Children<'a>: DoubleEndedIterator<Item = Self::Position>
    where
        Self: 'a;
    /// The variant's default full traversal.
    type Positions<'a>: Iterator<Item = Self::Position>
    where
        Self: 'a;

    fn root(&self) -> Option<Self::Position>;

    /// Parent of `p`, `None` for the root.
    fn parent(&self, p: Self::Position) -> TreeResult<Option<Self::Position>>;

    fn children(&self, p: Self::Position) -> TreeResult<Self::Children<'_>>;

    fn num_children(&self, p: Self::Position) -> TreeResult<usize>;

    fn element(&self, p: Self::Position) -> TreeResult<&Self::Element>;

    fn len(&self) -> usize;

    fn positions(&self) -> Self::Positions<'_>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_root(&self, p: Self::Position) -> TreeResult<bool> {
        Ok(self.parent(p)?.is_none())
    }

    fn is_leaf(&self, p: Self::Position) -> TreeResult<bool> {
        Ok(self.num_children(p)? == 0)
    }

    /// Number of ancestors of `p`; the root has depth 0.
    fn depth(&self, p: Self::Position) -> TreeResult<usize> {
        let mut depth = 0;
        let mut current = self.parent(p)?;
        while let Some(ancestor) = current {
            depth += 1;
            current = self.parent(ancestor)?;
        }
        Ok(depth)
    }

    /// Height of the whole tree: 0 for a single node.
    fn height(&self) -> TreeResult<usize> {
        let root = self.root().ok_or(TreeError::EmptyContainer)?;
        self.height_of(root)
    }

    /// Height of the subtree rooted at `p`: 0 for a leaf.
    fn height_of(&self, p: Self::Position) -> TreeResult<usize> {
        let mut height = 0;
        let mut stack = vec![(p, 0usize)];
        while let Some((current, level)) = stack.pop() {
            height = height.max(level);
            for child in self.children(current)? {
                stack.push((child, level + 1));
            }
        }
        Ok(height)
    }

    fn preorder(&self) -> Preorder<'_, Self> {
        Preorder::new(self, self.root())
    }

    fn postorder(&self) -> Postorder<'_, Self> {
        Postorder::new(self, self.root())
    }

    fn breadth_first(&self) -> BreadthFirst<'_, Self> {
        BreadthFirst::new(self, self.root())
    }

    /// Preorder over the subtree rooted at `p`.
    fn preorder_from(&self, p: Self::Position) -> TreeResult<Preorder<'_, Self>> {
        self.element(p)?;
        Ok(Preorder::new(self, Some(p)))
    }

    fn postorder_from(&self, p: Self::Position) -> TreeResult<Postorder<'_, Self>> {
        self.element(p)?;
        Ok(Postorder::new(self, Some(p)))
    }

    fn breadth_first_from(&self, p: Self::Position) -> TreeResult<BreadthFirst<'_, Self>> {
        self.element(p)?;
        Ok(BreadthFirst::new(self, Some(p)))
    }

    /// Elements in `positions()` order.
    fn elements(&self) -> Elements<'_, Self> {
        Elements {
            tree: self,
            positions: self.positions(),
        }
    }

    /// Nested-parenthesis text form, e.g. `A(B(C, D), E)`.
    fn parenthetic(&self) -> String
    where
        Self::Element: Display,
    {
        crate::parenthetic::parenthetic(self)
    }
}

/// A tree whose nodes have a fixed left and right slot.
pub trait BinaryTree: Tree {
    fn left(&self, p: Self::Position) -> TreeResult<Option<Self::Position>>;

    fn right(&self, p: Self::Position) -> TreeResult<Option<Self::Position>>;

    /// The other child of `p`'s parent: left and right are each other's sibling.
    fn sibling(&self, p: Self::Position) -> TreeResult<Option<Self::Position>> {
        let Some(parent) = self.parent(p)? else {
            return Ok(None);
        };
        if self.left(parent)? == Some(p) {
            self.right(parent)
        } else {
            self.left(parent)
        }
    }

    fn inorder(&self) -> Inorder<'_, Self> {
        Inorder::new(self, self.root())
    }

    fn inorder_from(&self, p: Self::Position) -> TreeResult<Inorder<'_, Self>> {
        self.element(p)?;
        Ok(Inorder::new(self, Some(p)))
    }
}

pub struct Elements<'a, T: Tree + ?Sized + 'a> {
    tree: &'a T,
    positions: T::Positions<'a>,
}

impl<'a, T: Tree + ?Sized + 'a> Iterator for Elements<'a, T> {
    type Item = &'a T::Element;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let p = self.positions.next()?;
            if let Ok(e) = self.tree.element(p) {
                return Some(e);
            }
        }
    }
}

/// Deepest level drawn by [`TreeRender::to_tree_string`].
///
/// The returned `termtree::Tree` is a nested value whose drop recurses once per
/// level, so diagrams are cut off below this depth.
pub const RENDER_DEPTH_LIMIT: usize = 1_000;

/// Leaf shown in place of children below the depth limit.
pub const TRUNCATED: &str = "...";

pub trait TreeRender {
    /// Diagram of the whole tree, cut off at [`RENDER_DEPTH_LIMIT`].
    fn to_tree_string(&self) -> TermTree<String> {
        self.to_tree_string_limited(RENDER_DEPTH_LIMIT)
    }

    /// Diagram down to depth `max_depth`; deeper children collapse into a single
    /// [`TRUNCATED`] leaf.
    fn to_tree_string_limited(&self, max_depth: usize) -> TermTree<String>;
}

impl<X> TreeRender for X
where
    X: Tree,
    X::Element: Display,
{
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string_limited(&self, max_depth: usize) -> TermTree<String> {
        let Some(root) = self.root() else {
            return TermTree::new("Empty tree".to_string());
        };

        // Depth-bounded preorder; reversed, every child comes before its parent.
        let mut order: Vec<(X::Position, usize)> = Vec::new();
        let mut stack = vec![(root, 0usize)];
        while let Some((p, depth)) = stack.pop() {
            order.push((p, depth));
            if depth < max_depth {
                if let Ok(children) = self.children(p) {
                    stack.extend(children.rev().map(|c| (c, depth + 1)));
                }
            }
        }

        let mut built: HashMap<X::Position, TermTree<String>> = HashMap::new();
        let mut truncated = 0usize;
        for (p, depth) in order.into_iter().rev() {
            let label = self
                .element(p)
                .map(|e| e.to_string())
                .unwrap_or_default();
            let leaves: Vec<TermTree<String>> = if depth < max_depth {
                match self.children(p) {
                    Ok(children) => children.filter_map(|c| built.remove(&c)).collect(),
                    Err(_) => Vec::new(),
                }
            } else if self.is_leaf(p).unwrap_or(true) {
                Vec::new()
            } else {
                truncated += 1;
                vec![TermTree::new(TRUNCATED.to_string())]
            };
            built.insert(p, TermTree::new(label).with_leaves(leaves));
        }
        if truncated > 0 {
            warn!(max_depth, truncated, "tree diagram truncated");
        }
        built
            .remove(&root)
            .unwrap_or_else(|| TermTree::new("Empty tree".to_string()))
    }
}
