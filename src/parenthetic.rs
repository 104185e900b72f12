//! Parenthetic notation: `label ( '(' tree ( ',' tree )* ')' )?`
//!
//! Labels are maximal runs of characters other than `(`, `)` and `,`. The
//! serializer separates siblings with `", "`; when parsing, a single space
//! right after a comma belongs to that separator. All other whitespace is part
//! of the label.

use std::fmt::{Display, Write};

use tracing::{debug, instrument, trace};

use crate::errors::{TreeError, TreeResult};
use crate::general::{GeneralPosition, GeneralTree};
use crate::tree_traits::Tree;

pub const OPEN: char = '(';
pub const CLOSE: char = ')';
pub const SEPARATOR: char = ',';

enum Step<P> {
    Enter(P),
    Separator,
    Close,
}

/// Renders `tree` in parenthetic notation, e.g. `A(B(C, D), E)`.
///
/// An empty tree renders as the empty string.
pub fn parenthetic<T>(tree: &T) -> String
where
    T: Tree + ?Sized,
    T::Element: Display,
{
    let mut out = String::new();
    let mut stack: Vec<Step<T::Position>> = tree.root().map(Step::Enter).into_iter().collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(p) => {
                if let Ok(e) = tree.element(p) {
                    let _ = write!(out, "{}", e);
                }
                let children: Vec<T::Position> = match tree.children(p) {
                    Ok(children) => children.collect(),
                    Err(_) => Vec::new(),
                };
                if children.is_empty() {
                    continue;
                }
                out.push(OPEN);
                stack.push(Step::Close);
                for (i, child) in children.into_iter().enumerate().rev() {
                    stack.push(Step::Enter(child));
                    if i > 0 {
                        stack.push(Step::Separator);
                    }
                }
            }
            Step::Separator => {
                out.push(SEPARATOR);
                out.push(' ');
            }
            Step::Close => out.push(CLOSE),
        }
    }
    out
}

/// Builds a [`GeneralTree`] from parenthetic text.
///
/// Scans left to right with a cursor that starts at a fresh root with an
/// empty label. Fails with [`TreeError::MalformedInput`] on an unmatched `)`,
/// on `(` left open at the end of the input, on a `,` outside any group, and
/// on a label or `(` directly following a closed group. Whitespace after a
/// closed group is ignored.
///
/// Exactly one space after a `,` is consumed as part of the separator, so
/// `"A(B, C)"` yields the label `"C"`, not `" C"`, and `"A(B,  C)"` yields
/// `" C"`. Any other whitespace stays in the label.
#[instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn parse_parenthetic(text: &str) -> TreeResult<GeneralTree<String>> {
    let mut tree = GeneralTree::new();
    let root = tree.add_root(String::new())?;
    let mut cursor = root;
    let mut label = String::new();
    // a group was just closed: only ',' or ')' may follow
    let mut closed = false;
    // the previous character was a separator comma
    let mut after_separator = false;

    for (offset, ch) in text.char_indices() {
        let skip_space = after_separator && ch == ' ';
        after_separator = false;
        if skip_space {
            continue;
        }
        match ch {
            OPEN => {
                if closed {
                    return Err(TreeError::malformed(offset, "'(' after a closed group"));
                }
                tree.set_element(std::mem::take(&mut label), cursor)?;
                cursor = tree.insert_first(String::new(), cursor)?;
                trace!(offset, "open group");
            }
            SEPARATOR => {
                commit(&mut tree, cursor, &mut label)?;
                let parent = tree
                    .parent(cursor)?
                    .ok_or_else(|| TreeError::malformed(offset, "',' outside of any group"))?;
                cursor = tree.insert_last(String::new(), parent)?;
                closed = false;
                after_separator = true;
            }
            CLOSE => {
                commit(&mut tree, cursor, &mut label)?;
                cursor = tree
                    .parent(cursor)?
                    .ok_or_else(|| TreeError::malformed(offset, "unmatched ')'"))?;
                closed = true;
                trace!(offset, "close group");
            }
            c if closed && c.is_whitespace() => {}
            c if closed => {
                return Err(TreeError::malformed(
                    offset,
                    format!("label text {:?} after a closed group", c),
                ));
            }
            c => label.push(c),
        }
    }

    if cursor != root {
        return Err(TreeError::malformed(text.len(), "unmatched '('"));
    }
    commit(&mut tree, cursor, &mut label)?;
    debug!(nodes = tree.len(), "parsed parenthetic tree");
    Ok(tree)
}

fn commit(tree: &mut GeneralTree<String>, cursor: GeneralPosition, label: &mut String) -> TreeResult<()> {
    if !label.is_empty() {
        tree.set_element(std::mem::take(label), cursor)?;
    }
    Ok(())
}
