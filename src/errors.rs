use std::fmt;

use thiserror::Error;

/// Why a position was rejected by its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionFault {
    /// The position was produced by a different container instance.
    ForeignContainer,
    /// The node behind the position has been deleted.
    Deleted,
    /// The position names a list boundary node.
    Sentinel,
}

impl fmt::Display for PositionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PositionFault::ForeignContainer => "position belongs to another container",
            PositionFault::Deleted => "position refers to a deleted node",
            PositionFault::Sentinel => "position refers to a sentinel node",
        };
        f.write_str(msg)
    }
}

/// Structural rule a mutation would have broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    RootExists,
    LeftOccupied,
    RightOccupied,
    NotALeaf,
    TwoChildren,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Conflict::RootExists => "tree already has a root",
            Conflict::LeftOccupied => "position already has a left child",
            Conflict::RightOccupied => "position already has a right child",
            Conflict::NotALeaf => "position must be a leaf",
            Conflict::TwoChildren => "position has two children",
        };
        f.write_str(msg)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("container is empty")]
    EmptyContainer,

    #[error("invalid position: {0}")]
    InvalidPosition(PositionFault),

    #[error("structural conflict: {0}")]
    StructuralConflict(Conflict),

    #[error("malformed parenthetic input at offset {offset}: {reason}")]
    MalformedInput {
        offset: usize,
        reason: String,
    },
}

impl TreeError {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            offset,
            reason: reason.into(),
        }
    }
}

pub type TreeResult<T> = Result<T, TreeError>;
