//! Opaque node handles shared by every container in the crate.
//!
//! A [`Position`] pairs the identity of the container that produced it with a
//! generational arena index. Deleting a node removes it from its arena, which
//! bumps the generation: the old index never resolves again, so every position
//! wrapping a deleted node is permanently invalid.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};

use crate::errors::{PositionFault, TreeError, TreeResult};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one container instance, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(u64);

impl ContainerId {
    pub(crate) fn fresh() -> Self {
        Self(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle kinds. Each container hands out positions of its own kind, so a
/// position can never be passed to a container of a different kind.
pub mod kind {
    /// Positions of a [`LinkedBinary`](crate::binary::LinkedBinary).
    pub enum Binary {}
    /// Positions of a [`GeneralTree`](crate::general::GeneralTree).
    pub enum General {}
    /// Positions of a [`DoublyLinkedList`](crate::list::DoublyLinkedList).
    pub enum Listed {}
}

/// Handle naming a node inside one specific container.
pub struct Position<K> {
    owner: ContainerId,
    index: Index,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Position<K> {
    pub(crate) fn new(owner: ContainerId, index: Index) -> Self {
        Self {
            owner,
            index,
            _kind: PhantomData,
        }
    }

    pub(crate) fn index(&self) -> Index {
        self.index
    }

    /// Container that produced this position.
    pub fn owner(&self) -> ContainerId {
        self.owner
    }

    /// Resolves the position against `arena`, owned by container `owner`.
    pub(crate) fn resolve<'a, N>(&self, owner: ContainerId, arena: &'a Arena<N>) -> TreeResult<&'a N> {
        if self.owner != owner {
            return Err(TreeError::InvalidPosition(PositionFault::ForeignContainer));
        }
        arena
            .get(self.index)
            .ok_or(TreeError::InvalidPosition(PositionFault::Deleted))
    }

    pub(crate) fn resolve_mut<'a, N>(
        &self,
        owner: ContainerId,
        arena: &'a mut Arena<N>,
    ) -> TreeResult<&'a mut N> {
        if self.owner != owner {
            return Err(TreeError::InvalidPosition(PositionFault::ForeignContainer));
        }
        arena
            .get_mut(self.index)
            .ok_or(TreeError::InvalidPosition(PositionFault::Deleted))
    }
}

impl<K> Clone for Position<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Position<K> {}

impl<K> PartialEq for Position<K> {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.index == other.index
    }
}

impl<K> Eq for Position<K> {}

impl<K> Hash for Position<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.index.hash(state);
    }
}

impl<K> fmt::Debug for Position<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.index.into_raw_parts();
        f.debug_struct("Position")
            .field("owner", &self.owner.0)
            .field("slot", &slot)
            .field("generation", &generation)
            .finish()
    }
}
