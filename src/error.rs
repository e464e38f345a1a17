//! Error types surfaced by pool mutation and object lifecycle calls.

use std::fmt;

use thiserror::Error;

use crate::utils::allocator::ObjectId;

/// Identifies one of the engine's fixed-capacity pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    Fields,
    Vectors,
    Boundaries,
    Objects,
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PoolKind::Fields => "field",
            PoolKind::Vectors => "vector",
            PoolKind::Boundaries => "boundary",
            PoolKind::Objects => "physics object",
        };
        f.write_str(name)
    }
}

/// Errors raised outside the tick. The tick itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhysicsError {
    /// Staging another entry would exceed the pool's fixed capacity.
    #[error("{pool} pool is full (capacity {capacity})")]
    PoolFull {
        /// The pool that rejected the entry.
        pool: PoolKind,
        /// Capacity fixed at construction.
        capacity: usize,
    },

    /// The id does not name a live object (never inserted, released, or stale).
    #[error("unknown physics object {0:?}")]
    UnknownObject(ObjectId),
}

/// Result alias used across the crate.
pub type PhysicsResult<T> = Result<T, PhysicsError>;
