//! Fixed-capacity set with deferred mutation.
//!
//! Entries are staged with [`StagedPool::add`] / [`StagedPool::remove`] and only
//! reach the live array on [`StagedPool::commit`], which the world calls once at
//! the top of every tick. Anything reading the live array during a tick sees
//! the state of the last commit, so the tick can walk it without invalidation.

use crate::error::{PhysicsError, PhysicsResult, PoolKind};

#[derive(Debug, Clone)]
pub struct StagedPool<T> {
    kind: PoolKind,
    capacity: usize,
    live: Vec<T>,
    pending_additions: Vec<T>,
    pending_removals: Vec<T>,
}

impl<T: Copy + PartialEq> StagedPool<T> {
    pub fn new(kind: PoolKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity,
            live: Vec::with_capacity(capacity),
            pending_additions: Vec::with_capacity(capacity),
            pending_removals: Vec::with_capacity(capacity),
        }
    }

    pub fn kind(&self) -> PoolKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stages `item` for insertion at the next commit.
    pub fn add(&mut self, item: T) -> PhysicsResult<()> {
        if !self.has_room() {
            return Err(PhysicsError::PoolFull {
                pool: self.kind,
                capacity: self.capacity,
            });
        }
        self.pending_additions.push(item);
        Ok(())
    }

    /// Stages `item` for removal at the next commit.
    pub fn remove(&mut self, item: T) {
        self.pending_removals.push(item);
    }

    /// Whether one more staged addition still fits after the next commit.
    pub fn has_room(&self) -> bool {
        self.pending_additions.len() < self.capacity && self.concrete_count() < self.capacity
    }

    /// Flushes staged additions, then staged removals.
    ///
    /// Removal swaps the last live entry into the vacated slot, so iteration
    /// order changes after any removal.
    pub fn commit(&mut self) {
        self.live.append(&mut self.pending_additions);

        for item in self.pending_removals.drain(..) {
            if let Some(index) = self.live.iter().position(|live| *live == item) {
                self.live.swap_remove(index);
            }
        }
    }

    /// Number of live entries as of the last commit.
    pub fn count(&self) -> usize {
        self.live.len()
    }

    /// Entry count the live array will have after the next commit, assuming every
    /// staged removal names a live entry.
    pub fn concrete_count(&self) -> usize {
        (self.live.len() + self.pending_additions.len()).saturating_sub(self.pending_removals.len())
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.live.get(index).copied()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.live
    }

    /// Live entries in place, for reordering (e.g. the broad-phase sort).
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.live
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.live.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Whether `item` will be live after the next commit.
    pub fn contains(&self, item: T) -> bool {
        let count = |items: &[T]| items.iter().filter(|i| **i == item).count();
        count(&self.live) + count(&self.pending_additions) > count(&self.pending_removals)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_additions.is_empty() || !self.pending_removals.is_empty()
    }

    /// Empties the live array and both staging buffers immediately.
    pub fn clear(&mut self) {
        self.live.clear();
        self.pending_additions.clear();
        self.pending_removals.clear();
    }
}
