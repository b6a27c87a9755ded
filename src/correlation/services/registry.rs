//! Correlation key to barrier table.

use crate::correlation::domain::CorrelationBarrier;
use crate::message::domain::CorrelationId;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const DEFAULT_COMPLETED_CAPACITY: usize = 1024;

#[derive(Default)]
struct Table {
    barriers: HashMap<CorrelationId, Arc<dyn CorrelationBarrier>>,
    completed: HashSet<CorrelationId>,
    completed_order: VecDeque<CorrelationId>,
}

impl Table {
    fn remember_completed(&mut self, key: &CorrelationId, capacity: usize) {
        if capacity == 0 || !self.completed.insert(key.clone()) {
            return;
        }
        self.completed_order.push_back(key.clone());
        while self.completed_order.len() > capacity {
            if let Some(evicted) = self.completed_order.pop_front() {
                self.completed.remove(&evicted);
            }
        }
    }
}

/// Maps correlation keys to live barriers.
///
/// Completed groups are retired from the table. Their keys can be
/// remembered in a bounded first-in first-out set so stragglers are
/// recognised after the barrier itself is gone; once a key falls out of
/// that set a new arrival opens a fresh group.
///
/// The table lock is held only for lookup, insert, and removal; barrier
/// mutations happen outside it under each barrier's own lock.
pub struct BarrierRegistry {
    table: Mutex<Table>,
    completed_capacity: usize,
}

impl Default for BarrierRegistry {
    fn default() -> Self {
        Self::with_completed_capacity(DEFAULT_COMPLETED_CAPACITY)
    }
}

impl BarrierRegistry {
    /// Creates an empty registry remembering up to 1024 completed keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry remembering up to `capacity` completed
    /// keys. Zero disables the memory.
    #[must_use]
    pub fn with_completed_capacity(capacity: usize) -> Self {
        Self {
            table: Mutex::new(Table::default()),
            completed_capacity: capacity,
        }
    }

    /// Returns the barrier for `key`, creating it with `create` when absent.
    ///
    /// Returns `None` when `key` belongs to a group that already completed
    /// and is still remembered. Lookup and insertion happen under one lock,
    /// so concurrent first arrivals for the same key share a single barrier.
    pub fn get_or_create(
        &self,
        key: &CorrelationId,
        create: impl FnOnce() -> Arc<dyn CorrelationBarrier>,
    ) -> Option<Arc<dyn CorrelationBarrier>> {
        let mut table = self.lock();
        if table.completed.contains(key) {
            return None;
        }
        Some(Arc::clone(
            table.barriers.entry(key.clone()).or_insert_with(create),
        ))
    }

    /// Returns the barrier for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &CorrelationId) -> Option<Arc<dyn CorrelationBarrier>> {
        self.lock().barriers.get(key).cloned()
    }

    /// Removes `barrier` from the table.
    ///
    /// The entry is only removed while it still refers to that exact
    /// barrier; a replacement created concurrently is left in place.
    pub fn remove(&self, key: &CorrelationId, barrier: &Arc<dyn CorrelationBarrier>) -> bool {
        Self::remove_entry(&mut self.lock(), key, barrier)
    }

    /// Removes a completed `barrier` and remembers its key, in one step, so
    /// no arrival can slip in between and reopen the group.
    pub fn retire(&self, key: &CorrelationId, barrier: &Arc<dyn CorrelationBarrier>) -> bool {
        let mut table = self.lock();
        let removed = Self::remove_entry(&mut table, key, barrier);
        if removed {
            table.remember_completed(key, self.completed_capacity);
        }
        removed
    }

    /// Returns `true` while `key` is remembered as completed.
    #[must_use]
    pub fn is_completed(&self, key: &CorrelationId) -> bool {
        self.lock().completed.contains(key)
    }

    /// Removes every barrier created before `cutoff` and returns them.
    pub fn remove_created_before(&self, cutoff: DateTime<Utc>) -> Vec<Arc<dyn CorrelationBarrier>> {
        let mut table = self.lock();
        let stale: Vec<CorrelationId> = table
            .barriers
            .iter()
            .filter(|(_, barrier)| barrier.created_at() < cutoff)
            .map(|(key, _)| key.clone())
            .collect();
        stale
            .iter()
            .filter_map(|key| table.barriers.remove(key))
            .collect()
    }

    /// Returns the number of open groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().barriers.len()
    }

    /// Returns `true` when no group is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().barriers.is_empty()
    }

    /// Returns how many completed keys are currently remembered.
    #[must_use]
    pub fn completed_len(&self) -> usize {
        self.lock().completed.len()
    }

    fn remove_entry(
        table: &mut Table,
        key: &CorrelationId,
        barrier: &Arc<dyn CorrelationBarrier>,
    ) -> bool {
        if table
            .barriers
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, barrier))
        {
            table.barriers.remove(key);
            true
        } else {
            false
        }
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
