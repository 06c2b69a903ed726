//! Append-only queue of failed submissions

use crate::domain::PendingSubmission;

use super::traits::{KeyValueStore, StoreResult};

pub const PENDING_SUBMISSIONS_KEY: &str = "pendingSubmissions";

/// Read-modify-write helpers over the persisted queue.
///
/// Entries are never deduplicated or capped; they leave the queue only
/// through [`PendingQueue::replace`] (replay), [`PendingQueue::remove_where`]
/// (a retry that got through) or [`PendingQueue::clear`].
pub struct PendingQueue;

impl PendingQueue {
    pub fn load<S: KeyValueStore>(store: &S) -> StoreResult<Vec<PendingSubmission>> {
        Ok(store
            .get_json::<Vec<PendingSubmission>>(PENDING_SUBMISSIONS_KEY)?
            .unwrap_or_default())
    }

    /// Appends one entry and returns the new queue length.
    ///
    /// A corrupt stored queue is not overwritten.
    pub fn append<S: KeyValueStore>(store: &S, entry: PendingSubmission) -> StoreResult<usize> {
        let mut pending = Self::load(store)?;
        pending.push(entry);
        store.set_json(PENDING_SUBMISSIONS_KEY, &pending)?;
        Ok(pending.len())
    }

    pub fn replace<S: KeyValueStore>(store: &S, pending: &[PendingSubmission]) -> StoreResult<()> {
        if pending.is_empty() {
            Self::clear(store)
        } else {
            store.set_json(PENDING_SUBMISSIONS_KEY, pending)
        }
    }

    /// Drops every entry matching `settled`; returns how many were removed
    pub fn remove_where<S, F>(store: &S, settled: F) -> StoreResult<usize>
    where
        S: KeyValueStore,
        F: Fn(&PendingSubmission) -> bool,
    {
        let mut pending = Self::load(store)?;
        let before = pending.len();
        pending.retain(|entry| !settled(entry));
        let removed = before - pending.len();
        if removed > 0 {
            Self::replace(store, &pending)?;
        }
        Ok(removed)
    }

    pub fn clear<S: KeyValueStore>(store: &S) -> StoreResult<()> {
        store.remove(PENDING_SUBMISSIONS_KEY)
    }

    pub fn len<S: KeyValueStore>(store: &S) -> usize {
        Self::load(store).map_or(0, |p| p.len())
    }
}
