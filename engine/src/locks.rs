//! Single writer per account.
//!
//! A load → compute → save cycle must not interleave with another cycle on
//! the same account, or one of two concurrent increments is lost. Each
//! account gets its own mutex, created on first use and dropped once the
//! last cycle using it ends, so the map only holds accounts in flight.
//! Different accounts never contend beyond the short map lookup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tally_primitives::AccountId;

type Slot = Arc<Mutex<()>>;

/// Lazily populated per-account mutexes.
#[derive(Debug, Default)]
pub struct AccountLocks {
    slots: Mutex<HashMap<AccountId, Slot>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    // the map holds no invariants a panicking holder could break
    fn map(&self) -> MutexGuard<'_, HashMap<AccountId, Slot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The mutex for `id`, created if absent.
    fn slot(&self, id: &AccountId) -> Slot {
        Arc::clone(self.map().entry(*id).or_default())
    }

    /// Remove the slot for `id` if only the map still refers to it.
    ///
    /// Slots are only cloned under the map lock, so a count of one here
    /// means no cycle holds or waits on it.
    fn release(&self, id: &AccountId) {
        let mut slots = self.map();
        if slots.get(id).is_some_and(|slot| Arc::strong_count(slot) == 1) {
            slots.remove(id);
        }
    }

    /// Number of accounts with a cycle in flight.
    pub fn len(&self) -> usize {
        self.map().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Releases a slot when dropped, including during unwinding.
struct Release<'a> {
    locks: &'a AccountLocks,
    id: &'a AccountId,
}

impl Drop for Release<'_> {
    fn drop(&mut self) {
        self.locks.release(self.id);
    }
}

/// Run `f` while holding the lock for `id`.
pub fn with_account_lock<T>(locks: &AccountLocks, id: &AccountId, f: impl FnOnce() -> T) -> T {
    // drops last: after the guard and our handle on the slot are gone
    let _release = Release { locks, id };
    let slot = locks.slot(id);
    // a panic mid-cycle wrote nothing, so the account is still consistent
    let _held = slot.lock().unwrap_or_else(PoisonError::into_inner);
    f()
}
