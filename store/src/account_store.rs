//! The storage contract the engine commits through.
//!
//! `load` only ever returns the last committed record. `save` is the single
//! commit point: it replaces the whole record or fails leaving the previous
//! one in place. Nothing else in the workspace writes to storage.

use tally_primitives::{Account, AccountId};

use crate::error::StoreError;

/// Key-addressed account storage.
///
/// Methods take `&self` so one store can serve many threads; backends
/// provide their own interior locking. Callers that need
/// single-writer-per-account semantics layer that on top.
pub trait AccountStore: Send + Sync {
    /// Read the committed record for `id`.
    ///
    /// Returns `Ok(None)` if the account does not exist.
    fn load(&self, id: &AccountId) -> Result<Option<Account>, StoreError>;

    /// Durably replace the record for `id`.
    fn save(&self, id: &AccountId, account: &Account) -> Result<(), StoreError>;

    /// Check if an account exists.
    ///
    /// Default implementation uses `load()`, but backends may optimize this.
    fn contains(&self, id: &AccountId) -> Result<bool, StoreError> {
        Ok(self.load(id)?.is_some())
    }
}

impl<S: AccountStore + ?Sized> AccountStore for std::sync::Arc<S> {
    fn load(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        (**self).load(id)
    }

    fn save(&self, id: &AccountId, account: &Account) -> Result<(), StoreError> {
        (**self).save(id, account)
    }

    fn contains(&self, id: &AccountId) -> Result<bool, StoreError> {
        (**self).contains(id)
    }
}

/// Decode stored bytes for `id`, tagging failures with the account.
pub(crate) fn decode_record(id: &AccountId, bytes: &[u8]) -> Result<Account, StoreError> {
    tally_primitives::codec::decode_account(bytes).map_err(|e| StoreError::Corrupt {
        account: *id,
        reason: e.to_string(),
    })
}
