//! In-memory account store.
//!
//! `MemStore` keeps encoded records in a `BTreeMap` behind an `RwLock`.
//! Storing bytes rather than `Account` values means decoding behaves the
//! same as in the durable backend.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use tally_primitives::codec::encode_account;
use tally_primitives::{Account, AccountId};

use crate::account_store::{decode_record, AccountStore};
use crate::error::StoreError;

/// In-memory store backed by `BTreeMap`.
#[derive(Debug, Default)]
pub struct MemStore {
    data: RwLock<BTreeMap<AccountId, Vec<u8>>>,
}

impl MemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records.
    pub fn with_accounts(accounts: impl IntoIterator<Item = (AccountId, Account)>) -> Self {
        let data = accounts
            .into_iter()
            .map(|(id, account)| (id, encode_account(&account)))
            .collect();
        Self {
            data: RwLock::new(data),
        }
    }

    /// Place raw bytes under `id`, bypassing encoding.
    pub fn insert_raw(&self, id: AccountId, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.data
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .insert(id, bytes);
        Ok(())
    }

    /// Raw bytes stored under `id`.
    pub fn get_raw(&self, id: &AccountId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.read().map_err(|_| StoreError::Poisoned)?.get(id).cloned())
    }

    /// Returns the number of stored accounts.
    pub fn len(&self) -> usize {
        // counting cannot observe a half-applied insert
        self.data.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AccountStore for MemStore {
    fn load(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        let data = self.data.read().map_err(|_| StoreError::Poisoned)?;
        data.get(id).map(|bytes| decode_record(id, bytes)).transpose()
    }

    fn save(&self, id: &AccountId, account: &Account) -> Result<(), StoreError> {
        let bytes = encode_account(account);
        self.data
            .write()
            .map_err(|_| StoreError::Poisoned)?
            .insert(*id, bytes);
        Ok(())
    }

    fn contains(&self, id: &AccountId) -> Result<bool, StoreError> {
        Ok(self.data.read().map_err(|_| StoreError::Poisoned)?.contains_key(id))
    }
}
