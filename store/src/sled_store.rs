//! Durable account store over an embedded `sled` database.
//!
//! Each record lives under its 32-byte account id in a dedicated tree.
//! `save` is a single-key insert followed by a flush: sled applies
//! single-key inserts atomically, so after a crash a record is either its
//! previous bytes or its new bytes. If the flush fails the previous bytes
//! are put back, so `load` never returns a record `save` reported as failed.

use std::path::Path;

use tally_primitives::codec::encode_account;
use tally_primitives::{Account, AccountId};

use crate::account_store::{decode_record, AccountStore};
use crate::error::StoreError;

/// Name of the sled tree holding account records.
const ACCOUNTS_TREE: &str = "accounts";

/// Durable store backed by sled.
#[derive(Clone)]
pub struct SledStore {
    db: sled::Db,
    accounts: sled::Tree,
}

impl SledStore {
    /// Open (or create) a store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::from_db(sled::open(path)?)
    }

    /// A store in a temporary directory removed on drop.
    pub fn temporary() -> Result<Self, StoreError> {
        Self::from_db(sled::Config::new().temporary(true).open()?)
    }

    fn from_db(db: sled::Db) -> Result<Self, StoreError> {
        let accounts = db.open_tree(ACCOUNTS_TREE)?;
        Ok(Self { db, accounts })
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Flush everything to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    /// Insert the new record, make it durable with `flush`, and restore the
    /// previous bytes if that fails.
    fn save_with(
        &self,
        id: &AccountId,
        account: &Account,
        flush: impl FnOnce(&sled::Tree) -> sled::Result<usize>,
    ) -> Result<(), StoreError> {
        let key = id.as_bytes();
        let previous = self.accounts.insert(key, encode_account(account))?;
        if let Err(err) = flush(&self.accounts) {
            match previous {
                Some(bytes) => self.accounts.insert(key, bytes)?,
                None => self.accounts.remove(key)?,
            };
            return Err(err.into());
        }
        Ok(())
    }
}

impl AccountStore for SledStore {
    fn load(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        match self.accounts.get(id.as_bytes())? {
            Some(bytes) => decode_record(id, &bytes).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, id: &AccountId, account: &Account) -> Result<(), StoreError> {
        self.save_with(id, account, sled::Tree::flush)
    }

    fn contains(&self, id: &AccountId) -> Result<bool, StoreError> {
        Ok(self.accounts.contains_key(id.as_bytes())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_primitives::{AccountKind, Pubkey};

    fn id(b: u8) -> AccountId {
        Pubkey::new_from_array([b; 32])
    }

    #[test]
    fn test_temporary_store_roundtrip() {
        let store = SledStore::temporary().unwrap();
        assert!(store.is_empty());

        let avatar = Account::new(AccountKind::Avatar, id(7)).with_value(12);
        store.save(&id(1), &avatar).unwrap();

        assert_eq!(store.load(&id(1)).unwrap(), Some(avatar));
        assert!(store.contains(&id(1)).unwrap());
        assert_eq!(store.load(&id(2)).unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_corrupt_record_is_reported() {
        let store = SledStore::temporary().unwrap();
        store.accounts.insert(id(1).as_bytes(), &[0xde, 0xad][..]).unwrap();

        let err = store.load(&id(1)).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    fn failing_flush(_: &sled::Tree) -> sled::Result<usize> {
        Err(sled::Error::Unsupported("flush failed".into()))
    }

    #[test]
    fn test_failed_flush_restores_previous_record() {
        let store = SledStore::temporary().unwrap();
        let before = Account::new(AccountKind::Counter, id(7)).with_value(4);
        store.save(&id(1), &before).unwrap();

        let err = store
            .save_with(&id(1), &before.with_value(5), failing_flush)
            .unwrap_err();
        assert!(matches!(err, StoreError::Sled(_)));
        assert_eq!(store.load(&id(1)).unwrap(), Some(before));

        // retrying after the failure applies the change exactly once
        store.save(&id(1), &before.with_value(5)).unwrap();
        assert_eq!(store.load(&id(1)).unwrap().map(|a| a.value), Some(5));
    }

    #[test]
    fn test_failed_flush_of_new_record_leaves_nothing() {
        let store = SledStore::temporary().unwrap();
        let fresh = Account::new(AccountKind::Avatar, id(7));

        assert!(store.save_with(&id(2), &fresh, failing_flush).is_err());
        assert_eq!(store.load(&id(2)).unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = SledStore::temporary().unwrap();
        let other = store.clone();
        store
            .save(&id(3), &Account::new(AccountKind::Counter, id(9)))
            .unwrap();
        assert!(other.contains(&id(3)).unwrap());
        store.flush().unwrap();
    }
}
