//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};

use ed25519_dalek::SigningKey;
use tally_engine::{EngineConfig, Ledger};
use tally_primitives::crypto::pubkey_of;
use tally_primitives::{Account, AccountId, AccountKind, Instruction, Pubkey, SignerSet};
use tally_store::{AccountStore, MemStore, SledStore, StoreError};

/// Install a fmt subscriber that writes through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ── Keys ──

pub fn keypair(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

pub fn alice() -> SigningKey {
    keypair(0xA1)
}

pub fn bob() -> SigningKey {
    keypair(0xB0)
}

pub fn pk(key: &SigningKey) -> Pubkey {
    pubkey_of(key)
}

pub fn signers(keys: &[&SigningKey]) -> SignerSet {
    keys.iter().map(|k| pubkey_of(k)).collect()
}

// ── Ledgers ──

pub fn mem_ledger() -> Ledger<MemStore> {
    init_tracing();
    Ledger::new(MemStore::new(), &EngineConfig::default()).unwrap()
}

pub fn ledger_with(store: MemStore) -> Ledger<MemStore> {
    init_tracing();
    Ledger::new(store, &EngineConfig::default()).unwrap()
}

pub fn faulty_ledger() -> Ledger<FaultyStore> {
    init_tracing();
    Ledger::new(FaultyStore::default(), &EngineConfig::default()).unwrap()
}

pub fn faulty_sled_ledger() -> Ledger<FaultyStore<SledStore>> {
    init_tracing();
    let store = FaultyStore::wrap(SledStore::temporary().unwrap());
    Ledger::new(store, &EngineConfig::default()).unwrap()
}

/// Initialize `account` owned by `owner`, signed by both.
pub fn initialize<S: AccountStore>(
    ledger: &Ledger<S>,
    account: &SigningKey,
    owner: &SigningKey,
    kind: AccountKind,
) -> AccountId {
    let id = pk(account);
    let ix = Instruction::Initialize {
        account: id,
        kind,
        authority: pk(owner),
    };
    ledger.submit(&ix, &signers(&[account, owner])).unwrap();
    id
}

/// A MemStore seeded with one record.
pub fn seeded(id: AccountId, kind: AccountKind, owner: &SigningKey, value: i64) -> MemStore {
    MemStore::with_accounts([(id, Account::new(kind, pk(owner)).with_value(value))])
}

// ── Fault injection ──

/// A store whose reads or writes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct FaultyStore<S = MemStore> {
    inner: S,
    fail_saves: AtomicBool,
    fail_loads: AtomicBool,
}

impl<S> FaultyStore<S> {
    pub fn wrap(inner: S) -> Self {
        Self {
            inner,
            fail_saves: AtomicBool::new(false),
            fail_loads: AtomicBool::new(false),
        }
    }

    pub fn fail_saves(&self, on: bool) {
        self.fail_saves.store(on, Ordering::SeqCst);
    }

    pub fn fail_loads(&self, on: bool) {
        self.fail_loads.store(on, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: AccountStore> AccountStore for FaultyStore<S> {
    fn load(&self, id: &AccountId) -> Result<Option<Account>, StoreError> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected read failure".into()));
        }
        self.inner.load(id)
    }

    fn save(&self, id: &AccountId, account: &Account) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected write failure".into()));
        }
        self.inner.save(id, account)
    }
}
