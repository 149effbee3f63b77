//! Host-facing entry point.
//!
//! A [`Ledger`] owns a store and an executor, serializes submissions per
//! account, and numbers them for transaction references. It is `Send +
//! Sync` whenever the store is, so one ledger can be shared across threads.

use std::sync::atomic::{AtomicU64, Ordering};

use tally_primitives::codec::decode_instruction;
use tally_primitives::{
    AccountId, AccountSnapshot, CommitResult, Instruction, SignedInstruction, SignerSet,
    TallyError, TallyResult,
};
use tally_store::{AccountStore, SledStore, StoreError};
use tracing::{info, warn};

use crate::config::{ConfigError, EngineConfig, LedgerConfig};
use crate::executor::TransactionExecutor;
use crate::locks::{with_account_lock, AccountLocks};

/// An account store plus the executor that commits to it.
///
/// Submissions to the same account are serialized; each gets the next
/// sequence number whether or not it commits.
pub struct Ledger<S> {
    store: S,
    executor: TransactionExecutor,
    locks: AccountLocks,
    sequence: AtomicU64,
}

impl<S: AccountStore> Ledger<S> {
    pub fn new(store: S, config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_executor(store, TransactionExecutor::new(config)?))
    }

    pub fn with_executor(store: S, executor: TransactionExecutor) -> Self {
        Self {
            store,
            executor,
            locks: AccountLocks::new(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Apply an instruction whose signers the host has already authenticated.
    pub fn submit(&self, instruction: &Instruction, signers: &SignerSet) -> CommitResult {
        with_account_lock(&self.locks, instruction.target(), || {
            let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
            self.executor
                .apply(&self.store, instruction, signers, sequence)
        })
    }

    /// Decode and apply a wire-format instruction.
    pub fn submit_raw(&self, data: &[u8], signers: &SignerSet) -> CommitResult {
        let instruction = decode_instruction(data).inspect_err(|error| {
            warn!(len = data.len(), %error, "undecodable instruction");
        })?;
        self.submit(&instruction, signers)
    }

    /// Authenticate the envelope's signatures, then decode and apply.
    ///
    /// Signatures that fail to verify are ignored; if that leaves a required
    /// signer out, the instruction fails with `Unauthorized`.
    pub fn submit_signed(&self, signed: &SignedInstruction) -> CommitResult {
        let signers = signed.signer_set();
        if signers.len() < signed.signatures.len() {
            warn!(
                presented = signed.signatures.len(),
                valid = signers.len(),
                "dropped invalid signatures"
            );
        }
        self.submit_raw(&signed.data, &signers)
    }

    /// Committed state of `id`.
    pub fn fetch(&self, id: &AccountId) -> TallyResult<AccountSnapshot> {
        self.try_fetch(id)?.ok_or(TallyError::NotFound(*id))
    }

    /// Committed state of `id`, or `None` if it was never initialized.
    pub fn try_fetch(&self, id: &AccountId) -> TallyResult<Option<AccountSnapshot>> {
        let account = self.store.load(id).map_err(StoreError::into_read_error)?;
        Ok(account.map(|a| AccountSnapshot::new(*id, &a)))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn executor(&self) -> &TransactionExecutor {
        &self.executor
    }

    /// Number of submissions so far, committed or not.
    pub fn submitted(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}

impl Ledger<SledStore> {
    /// Open a durable ledger as described by `config`.
    pub fn open(config: &LedgerConfig) -> Result<Self, ConfigError> {
        // engine settings first so a bad config never opens the database
        config.engine.validate()?;
        let store = match (&config.store.path, config.store.temporary) {
            (_, true) => SledStore::temporary()?,
            (Some(path), false) => SledStore::open(path)?,
            (None, false) => return Err(ConfigError::MissingStorePath),
        };
        info!(
            path = ?config.store.path,
            temporary = config.store.temporary,
            accounts = store.len(),
            "ledger opened"
        );
        Self::new(store, &config.engine)
    }
}
