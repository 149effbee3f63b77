//! Transaction executor.
//!
//! Applies one instruction against an [`AccountStore`] in three steps:
//!
//! 1. Load the target's committed record.
//! 2. Validate and compute the new record (no writes).
//! 3. Save it. This is the only write, so a failure anywhere earlier leaves
//!    the store untouched, and a failed save is reported as `WriteError`.
//!
//! The executor is stateless apart from its configuration: callers supply
//! the store, the signer set and a sequence number for the reference hash.

use tally_primitives::crypto::transaction_reference;
use tally_primitives::{AccountSnapshot, CommitResult, Committed, Instruction, SignerSet};
use tally_store::{AccountStore, StoreError};
use tracing::{debug, warn};

use crate::config::{ConfigError, EngineConfig};
use crate::dispatcher::Dispatcher;
use crate::strategy::{FixedStep, LevelStrategy};

/// Applies instructions with all-or-nothing semantics.
pub struct TransactionExecutor {
    api_version: u32,
    strategy: Box<dyn LevelStrategy>,
}

impl TransactionExecutor {
    /// Build from config, levelling by `config.level_step`.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let step = FixedStep::new(config.level_step)
            .ok_or(ConfigError::InvalidLevelStep(config.level_step))?;
        Ok(Self::with_strategy(config, step))
    }

    /// Build with a custom level strategy. `config.level_step` is ignored.
    pub fn with_strategy(config: &EngineConfig, strategy: impl LevelStrategy + 'static) -> Self {
        Self {
            api_version: config.api_version,
            strategy: Box::new(strategy),
        }
    }

    pub fn api_version(&self) -> u32 {
        self.api_version
    }

    /// Apply `instruction` on behalf of `signers`.
    ///
    /// On `Ok` the new record has been saved. On `Err` nothing was written.
    pub fn apply(
        &self,
        store: &dyn AccountStore,
        instruction: &Instruction,
        signers: &SignerSet,
        sequence: u64,
    ) -> CommitResult {
        let result = self.apply_inner(store, instruction, signers, sequence);
        match &result {
            Ok(committed) => debug!(
                account = %committed.snapshot.id,
                instruction = instruction.name(),
                value = committed.snapshot.value,
                sequence,
                "instruction committed"
            ),
            Err(error) => warn!(
                account = %instruction.target(),
                instruction = instruction.name(),
                code = error.code().as_u32(),
                %error,
                "instruction rejected"
            ),
        }
        result
    }

    fn apply_inner(
        &self,
        store: &dyn AccountStore,
        instruction: &Instruction,
        signers: &SignerSet,
        sequence: u64,
    ) -> CommitResult {
        let id = *instruction.target();

        // ── 1. Load ──
        let current = store.load(&id).map_err(StoreError::into_read_error)?;

        // ── 2. Validate + compute ──
        let next = Dispatcher::new(self.strategy.as_ref()).dispatch(instruction, current, signers)?;

        // ── 3. Commit ──
        store
            .save(&id, &next)
            .map_err(StoreError::into_write_error)?;

        let tx_ref = transaction_reference(self.api_version, sequence, &instruction.encode(), signers);
        Ok(Committed {
            snapshot: AccountSnapshot::new(id, &next),
            tx_ref,
        })
    }
}

impl Default for TransactionExecutor {
    fn default() -> Self {
        Self::with_strategy(&EngineConfig::default(), FixedStep::ONE)
    }
}
