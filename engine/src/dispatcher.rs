//! Instruction routing.
//!
//! Dispatch runs in two phases. [`Dispatcher::validate`] checks that the
//! target is present or absent as the instruction requires, that the record
//! kind matches, and that the guard authorizes the signers. Only a
//! [`Validated`] value can be passed to [`Dispatcher::execute`], which runs
//! the handler and returns the proposed record. Unknown discriminants never
//! reach this module: they fail while decoding.
//!
//! The dispatcher never touches storage. Its caller loads the current record
//! and decides whether to save the result.

use tally_primitives::{Account, AccountKind, Instruction, SignerSet, TallyError, TallyResult};

use crate::guard::{AuthorityGuard, Authorized};
use crate::handlers;
use crate::strategy::LevelStrategy;

/// Change to an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Increment,
    Decrement,
    LevelUp,
}

/// An instruction that passed validation and may be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validated {
    Create {
        kind: AccountKind,
        auth: Authorized,
    },
    Mutate {
        mutation: Mutation,
        current: Account,
        auth: Authorized,
    },
}

/// Routes an instruction to its handler.
pub struct Dispatcher<'a> {
    strategy: &'a dyn LevelStrategy,
}

impl<'a> Dispatcher<'a> {
    pub fn new(strategy: &'a dyn LevelStrategy) -> Self {
        Self { strategy }
    }

    /// Validating phase. `current` is the committed record of the target,
    /// if any.
    pub fn validate(
        &self,
        instruction: &Instruction,
        current: Option<Account>,
        signers: &SignerSet,
    ) -> TallyResult<Validated> {
        let existing = match (instruction, current) {
            (
                Instruction::Initialize {
                    account,
                    kind,
                    authority,
                },
                None,
            ) => {
                let auth = AuthorityGuard::establish(account, authority, signers)?;
                return Ok(Validated::Create { kind: *kind, auth });
            }
            (Instruction::Initialize { account, .. }, Some(_)) => {
                return Err(TallyError::AlreadyInitialized(*account));
            }
            (_, None) => return Err(TallyError::NotFound(*instruction.target())),
            (_, Some(existing)) => existing,
        };

        let mutation = match instruction {
            Instruction::Increment { .. } => Mutation::Increment,
            Instruction::Decrement { .. } => Mutation::Decrement,
            Instruction::LevelUp { .. } => Mutation::LevelUp,
            Instruction::Initialize { account, .. } => {
                return Err(TallyError::AlreadyInitialized(*account))
            }
        };

        if let Some(required) = instruction.required_kind() {
            if existing.kind != required {
                return Err(TallyError::KindMismatch {
                    instruction: instruction.name(),
                    found: existing.kind,
                });
            }
        }

        let auth = AuthorityGuard::verify(&existing.authority, signers)?;
        Ok(Validated::Mutate {
            mutation,
            current: existing,
            auth,
        })
    }

    /// Executing phase. Returns the record to commit.
    pub fn execute(&self, validated: Validated) -> TallyResult<Account> {
        match validated {
            Validated::Create { kind, auth } => Ok(handlers::initialize(kind, auth)),
            Validated::Mutate {
                mutation,
                current,
                auth,
            } => match mutation {
                Mutation::Increment => handlers::increment(&current, &auth),
                Mutation::Decrement => handlers::decrement(&current, &auth),
                Mutation::LevelUp => handlers::level_up(&current, &auth, self.strategy),
            },
        }
    }

    /// Both phases back to back.
    pub fn dispatch(
        &self,
        instruction: &Instruction,
        current: Option<Account>,
        signers: &SignerSet,
    ) -> TallyResult<Account> {
        let validated = self.validate(instruction, current, signers)?;
        self.execute(validated)
    }
}
