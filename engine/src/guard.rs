//! Authority checks.
//!
//! The guard is the only place that mints an [`Authorized`] token, and every
//! handler demands one, so no transition can run without a signer check.
//! Signatures themselves are the host's business: the guard compares
//! identities the host already authenticated.

use tally_primitives::{AccountId, Pubkey, SignerSet, TallyError, TallyResult};

/// Proof that `authority` is in the signer set of the current instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authorized {
    authority: Pubkey,
}

impl Authorized {
    /// The identity the check was made for.
    pub fn authority(&self) -> &Pubkey {
        &self.authority
    }
}

/// Signer-set checks for mutating and creating instructions.
pub struct AuthorityGuard;

impl AuthorityGuard {
    /// Authorize a mutation of an account owned by `required`.
    pub fn verify(required: &Pubkey, signers: &SignerSet) -> TallyResult<Authorized> {
        if !signers.contains(required) {
            return Err(TallyError::Unauthorized { required: *required });
        }
        Ok(Authorized { authority: *required })
    }

    /// Authorize creating `account` with `authority` as its owner.
    ///
    /// There is no stored authority yet, so the initializing signer becomes
    /// it. Both the new authority and the account key itself must have
    /// signed: the latter proves the caller controls the fresh address.
    pub fn establish(
        account: &AccountId,
        authority: &Pubkey,
        signers: &SignerSet,
    ) -> TallyResult<Authorized> {
        let authorized = Self::verify(authority, signers)?;
        if !signers.contains(account) {
            return Err(TallyError::Unauthorized { required: *account });
        }
        Ok(authorized)
    }
}
