//! Instructions and their signed envelopes.
//!
//! An [`Instruction`] names what to do and to which account. Who asked is
//! carried separately as a [`SignerSet`] supplied by the host. The
//! [`SignedInstruction`] form models what a host receives from a client:
//! the encoded instruction plus Ed25519 signatures over it.

use crate::account::AccountKind;
use crate::crypto;
use crate::types::{AccountId, Pubkey, SignerSet};

/// Discriminant tags (first byte of the wire format).
pub const IX_INITIALIZE: u8 = 0;
pub const IX_INCREMENT: u8 = 1;
pub const IX_DECREMENT: u8 = 2;
pub const IX_LEVEL_UP: u8 = 3;

/// A decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Create `account` as a zero-valued record of `kind` owned by `authority`.
    Initialize {
        account: AccountId,
        kind: AccountKind,
        authority: Pubkey,
    },
    /// `count += 1`
    Increment { account: AccountId },
    /// `count -= 1`
    Decrement { account: AccountId },
    /// Advance `level` by the configured strategy.
    LevelUp { account: AccountId },
}

impl Instruction {
    /// The account this instruction reads and writes.
    pub fn target(&self) -> &AccountId {
        match self {
            Self::Initialize { account, .. }
            | Self::Increment { account }
            | Self::Decrement { account }
            | Self::LevelUp { account } => account,
        }
    }

    pub fn discriminant(&self) -> u8 {
        match self {
            Self::Initialize { .. } => IX_INITIALIZE,
            Self::Increment { .. } => IX_INCREMENT,
            Self::Decrement { .. } => IX_DECREMENT,
            Self::LevelUp { .. } => IX_LEVEL_UP,
        }
    }

    /// Method name as clients spell it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize { .. } => "initialize",
            Self::Increment { .. } => "increment",
            Self::Decrement { .. } => "decrement",
            Self::LevelUp { .. } => "levelUp",
        }
    }

    /// The account kind a mutating instruction requires, or `None` for
    /// Initialize (which accepts either kind).
    pub fn required_kind(&self) -> Option<AccountKind> {
        match self {
            Self::Initialize { .. } => None,
            Self::Increment { .. } | Self::Decrement { .. } => Some(AccountKind::Counter),
            Self::LevelUp { .. } => Some(AccountKind::Avatar),
        }
    }

    /// Encode to the wire format (see [`crate::codec::encode_instruction`]).
    pub fn encode(&self) -> Vec<u8> {
        crate::codec::encode_instruction(self)
    }
}

/// Encoded instruction plus the signatures a client attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedInstruction {
    /// Encoded [`Instruction`].
    pub data: Vec<u8>,
    /// `(signer, signature over data)` pairs.
    pub signatures: Vec<(Pubkey, [u8; 64])>,
}

impl SignedInstruction {
    /// Identities whose signature over `data` verifies.
    ///
    /// Invalid signatures are dropped rather than reported: a bad
    /// signature simply means that identity did not sign.
    pub fn signer_set(&self) -> SignerSet {
        self.signatures
            .iter()
            .filter(|(key, sig)| crypto::verify_ed25519(&self.data, sig, key.as_bytes()))
            .map(|(key, _)| *key)
            .collect()
    }

    /// Encode `instruction` and sign it with every key in `signers`.
    #[cfg(feature = "keygen")]
    pub fn sign(instruction: &Instruction, signers: &[&ed25519_dalek::SigningKey]) -> Self {
        let data = instruction.encode();
        let signatures = signers
            .iter()
            .map(|sk| {
                let key = Pubkey::new_from_array(sk.verifying_key().to_bytes());
                (key, crypto::sign_ed25519(&data, sk))
            })
            .collect();
        Self { data, signatures }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::generate_keypair;

    fn id(b: u8) -> AccountId {
        Pubkey::new_from_array([b; 32])
    }

    #[test]
    fn test_target_and_names() {
        let init = Instruction::Initialize {
            account: id(1),
            kind: AccountKind::Counter,
            authority: id(2),
        };
        assert_eq!(init.target(), &id(1));
        assert_eq!(init.name(), "initialize");
        assert_eq!(Instruction::LevelUp { account: id(3) }.name(), "levelUp");
        assert_eq!(Instruction::Decrement { account: id(3) }.discriminant(), IX_DECREMENT);
    }

    #[test]
    fn test_required_kinds() {
        assert_eq!(Instruction::Increment { account: id(1) }.required_kind(), Some(AccountKind::Counter));
        assert_eq!(Instruction::Decrement { account: id(1) }.required_kind(), Some(AccountKind::Counter));
        assert_eq!(Instruction::LevelUp { account: id(1) }.required_kind(), Some(AccountKind::Avatar));
    }

    #[test]
    fn test_signer_set_keeps_valid_signatures() {
        let (_, alice) = generate_keypair();
        let (_, bob) = generate_keypair();
        let ix = Instruction::Increment { account: id(5) };

        let signed = SignedInstruction::sign(&ix, &[&alice, &bob]);
        let signers = signed.signer_set();

        assert_eq!(signers.len(), 2);
        assert!(signers.contains(&Pubkey::new_from_array(alice.verifying_key().to_bytes())));
        assert!(signers.contains(&Pubkey::new_from_array(bob.verifying_key().to_bytes())));
    }

    #[test]
    fn test_signer_set_drops_forged_signature() {
        let (_, alice) = generate_keypair();
        let (bob_vk, _) = generate_keypair();
        let ix = Instruction::Increment { account: id(5) };

        let mut signed = SignedInstruction::sign(&ix, &[&alice]);
        // Claim bob signed by reusing alice's signature bytes
        let forged = signed.signatures[0].1;
        signed
            .signatures
            .push((Pubkey::new_from_array(bob_vk.to_bytes()), forged));

        let signers = signed.signer_set();
        assert_eq!(signers.len(), 1);
        assert!(!signers.contains(&Pubkey::new_from_array(bob_vk.to_bytes())));
    }

    #[test]
    fn test_signature_bound_to_data() {
        let (_, alice) = generate_keypair();
        let mut signed = SignedInstruction::sign(&Instruction::Increment { account: id(5) }, &[&alice]);
        signed.data = Instruction::Decrement { account: id(5) }.encode();
        assert!(signed.signer_set().is_empty());
    }
}
