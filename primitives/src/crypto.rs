//! Hashing and signature helpers.
//!
//! - BLAKE3 for transaction references
//! - Ed25519 for the signed-envelope form hosts receive from clients
//!
//! The engine itself never verifies signatures; it only compares the
//! identities a host has already authenticated.

use crate::types::{Hash, Pubkey, SignerSet};

/// Opaque reference for a committed instruction.
///
/// `blake3(api_version || sequence || instruction || signers...)` with all
/// integers little-endian and signers in ascending order. Identical inputs
/// always give the same reference.
pub fn transaction_reference(
    api_version: u32,
    sequence: u64,
    instruction: &[u8],
    signers: &SignerSet,
) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&api_version.to_le_bytes());
    hasher.update(&sequence.to_le_bytes());
    hasher.update(instruction);
    for signer in signers.iter() {
        hasher.update(signer.as_bytes());
    }
    *hasher.finalize().as_bytes()
}

/// Verify an Ed25519 signature.
///
/// Returns `true` if the signature is valid for the given message and
/// public key, `false` otherwise (including malformed keys).
pub fn verify_ed25519(message: &[u8], signature: &[u8; 64], public_key: &[u8; 32]) -> bool {
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};

    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let sig = Signature::from_bytes(signature);
    verifying_key.verify(message, &sig).is_ok()
}

/// Sign a message with an Ed25519 private key.
pub fn sign_ed25519(message: &[u8], secret_key: &ed25519_dalek::SigningKey) -> [u8; 64] {
    use ed25519_dalek::Signer;
    secret_key.sign(message).to_bytes()
}

/// Identity of an Ed25519 signing key.
pub fn pubkey_of(secret_key: &ed25519_dalek::SigningKey) -> Pubkey {
    Pubkey::new_from_array(secret_key.verifying_key().to_bytes())
}

/// Generate an Ed25519 keypair from OS randomness.
#[cfg(feature = "keygen")]
pub fn generate_keypair() -> (ed25519_dalek::VerifyingKey, ed25519_dalek::SigningKey) {
    let signing_key = ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng);
    (signing_key.verifying_key(), signing_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_reference_inputs_matter() {
        let signers = SignerSet::single(Pubkey::new_from_array([1; 32]));
        let base = transaction_reference(1, 0, b"ix", &signers);

        assert_eq!(base, transaction_reference(1, 0, b"ix", &signers));
        assert_ne!(base, transaction_reference(2, 0, b"ix", &signers));
        assert_ne!(base, transaction_reference(1, 1, b"ix", &signers));
        assert_ne!(base, transaction_reference(1, 0, b"iy", &signers));
        assert_ne!(base, transaction_reference(1, 0, b"ix", &SignerSet::new()));
    }

    #[test]
    fn test_transaction_reference_ignores_insertion_order() {
        let a = Pubkey::new_from_array([1; 32]);
        let b = Pubkey::new_from_array([2; 32]);
        let ab: SignerSet = [a, b].into_iter().collect();
        let ba: SignerSet = [b, a].into_iter().collect();
        assert_eq!(
            transaction_reference(1, 7, b"ix", &ab),
            transaction_reference(1, 7, b"ix", &ba)
        );
    }

    #[test]
    fn test_ed25519_sign_verify_roundtrip() {
        let (vk, sk) = generate_keypair();
        let sig = sign_ed25519(b"increment", &sk);
        assert!(verify_ed25519(b"increment", &sig, vk.as_bytes()));
        assert!(!verify_ed25519(b"decrement", &sig, vk.as_bytes()));
        assert_eq!(pubkey_of(&sk).as_bytes(), vk.as_bytes());
    }

    #[test]
    fn test_ed25519_reject_invalid_public_key() {
        // 0xFF bytes do not decompress to a curve point
        assert!(!verify_ed25519(b"test", &[0u8; 64], &[0xFF; 32]));
    }
}
