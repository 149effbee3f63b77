//! Identity types and constants shared across the Tally workspace.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::TallyError;

/// 32-byte hash used for transaction references.
pub type Hash = [u8; 32];

/// Current engine API version. Mixed into every transaction reference.
pub const API_VERSION: u32 = 1;

/// Opaque 32-byte identity.
///
/// Authority checks compare identities by value only. Whether an identity
/// actually signed a request is decided by the host before the engine runs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pubkey([u8; 32]);

/// Accounts are addressed by an identity of the same shape as a signer.
pub type AccountId = Pubkey;

impl Pubkey {
    /// The all-zero identity.
    pub const ZERO: Pubkey = Pubkey([0u8; 32]);

    /// Wrap raw bytes.
    pub const fn new_from_array(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy out the raw bytes.
    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }
}

impl From<[u8; 32]> for Pubkey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self)
    }
}

impl FromStr for Pubkey {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| TallyError::InvalidInstruction(format!("bad identity {s:?}: {e}")))?;
        Ok(Self(bytes))
    }
}

/// The identities the host asserts have authenticated the current request.
///
/// Backed by a `BTreeSet` so iteration (and anything hashed from it) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignerSet {
    signers: BTreeSet<Pubkey>,
}

impl SignerSet {
    /// An empty signer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A signer set holding exactly one identity.
    pub fn single(signer: Pubkey) -> Self {
        let mut set = Self::new();
        set.insert(signer);
        set
    }

    /// Add an identity. Returns false if it was already present.
    pub fn insert(&mut self, signer: Pubkey) -> bool {
        self.signers.insert(signer)
    }

    pub fn contains(&self, key: &Pubkey) -> bool {
        self.signers.contains(key)
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    /// Iterate in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = &Pubkey> {
        self.signers.iter()
    }
}

impl FromIterator<Pubkey> for SignerSet {
    fn from_iter<I: IntoIterator<Item = Pubkey>>(iter: I) -> Self {
        Self {
            signers: iter.into_iter().collect(),
        }
    }
}
