//! Account records.
//!
//! Counter and Avatar accounts are the same shape: an authority plus one
//! signed 64-bit numeric field. They are modelled as a single [`Account`]
//! tagged with an [`AccountKind`] that names the field, so every transition
//! is written once.

use std::fmt;

use crate::types::Pubkey;

/// The kind of record an account holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AccountKind {
    /// `{ count, authority }`
    Counter = 1,
    /// `{ level, authority }`
    Avatar = 2,
}

impl AccountKind {
    /// Decode the on-disk / on-wire tag.
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Counter),
            2 => Some(Self::Avatar),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Name of the numeric field this kind carries.
    pub fn field(self) -> &'static str {
        match self {
            Self::Counter => "count",
            Self::Avatar => "level",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counter => write!(f, "counter"),
            Self::Avatar => write!(f, "avatar"),
        }
    }
}

/// An owned numeric record.
///
/// `authority` is fixed when the account is created; no instruction
/// changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Account {
    pub kind: AccountKind,
    pub authority: Pubkey,
    pub value: i64,
}

impl Account {
    /// A freshly initialized record: value zero, owned by `authority`.
    pub fn new(kind: AccountKind, authority: Pubkey) -> Self {
        Self {
            kind,
            authority,
            value: 0,
        }
    }

    /// The same record with a different value. Authority and kind carry over.
    pub fn with_value(&self, value: i64) -> Self {
        Self { value, ..*self }
    }
}
