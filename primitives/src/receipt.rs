//! What callers see after submitting an instruction or reading an account.

use crate::account::{Account, AccountKind};
use crate::error::TallyError;
use crate::types::{AccountId, Hash, Pubkey};

/// The committed fields of a named account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub id: AccountId,
    pub kind: AccountKind,
    pub authority: Pubkey,
    pub value: i64,
}

impl AccountSnapshot {
    pub fn new(id: AccountId, account: &Account) -> Self {
        Self {
            id,
            kind: account.kind,
            authority: account.authority,
            value: account.value,
        }
    }

    /// `count` of a Counter, `None` for other kinds.
    pub fn count(&self) -> Option<i64> {
        (self.kind == AccountKind::Counter).then_some(self.value)
    }

    /// `level` of an Avatar, `None` for other kinds.
    pub fn level(&self) -> Option<i64> {
        (self.kind == AccountKind::Avatar).then_some(self.value)
    }
}

/// Successful result of applying one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    /// State of the account after the commit.
    pub snapshot: AccountSnapshot,
    /// Opaque reference for host-side audit.
    pub tx_ref: Hash,
}

/// Either the committed snapshot or the reason nothing was written.
pub type CommitResult = Result<Committed, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_field_accessors() {
        let id = Pubkey::new_from_array([1; 32]);
        let owner = Pubkey::new_from_array([2; 32]);

        let counter = AccountSnapshot::new(id, &Account::new(AccountKind::Counter, owner).with_value(3));
        assert_eq!(counter.count(), Some(3));
        assert_eq!(counter.level(), None);
        assert_eq!(counter.authority, owner);

        let avatar = AccountSnapshot::new(id, &Account::new(AccountKind::Avatar, owner));
        assert_eq!(avatar.level(), Some(0));
        assert_eq!(avatar.count(), None);
    }
}
