//! State transition handlers.
//!
//! One pure function per instruction kind. Handlers receive an in-memory
//! copy of the record and return its replacement; they never read or write
//! storage and never log. Existence and kind are settled by the dispatcher
//! before a handler is called.

use tally_primitives::{Account, AccountKind, TallyError, TallyResult};

use crate::guard::Authorized;
use crate::strategy::LevelStrategy;

/// A fresh record of `kind`: value zero, owned by the authorized signer.
pub fn initialize(kind: AccountKind, auth: Authorized) -> Account {
    Account::new(kind, *auth.authority())
}

/// `count + 1`
pub fn increment(account: &Account, auth: &Authorized) -> TallyResult<Account> {
    step(account, auth, |v| v.checked_add(1))
}

/// `count - 1`. Negative counts are allowed.
pub fn decrement(account: &Account, auth: &Authorized) -> TallyResult<Account> {
    step(account, auth, |v| v.checked_sub(1))
}

/// `level` moved by `strategy`.
pub fn level_up(
    account: &Account,
    auth: &Authorized,
    strategy: &dyn LevelStrategy,
) -> TallyResult<Account> {
    step(account, auth, |v| strategy.next_level(v))
}

/// Shared checked update for every owned numeric record.
fn step(
    account: &Account,
    auth: &Authorized,
    next: impl FnOnce(i64) -> Option<i64>,
) -> TallyResult<Account> {
    // token must have been minted for this record's owner
    if auth.authority() != &account.authority {
        return Err(TallyError::Unauthorized {
            required: account.authority,
        });
    }
    let value = next(account.value).ok_or(TallyError::Overflow {
        field: account.kind.field(),
    })?;
    Ok(account.with_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::AuthorityGuard;
    use crate::strategy::FixedStep;
    use tally_primitives::{Pubkey, SignerSet};

    fn owner() -> Pubkey {
        Pubkey::new_from_array([1; 32])
    }

    fn auth_for(key: Pubkey) -> Authorized {
        AuthorityGuard::verify(&key, &SignerSet::single(key)).unwrap()
    }

    fn counter(value: i64) -> Account {
        Account::new(AccountKind::Counter, owner()).with_value(value)
    }

    #[test]
    fn test_initialize_zero_and_owner() {
        let account = initialize(AccountKind::Counter, auth_for(owner()));
        assert_eq!(account.value, 0);
        assert_eq!(account.authority, owner());
        assert_eq!(account.kind, AccountKind::Counter);
    }

    #[test]
    fn test_increment_and_decrement() {
        let auth = auth_for(owner());
        let one = increment(&counter(0), &auth).unwrap();
        assert_eq!(one.value, 1);
        let zero = decrement(&one, &auth).unwrap();
        assert_eq!(zero.value, 0);
        let negative = decrement(&zero, &auth).unwrap();
        assert_eq!(negative.value, -1);
    }

    #[test]
    fn test_increment_overflow() {
        let err = increment(&counter(i64::MAX), &auth_for(owner())).unwrap_err();
        assert_eq!(err, TallyError::Overflow { field: "count" });
    }

    #[test]
    fn test_decrement_underflow() {
        let err = decrement(&counter(i64::MIN), &auth_for(owner())).unwrap_err();
        assert_eq!(err, TallyError::Overflow { field: "count" });
    }

    #[test]
    fn test_level_up_uses_strategy() {
        let avatar = Account::new(AccountKind::Avatar, owner());
        let auth = auth_for(owner());

        assert_eq!(level_up(&avatar, &auth, &FixedStep::ONE).unwrap().value, 1);

        let by_five = FixedStep::new(5).unwrap();
        assert_eq!(level_up(&avatar, &auth, &by_five).unwrap().value, 5);

        let capped = |level: i64| (level < 3).then_some(level + 1);
        let at_cap = avatar.with_value(3);
        assert_eq!(
            level_up(&at_cap, &auth, &capped).unwrap_err(),
            TallyError::Overflow { field: "level" }
        );
    }

    #[test]
    fn test_token_for_other_owner_rejected() {
        let stranger = Pubkey::new_from_array([9; 32]);
        let err = increment(&counter(0), &auth_for(stranger)).unwrap_err();
        assert_eq!(err, TallyError::Unauthorized { required: owner() });
    }

    #[test]
    fn test_authority_never_changes() {
        let auth = auth_for(owner());
        let next = increment(&counter(41), &auth).unwrap();
        assert_eq!(next.authority, owner());
    }
}
