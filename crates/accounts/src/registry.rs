use std::collections::HashMap;

use teller_core::{AccountId, Money, PositiveAmount, TellerError, TellerResult};

use crate::account::Account;

/// Directory of accounts keyed by identifier.
///
/// The registry exclusively owns its accounts; callers borrow them through
/// `authenticate` / `lookup` / `lookup_mut`. All mutation goes through `&mut
/// self`, so at most one operation is ever in flight.
#[derive(Debug, Default)]
pub struct AccountRegistry {
    accounts: HashMap<AccountId, Account>,
}

impl AccountRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account under `id`.
    ///
    /// An existing account with the same identifier is replaced (last write
    /// wins). The identifier format is not validated.
    pub fn create_account(
        &mut self,
        id: impl Into<AccountId>,
        secret: impl Into<String>,
        opening_balance: Money,
    ) {
        let account = Account::new(id.into(), secret, opening_balance);
        let key = account.id().clone();
        let replaced = self.accounts.insert(key.clone(), account).is_some();
        tracing::debug!(account = %key, opening_balance = %opening_balance, replaced, "account created");
    }

    /// Resolve an identifier/code pair.
    ///
    /// Unknown identifiers and wrong codes are indistinguishable to the caller.
    pub fn authenticate(&self, id: &str, code: &str) -> Option<&Account> {
        let account = self
            .accounts
            .get(id)
            .filter(|account| account.check_secret(code));
        if account.is_none() {
            tracing::info!(account = %id, "authentication failed");
        }
        account
    }

    /// Like [`authenticate`](Self::authenticate), reporting failure as an error.
    pub fn try_authenticate(&self, id: &str, code: &str) -> TellerResult<&Account> {
        self.authenticate(id, code)
            .ok_or(TellerError::AuthenticationFailed)
    }

    /// Unauthenticated lookup, used to resolve transfer targets.
    pub fn lookup(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn lookup_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.accounts.contains_key(id)
    }

    /// Transfer between two accounts owned by this registry.
    ///
    /// `source` must already be authenticated by the caller. An unknown
    /// target yields `TargetNotFound`; a transfer to the source itself is
    /// allowed and leaves its balance unchanged.
    pub fn transfer(
        &mut self,
        source: &str,
        target: &str,
        amount: PositiveAmount,
    ) -> TellerResult<Money> {
        if !self.accounts.contains_key(target) {
            tracing::info!(account = %source, target = %target, "transfer target not found");
            return Err(TellerError::target_not_found(target));
        }

        if source == target {
            return self
                .accounts
                .get_mut(source)
                .ok_or(TellerError::AuthenticationFailed)?
                .transfer_to_self(amount);
        }

        // Take the source out so both accounts can be borrowed mutably.
        let (key, mut source_account) = self
            .accounts
            .remove_entry(source)
            .ok_or(TellerError::AuthenticationFailed)?;
        let result = match self.accounts.get_mut(target) {
            Some(target_account) => source_account.transfer(target_account, amount),
            None => Err(TellerError::target_not_found(target)),
        };
        self.accounts.insert(key, source_account);
        result
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of all balances (unchanged by any transfer).
    ///
    /// `None` when the sum does not fit in a single `Money`.
    pub fn total_balance(&self) -> Option<Money> {
        self.accounts
            .values()
            .try_fold(Money::ZERO, |total, account| total.checked_add(account.balance()))
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }
}
