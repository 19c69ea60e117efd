use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use teller_core::{AccountId, Money, PositiveAmount, TellerError, TellerResult};

/// Kind of balance-affecting operation recorded in an account's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Transfer,
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransactionKind::Deposit => write!(f, "Deposit"),
            TransactionKind::Withdraw => write!(f, "Withdraw"),
            TransactionKind::Transfer => write!(f, "Transfer"),
        }
    }
}

/// One completed operation in an account's log (immutable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub entry_id: Uuid,
    pub kind: TransactionKind,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

impl TransactionRecord {
    fn new(kind: TransactionKind, amount: Money) -> Self {
        Self {
            entry_id: Uuid::now_v7(),
            kind,
            amount,
            occurred_at: Utc::now(),
        }
    }

    /// The `(kind, amount)` pair, without entry metadata.
    pub fn summary(&self) -> (TransactionKind, Money) {
        (self.kind, self.amount)
    }
}

/// Read-only view of an account's log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionHistory<'a> {
    /// Nothing has been recorded yet.
    NoTransactions,
    /// Entries in the order they were performed.
    Entries(&'a [TransactionRecord]),
}

impl<'a> TransactionHistory<'a> {
    pub fn entries(&self) -> &'a [TransactionRecord] {
        match *self {
            TransactionHistory::NoTransactions => &[],
            TransactionHistory::Entries(entries) => entries,
        }
    }

    pub fn summaries(&self) -> Vec<(TransactionKind, Money)> {
        self.entries().iter().map(TransactionRecord::summary).collect()
    }
}

impl core::fmt::Display for TransactionHistory<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransactionHistory::NoTransactions => write!(f, "No transactions available"),
            TransactionHistory::Entries(entries) => {
                write!(f, "Transaction History:")?;
                for entry in entries.iter() {
                    write!(f, "\n{}: {}", entry.kind, entry.amount)?;
                }
                Ok(())
            }
        }
    }
}

/// Ledger entity: balance, secret code and append-only transaction log.
///
/// # Invariants
/// - `id` never changes after creation.
/// - `balance` never goes negative (withdrawals and transfers check funds
///   before mutating anything).
/// - `log` is append-only; insertion order is chronological order.
#[derive(Clone)]
pub struct Account {
    id: AccountId,
    secret: String,
    balance: Money,
    log: Vec<TransactionRecord>,
}

impl Account {
    pub fn new(id: AccountId, secret: impl Into<String>, opening_balance: Money) -> Self {
        Self {
            id,
            secret: secret.into(),
            balance: opening_balance,
            log: Vec::new(),
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Plaintext equality against the current secret code.
    pub fn check_secret(&self, code: &str) -> bool {
        self.secret == code
    }

    /// Replace the secret code when `old` matches the current one.
    ///
    /// `new` is not validated: empty codes, or a code equal to the old one,
    /// are accepted.
    pub fn change_secret(&mut self, old: &str, new: impl Into<String>) -> TellerResult<()> {
        if !self.check_secret(old) {
            tracing::info!(account = %self.id, "secret change rejected");
            return Err(TellerError::IncorrectCurrentSecret);
        }
        self.secret = new.into();
        tracing::debug!(account = %self.id, "secret changed");
        Ok(())
    }

    /// Credit `amount`, returning the new balance.
    ///
    /// A credit that would overflow the balance is rejected and nothing is
    /// recorded.
    pub fn deposit(&mut self, amount: PositiveAmount) -> TellerResult<Money> {
        self.credit(amount)?;
        tracing::debug!(account = %self.id, amount = %amount, balance = %self.balance, "deposit");
        Ok(self.balance)
    }

    /// Debit `amount`, returning the new balance.
    pub fn withdraw(&mut self, amount: PositiveAmount) -> TellerResult<Money> {
        self.ensure_funds(amount)?;
        self.debit(amount.money());
        tracing::debug!(account = %self.id, amount = %amount, balance = %self.balance, "withdraw");
        Ok(self.balance)
    }

    /// Move `amount` to `target`, returning the source's new balance.
    ///
    /// The source log gains `Withdraw` then `Transfer`; the target log gains
    /// `Deposit`. Funds and target capacity are both checked before anything
    /// is mutated, so a rejected transfer leaves both accounts untouched.
    pub fn transfer(&mut self, target: &mut Account, amount: PositiveAmount) -> TellerResult<Money> {
        self.ensure_funds(amount)?;
        target.ensure_capacity(amount)?;
        self.withdraw(amount)?;
        target.deposit(amount)?;
        self.record(TransactionKind::Transfer, amount.money());
        tracing::debug!(
            account = %self.id,
            target = %target.id,
            amount = %amount,
            balance = %self.balance,
            "transfer"
        );
        Ok(self.balance)
    }

    /// Transfer where source and target are the same account.
    ///
    /// Balance is unchanged; the log gains `Withdraw`, `Deposit`, `Transfer`.
    pub(crate) fn transfer_to_self(&mut self, amount: PositiveAmount) -> TellerResult<Money> {
        self.withdraw(amount)?;
        self.deposit(amount)?;
        self.record(TransactionKind::Transfer, amount.money());
        tracing::debug!(account = %self.id, amount = %amount, "transfer to self");
        Ok(self.balance)
    }

    pub fn transaction_history(&self) -> TransactionHistory<'_> {
        if self.log.is_empty() {
            TransactionHistory::NoTransactions
        } else {
            TransactionHistory::Entries(&self.log)
        }
    }

    fn ensure_funds(&self, amount: PositiveAmount) -> TellerResult<()> {
        if amount.money() > self.balance {
            tracing::info!(
                account = %self.id,
                requested = %amount,
                available = %self.balance,
                "insufficient balance"
            );
            return Err(TellerError::insufficient(amount.money(), self.balance));
        }
        Ok(())
    }

    fn ensure_capacity(&self, amount: PositiveAmount) -> TellerResult<Money> {
        self.balance.checked_add(amount.money()).ok_or_else(|| {
            tracing::info!(
                account = %self.id,
                credit = %amount,
                balance = %self.balance,
                "balance limit exceeded"
            );
            TellerError::balance_limit(self.balance, amount.money())
        })
    }

    fn credit(&mut self, amount: PositiveAmount) -> TellerResult<()> {
        self.balance = self.ensure_capacity(amount)?;
        self.record(TransactionKind::Deposit, amount.money());
        Ok(())
    }

    fn debit(&mut self, amount: Money) {
        // ensure_funds has run; a failed subtraction leaves state untouched.
        if let Some(balance) = self.balance.checked_sub(amount) {
            self.balance = balance;
            self.record(TransactionKind::Withdraw, amount);
        }
    }

    fn record(&mut self, kind: TransactionKind, amount: Money) {
        self.log.push(TransactionRecord::new(kind, amount));
    }
}

// Secret codes stay out of debug output (and therefore out of logs).
impl core::fmt::Debug for Account {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .field("balance", &self.balance)
            .field("log", &self.log)
            .finish()
    }
}
