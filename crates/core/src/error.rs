//! Teller error model.

use thiserror::Error;

use crate::money::Money;

/// Result type used across the teller domain.
pub type TellerResult<T> = Result<T, TellerError>;

/// Teller-level error.
///
/// Every variant is recoverable: callers report it and carry on. Nothing in
/// the domain layer is fatal to the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TellerError {
    /// A secret-code change was attempted with a non-matching current code.
    #[error("incorrect current secret code")]
    IncorrectCurrentSecret,

    /// A withdrawal or transfer exceeds the available balance.
    #[error("insufficient balance (requested: {requested}, available: {available})")]
    InsufficientBalance { requested: Money, available: Money },

    /// Identifier/code pair did not resolve to an account.
    ///
    /// Unknown identifiers and wrong codes both map here, so the result does
    /// not reveal whether an account exists.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// A credit would push a balance past what an account can hold.
    #[error("balance limit exceeded (balance: {balance}, credit: {credit})")]
    BalanceLimitExceeded { balance: Money, credit: Money },

    /// Transfer destination does not exist in the registry.
    #[error("target account not found: {0}")]
    TargetNotFound(String),

    /// An amount failed boundary validation (non-numeric, negative, zero,
    /// or too precise).
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

impl TellerError {
    pub fn insufficient(requested: Money, available: Money) -> Self {
        Self::InsufficientBalance {
            requested,
            available,
        }
    }

    pub fn balance_limit(balance: Money, credit: Money) -> Self {
        Self::BalanceLimitExceeded { balance, credit }
    }

    pub fn target_not_found(id: impl Into<String>) -> Self {
        Self::TargetNotFound(id.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }
}
