//! Money amounts in minor units.
//!
//! Balances are stored as whole cents (`u64`) so that transfers conserve
//! totals exactly; display is always two-decimal (`$1234.50`).

use core::str::FromStr;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::TellerError;

const CENTS_PER_UNIT: u64 = 100;

/// Largest amount accepted from text input (one trillion units).
const MAX_PARSED_CENTS: u64 = 1_000_000_000_000 * CENTS_PER_UNIT;

/// Why a piece of text was rejected as an amount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("not a number: {0:?}")]
    Malformed(String),

    #[error("amount must not be negative")]
    Negative,

    #[error("amount must be greater than zero")]
    Zero,

    #[error("amount has more than two decimal places")]
    TooPrecise,

    #[error("amount is too large")]
    TooLarge,
}

impl From<AmountError> for TellerError {
    fn from(value: AmountError) -> Self {
        TellerError::invalid_amount(value.to_string())
    }
}

/// Non-negative amount of money.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Whole units, e.g. `Money::from_units(1000)` is `$1000.00`.
    ///
    /// Takes `u32` so the conversion to cents cannot overflow.
    pub const fn from_units(units: u32) -> Self {
        Self(units as u64 * CENTS_PER_UNIT)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `None` when the sum does not fit in a balance.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// `None` when `other` exceeds `self` (balances never go negative).
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "${}.{:02}",
            self.0 / CENTS_PER_UNIT,
            self.0 % CENTS_PER_UNIT
        )
    }
}

impl FromStr for Money {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_decimal(s)?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative);
        }
        Ok(Money(to_cents(value.abs())?))
    }
}

/// Amount strictly greater than zero.
///
/// Deposits, withdrawals and transfers only accept this type, so positivity
/// is proven once at the input boundary and never re-checked by accounts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PositiveAmount(Money);

impl PositiveAmount {
    pub fn new(money: Money) -> Option<Self> {
        if money.is_zero() {
            None
        } else {
            Some(Self(money))
        }
    }

    pub fn from_cents(cents: u64) -> Option<Self> {
        Self::new(Money::from_cents(cents))
    }

    pub fn from_units(units: u32) -> Option<Self> {
        Self::new(Money::from_units(units))
    }

    pub fn money(self) -> Money {
        self.0
    }
}

impl core::fmt::Display for PositiveAmount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<PositiveAmount> for Money {
    fn from(value: PositiveAmount) -> Self {
        value.0
    }
}

impl FromStr for PositiveAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = parse_decimal(s)?;
        if value.is_zero() {
            return Err(AmountError::Zero);
        }
        if value.is_sign_negative() {
            return Err(AmountError::Negative);
        }
        Ok(Self(Money(to_cents(value)?)))
    }
}

/// Parse decimal or scientific notation (`12.5`, `1e3`), normalized so that
/// trailing zeros do not count as precision.
fn parse_decimal(s: &str) -> Result<Decimal, AmountError> {
    let trimmed = s.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map(|value| value.normalize())
        .map_err(|_| AmountError::Malformed(s.to_string()))
}

/// Convert a non-negative parsed value to whole cents.
fn to_cents(value: Decimal) -> Result<u64, AmountError> {
    if value.scale() > 2 {
        return Err(AmountError::TooPrecise);
    }
    let cents = value
        .checked_mul(Decimal::from(CENTS_PER_UNIT))
        .and_then(|cents| cents.to_u64())
        .ok_or(AmountError::TooLarge)?;
    if cents > MAX_PARSED_CENTS {
        return Err(AmountError::TooLarge);
    }
    Ok(cents)
}
