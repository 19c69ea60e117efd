//! Teller accounts: the ledger entity and the directory that owns it.
//!
//! Pure domain logic only: no IO, no console, no persistence concerns.

pub mod account;
pub mod registry;

pub use account::{Account, TransactionHistory, TransactionKind, TransactionRecord};
pub use registry::AccountRegistry;
