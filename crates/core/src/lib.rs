//! `teller-core` — domain building blocks for the teller simulation.
//!
//! This crate contains **pure domain** primitives (no IO, no console concerns).

pub mod error;
pub mod id;
pub mod money;

pub use error::{TellerError, TellerResult};
pub use id::AccountId;
pub use money::{AmountError, Money, PositiveAmount};
