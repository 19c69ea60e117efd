//! `teller-cli` — console front end for the teller simulation.
//!
//! Thin presentation layer: prompts, menus, input validation and startup
//! seeding. Every balance change goes through `teller-accounts`.

pub mod config;
pub mod menu;
pub mod session;

pub use config::{ConfigError, SeedAccount, TellerConfig};
pub use menu::{AccountCommand, MainMenuChoice};
pub use session::Session;
