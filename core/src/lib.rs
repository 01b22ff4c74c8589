//! Ledger & wagering core for a chat engagement bot.
//!
//! The transport layer (chat commands, menus, subscription verification)
//! lives elsewhere; this crate owns the money: accounts and the referral
//! forest, the append-only ledger, the subscription gate, the click
//! reward scheduler, the three games and the withdrawal workflow.

pub mod account;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod games;
pub mod gate;
pub mod intent;
pub mod ledger;
pub mod rewards;
pub mod rng;
pub mod store;
pub mod types;
pub mod withdrawal;
