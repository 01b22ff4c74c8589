//! The core service — one explicitly constructed instance per bot process.
//!
//! RULES:
//!   - No ambient singletons: storage, clock, randomness and config are
//!     injected here and nowhere else.
//!   - All randomness flows through the DiceBank.
//!   - All balance mutation flows through the ledger (store write path).
//!
//! The presentation layer (chat transport, menus, admin lists) resolves a
//! user id and an intent, asks the gate for clearance, then calls exactly
//! one operation on this type and renders whatever it returns.

use crate::{
    clock::BotClock,
    config::BotConfig,
    error::BotResult,
    rng::DiceBank,
    store::BotStore,
    types::Timestamp,
};

pub struct BotCore {
    pub(crate) store: BotStore,
    pub(crate) clock: BotClock,
    pub(crate) dice: DiceBank,
    pub(crate) config: BotConfig,
}

impl BotCore {
    pub fn new(store: BotStore, clock: BotClock, seed: u64, config: BotConfig) -> Self {
        Self {
            store,
            clock,
            dice: DiceBank::new(seed),
            config,
        }
    }

    /// Open (and migrate) a file-backed core on the system clock.
    pub fn open(path: &str, seed: u64, config: BotConfig) -> BotResult<Self> {
        let store = BotStore::open(path)?;
        store.migrate()?;
        Ok(Self::new(store, BotClock::System, seed, config))
    }

    /// In-memory core on the system clock.
    pub fn in_memory(seed: u64, config: BotConfig) -> BotResult<Self> {
        let store = BotStore::in_memory()?;
        store.migrate()?;
        Ok(Self::new(store, BotClock::System, seed, config))
    }

    /// In-memory core with a frozen manual clock and default config.
    /// Used by integration tests and replay tooling.
    pub fn build_test(seed: u64) -> BotResult<Self> {
        let store = BotStore::in_memory()?;
        store.migrate()?;
        Ok(Self::new(
            store,
            BotClock::Manual(1_700_000_000),
            seed,
            BotConfig::default(),
        ))
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Advance a manual clock. Panics on the system clock.
    pub fn advance_clock(&mut self, secs: i64) {
        self.clock.advance(secs);
    }
}
