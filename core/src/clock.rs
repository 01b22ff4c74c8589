//! Wall-clock abstraction — owns "now" for cooldown and expiry checks.
//!
//! RULE: Nothing in the core reads the system clock directly.
//! A manual clock makes cooldown and intent-expiry logic testable
//! without sleeping.

use crate::types::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotClock {
    /// Real wall time (production).
    System,
    /// Frozen time, advanced explicitly (tests and replay tooling).
    Manual(Timestamp),
}

impl BotClock {
    pub fn now(&self) -> Timestamp {
        match self {
            BotClock::System => chrono::Utc::now().timestamp(),
            BotClock::Manual(t) => *t,
        }
    }

    /// Advance a manual clock by `secs`.
    /// Panics on a system clock — callers must not mix modes.
    pub fn advance(&mut self, secs: i64) {
        match self {
            BotClock::Manual(t) => *t += secs,
            BotClock::System => panic!("advance() called on system clock"),
        }
    }
}
