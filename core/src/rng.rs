//! Deterministic random number generation for the wagering engine.
//!
//! RULE: Nothing in the core may call any platform RNG.
//! All randomness flows through DiceRng streams derived from the
//! single master seed the core was constructed with.
//!
//! Each game gets its own stream, seeded deterministically from
//! (master_seed XOR game_slot). This means:
//!   - Adding a new game never changes existing games' streams.
//!   - Each game's outcome sequence is fully reproducible in isolation.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG stream for a single game.
pub struct DiceRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl DiceRng {
    /// Create a game RNG from the master seed and a stable game slot.
    /// The slot index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::RngCore;
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

/// All game RNG streams for one core instance, indexed by stable slot.
/// Streams persist across calls — consecutive rounds of the same game
/// continue the same sequence.
pub struct DiceBank {
    flip: DiceRng,
    crash: DiceRng,
    slots: DiceRng,
}

impl DiceBank {
    pub fn new(master_seed: u64) -> Self {
        Self {
            flip: DiceRng::new(master_seed, GameSlot::Flip as u64).with_name("flip"),
            crash: DiceRng::new(master_seed, GameSlot::Crash as u64).with_name("crash"),
            slots: DiceRng::new(master_seed, GameSlot::Slots as u64).with_name("slots"),
        }
    }

    pub fn for_game(&mut self, slot: GameSlot) -> &mut DiceRng {
        match slot {
            GameSlot::Flip => &mut self.flip,
            GameSlot::Crash => &mut self.crash,
            GameSlot::Slots => &mut self.slots,
        }
    }
}

/// Stable game slot assignments.
/// NEVER reorder or remove entries — only append.
/// Reordering changes every game's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum GameSlot {
    Flip = 0,
    Crash = 1,
    Slots = 2,
    // Add new games here — append only.
}

impl GameSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Flip => "flip",
            Self::Crash => "crash",
            Self::Slots => "slots",
        }
    }
}
