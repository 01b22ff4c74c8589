//! The wagering engine — flip, crash and slots.
//!
//! Every round follows the same shape: validate the stake before any
//! randomness is drawn, draw the round's outcome from the game's own
//! deterministic stream, then settle through a single ledger call.
//!
//! KNOWN ODDITIES (kept on purpose, see DESIGN.md):
//!   - Flip draws the advertised 49% win roll and the displayed side as
//!     two independent rolls; settlement follows the side match only.
//!     Both rolls stay in the stream so seeded replays stay stable.
//!   - The slots presentation text advertises 1-in-27 odds, but three
//!     uniform draws over nine symbols make a triple 1-in-9.

use crate::{
    engine::BotCore,
    error::{BotError, BotResult},
    ledger::TxKind,
    rng::GameSlot,
    types::{Amount, UserId},
};
use serde::{Deserialize, Serialize};

/// The nine-symbol slots alphabet. Order is part of the seeded stream —
/// append only, never reorder.
pub const SLOT_SYMBOLS: [&str; 9] = [
    "banana", "monkey", "cherry", "lemon", "grape", "bell", "star", "coin", "seven",
];

/// Odds string shown by the presentation layer next to the slots button.
/// Does not match the 1/9 draw probability; reproduced as-is.
pub const SLOTS_ADVERTISED_ODDS: &str = "1/27";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Game {
    Flip,
    Crash,
    Slots,
}

impl Game {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flip => "flip",
            Self::Crash => "crash",
            Self::Slots => "slots",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "flip" => Some(Self::Flip),
            "crash" => Some(Self::Crash),
            "slots" => Some(Self::Slots),
            _ => None,
        }
    }
}

/// The two flip sides a player can back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipSide {
    Banana,
    Monkey,
}

impl FlipSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Banana => "banana",
            Self::Monkey => "monkey",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "banana" => Some(Self::Banana),
            "monkey" => Some(Self::Monkey),
            _ => None,
        }
    }
}

/// What actually happened in a round, for the caller to render.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum GameOutcome {
    Flip {
        choice: FlipSide,
        actual: FlipSide,
        /// House special event: unconditional loss, no side shown as
        /// having been matched.
        special_event: bool,
    },
    Crash {
        multiplier: f64,
        crashed: bool,
    },
    Slots {
        symbols: [&'static str; 3],
    },
}

/// The settled result of one round.
#[derive(Debug, Clone, Serialize)]
pub struct Settlement {
    pub won: bool,
    /// Signed balance change applied by this round.
    pub net_delta: Amount,
    pub outcome: GameOutcome,
}

impl BotCore {
    /// Stake validation shared by all games. Runs before any draw so a
    /// rejected round never consumes randomness.
    fn check_stake(&self, user_id: UserId, bet: Amount) -> BotResult<()> {
        if bet <= 0.0 {
            return Err(BotError::InvalidBet { bet });
        }
        let available = self.balance_of(user_id)?;
        if available < bet {
            return Err(BotError::InsufficientFunds {
                needed: bet,
                available,
            });
        }
        Ok(())
    }

    /// Coin flip. 2% house special event loses outright; otherwise the
    /// advertised win roll and the displayed side are drawn separately
    /// and the side match settles the round.
    pub fn play_flip(
        &mut self,
        user_id: UserId,
        bet: Amount,
        choice: FlipSide,
    ) -> BotResult<Settlement> {
        self.check_stake(user_id, bet)?;
        let rng = self.dice.for_game(GameSlot::Flip);

        if rng.chance(self.config.flip_special_event_chance) {
            // Special event: the displayed side is forced to the side the
            // player did not pick.
            let actual = match choice {
                FlipSide::Banana => FlipSide::Monkey,
                FlipSide::Monkey => FlipSide::Banana,
            };
            let entry = self.credit_or_debit(
                user_id,
                -bet,
                TxKind::GameLoss,
                &format!("flip special event, picked {}", choice.as_str()),
            )?;
            return Ok(Settlement {
                won: false,
                net_delta: entry.delta,
                outcome: GameOutcome::Flip {
                    choice,
                    actual,
                    special_event: true,
                },
            });
        }

        // Advertised 49% win roll. Drawn and kept in the stream, but the
        // round is settled by the independent side draw below.
        let _advertised_win = rng.chance(self.config.flip_win_chance);
        let actual = if rng.chance(0.5) {
            FlipSide::Banana
        } else {
            FlipSide::Monkey
        };
        let won = choice == actual;

        let entry = if won {
            self.credit_or_debit(
                user_id,
                bet * (self.config.flip_payout_multiplier - 1.0),
                TxKind::GameWin,
                &format!("flip win on {}", actual.as_str()),
            )?
        } else {
            self.credit_or_debit(
                user_id,
                -bet,
                TxKind::GameLoss,
                &format!("flip loss, {} came up", actual.as_str()),
            )?
        };

        Ok(Settlement {
            won,
            net_delta: entry.delta,
            outcome: GameOutcome::Flip {
                choice,
                actual,
                special_event: false,
            },
        })
    }

    /// Crash. Only the surviving branch (multiplier >= 1.50) pays; the
    /// early band reports a multiplier above 1.00 but still loses the
    /// whole bet.
    pub fn play_crash(&mut self, user_id: UserId, bet: Amount) -> BotResult<Settlement> {
        self.check_stake(user_id, bet)?;
        let rng = self.dice.for_game(GameSlot::Crash);

        let roll = rng.next_f64();
        let (multiplier, crashed) = if roll < self.config.crash_instant_chance {
            (1.00, true)
        } else if roll < self.config.crash_early_chance {
            let (lo, hi) = self.config.crash_early_band;
            (rng.uniform(lo, hi), true)
        } else {
            let (lo, hi) = self.config.crash_win_band;
            (rng.uniform(lo, hi), false)
        };

        let entry = if crashed {
            self.credit_or_debit(
                user_id,
                -bet,
                TxKind::GameLoss,
                &format!("crash at {multiplier:.2}x"),
            )?
        } else {
            self.credit_or_debit(
                user_id,
                bet * (multiplier - 1.0),
                TxKind::GameWin,
                &format!("crash survived to {multiplier:.2}x"),
            )?
        };

        Ok(Settlement {
            won: !crashed,
            net_delta: entry.delta,
            outcome: GameOutcome::Crash {
                multiplier,
                crashed,
            },
        })
    }

    /// Slots. Three independent uniform symbols; a triple pays 20x gross.
    pub fn play_slots(&mut self, user_id: UserId, bet: Amount) -> BotResult<Settlement> {
        self.check_stake(user_id, bet)?;
        let rng = self.dice.for_game(GameSlot::Slots);

        let symbols = [
            SLOT_SYMBOLS[rng.next_u64_below(SLOT_SYMBOLS.len() as u64) as usize],
            SLOT_SYMBOLS[rng.next_u64_below(SLOT_SYMBOLS.len() as u64) as usize],
            SLOT_SYMBOLS[rng.next_u64_below(SLOT_SYMBOLS.len() as u64) as usize],
        ];
        let won = symbols[0] == symbols[1] && symbols[1] == symbols[2];

        let entry = if won {
            self.credit_or_debit(
                user_id,
                bet * (self.config.slots_payout_multiplier - 1.0),
                TxKind::GameWin,
                &format!("slots triple {}", symbols[0]),
            )?
        } else {
            self.credit_or_debit(
                user_id,
                -bet,
                TxKind::GameLoss,
                &format!("slots {} {} {}", symbols[0], symbols[1], symbols[2]),
            )?
        };

        Ok(Settlement {
            won,
            net_delta: entry.delta,
            outcome: GameOutcome::Slots { symbols },
        })
    }
}
