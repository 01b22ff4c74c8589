//! Core tunables. Defaults match the production bot; deployments can
//! override any field from a JSON file.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Fixed reward credited per successful click claim.
    pub click_reward: f64,
    /// Minimum seconds between two click claims for the same user.
    pub click_cooldown_secs: i64,
    /// Share of every click reward kicked back to the referrer.
    pub referral_kickback_share: f64,

    /// One-time bonus credited to the referrer on the referred user's
    /// first full subscription-gate clearance.
    pub signup_bonus_referrer: f64,
    /// One-time bonus credited to the new user at the same moment.
    /// Smaller than the referrer's bonus.
    pub signup_bonus_user: f64,

    /// Active referrals required before a withdrawal may be requested.
    pub min_active_referrals: u32,

    /// Flip: chance of the house special event (unconditional loss).
    pub flip_special_event_chance: f64,
    /// Flip: advertised win chance, drawn separately from the side match.
    pub flip_win_chance: f64,
    /// Flip: gross payout multiplier on a win (net = bet * (m - 1)).
    pub flip_payout_multiplier: f64,

    /// Crash: chance of an instant 1.00x crash.
    pub crash_instant_chance: f64,
    /// Crash: cumulative chance of crashing at or below the early band.
    pub crash_early_chance: f64,
    /// Crash: early-crash multiplier band (reported, never paid).
    pub crash_early_band: (f64, f64),
    /// Crash: surviving-round multiplier band (paid).
    pub crash_win_band: (f64, f64),

    /// Slots: gross payout multiplier on a triple (net = bet * (m - 1)).
    pub slots_payout_multiplier: f64,

    /// Seconds before a pending intent (awaiting-bet state) expires.
    pub intent_ttl_secs: i64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            click_reward: 0.2,
            click_cooldown_secs: 3600,
            referral_kickback_share: 0.1,
            signup_bonus_referrer: 1.0,
            signup_bonus_user: 0.5,
            min_active_referrals: 3,
            flip_special_event_chance: 0.02,
            flip_win_chance: 0.49,
            flip_payout_multiplier: 2.0,
            crash_instant_chance: 0.60,
            crash_early_chance: 0.98,
            crash_early_band: (1.01, 1.10),
            crash_win_band: (1.50, 5.00),
            slots_payout_multiplier: 20.0,
            intent_ttl_secs: 300,
        }
    }
}

impl BotConfig {
    /// Load overrides from a JSON file. Missing fields keep defaults.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: BotConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }
}
