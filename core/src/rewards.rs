//! The click reward scheduler.
//!
//! One cooldown-gated reward per user per hour, with an unconditional
//! kickback to the referrer on every claim (the referrer's own activity
//! status is deliberately not consulted).

use crate::{
    engine::BotCore,
    error::{BotError, BotResult},
    ledger::TxKind,
    types::{Amount, Timestamp, UserId},
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Reward {
    pub amount: Amount,
    /// (referrer, amount) if a kickback was paid this claim.
    pub referrer_kickback: Option<(UserId, Amount)>,
    pub claimed_at: Timestamp,
}

impl BotCore {
    /// Claim the periodic click reward.
    ///
    /// Rejections, in check order: `UnknownAccount`, `NotSubscribed`,
    /// `CooldownActive(remaining)`.
    pub fn claim_click_reward(&self, user_id: UserId) -> BotResult<Reward> {
        let account = self
            .store
            .get_account(user_id)?
            .ok_or(BotError::UnknownAccount { user_id })?;

        if !self.clearance(user_id)? {
            return Err(BotError::NotSubscribed);
        }

        let now = self.now();
        if let Some(last) = account.last_reward_claim {
            let elapsed = now - last;
            if elapsed < self.config.click_cooldown_secs {
                return Err(BotError::CooldownActive {
                    remaining_secs: self.config.click_cooldown_secs - elapsed,
                });
            }
        }

        let amount = self.config.click_reward;
        self.credit_or_debit(user_id, amount, TxKind::Click, "click reward")?;
        self.store.set_last_reward_claim(user_id, now)?;

        let referrer_kickback = match account.referrer_id {
            Some(referrer) => {
                let kickback = amount * self.config.referral_kickback_share;
                self.credit_or_debit(
                    referrer,
                    kickback,
                    TxKind::ReferralIncome,
                    &format!("click income from {user_id}"),
                )?;
                Some((referrer, kickback))
            }
            None => None,
        };

        Ok(Reward {
            amount,
            referrer_kickback,
            claimed_at: now,
        })
    }
}
