//! Accounts and the referral graph.
//!
//! The graph is a parent-pointer forest: each account optionally stores
//! the id of the account that referred it, set exactly once at creation.
//! Descendants are derived by query over that back-reference — there is
//! no parent-side child list to keep in sync.

use crate::{
    engine::BotCore,
    error::{BotError, BotResult},
    types::{Amount, Timestamp, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub user_id: UserId,
    pub display_name: String,
    pub balance: Amount,
    pub referrer_id: Option<UserId>,
    pub last_reward_claim: Option<Timestamp>,
    pub is_admin: bool,
    /// One-shot guard for the referral signup bonus (§ gate clearance).
    pub signup_bonus_fired: bool,
    pub created_at: Timestamp,
}

/// Referral totals for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralCounts {
    /// Accounts whose referrer is this user.
    pub total: u32,
    /// Of those, the ones currently clearing the subscription gate.
    pub active: u32,
}

impl BotCore {
    /// Create the account on first contact. Re-registration is a no-op:
    /// the existing account is returned unchanged (referrer_id is never
    /// edited and the balance is never reset).
    ///
    /// A self-referral or a referrer that was never registered silently
    /// downgrades to "no referrer" — neither is a hard error.
    pub fn register(
        &self,
        user_id: UserId,
        display_name: &str,
        referrer_id: Option<UserId>,
    ) -> BotResult<Account> {
        if let Some(existing) = self.store.get_account(user_id)? {
            return Ok(existing);
        }

        let referrer = match referrer_id {
            Some(r) if r == user_id => {
                log::debug!("register: user={user_id} self-referral dropped");
                None
            }
            Some(r) => {
                if self.store.account_exists(r)? {
                    Some(r)
                } else {
                    log::debug!("register: user={user_id} unknown referrer {r} dropped");
                    None
                }
            }
            None => None,
        };

        self.store
            .insert_account(user_id, display_name, referrer, self.now())?;
        log::info!("register: user={user_id} referrer={referrer:?}");

        self.store
            .get_account(user_id)?
            .ok_or(BotError::UnknownAccount { user_id })
    }

    pub fn get_account(&self, user_id: UserId) -> BotResult<Option<Account>> {
        self.store.get_account(user_id)
    }

    /// (total, active) referrals. A referred account is active iff its
    /// own gate status is fully subscribed, inheriting the gate's
    /// vacuous-truth rule for an empty sponsor set.
    pub fn referral_counts(&self, user_id: UserId) -> BotResult<ReferralCounts> {
        let children = self.store.referred_user_ids(user_id)?;
        let total = children.len() as u32;
        let mut active = 0u32;
        for child in children {
            if self.gate_status(child)?.all_subscribed {
                active += 1;
            }
        }
        Ok(ReferralCounts { total, active })
    }

    /// Leaderboard / admin listing, richest first.
    pub fn list_accounts_by_balance_desc(&self) -> BotResult<Vec<Account>> {
        self.store.accounts_by_balance_desc()
    }

    pub fn set_admin(&self, user_id: UserId, is_admin: bool) -> BotResult<()> {
        if !self.store.account_exists(user_id)? {
            return Err(BotError::UnknownAccount { user_id });
        }
        self.store.set_admin_flag(user_id, is_admin)
    }
}
