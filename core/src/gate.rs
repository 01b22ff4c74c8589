//! The subscription gate.
//!
//! Every rewarded action is gated on the user being subscribed to all
//! configured sponsor channels. The gate only stores and derives from
//! verification outcomes it is told via `gate_record`; the actual
//! platform check (is this user really in that channel?) is an external
//! collaborator's job.

use crate::{
    engine::BotCore,
    error::{BotError, BotResult},
    ledger::TxKind,
    types::{SponsorId, UserId},
};
use serde::{Deserialize, Serialize};

/// An admin-managed sponsor channel users must join.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorChannel {
    pub sponsor_id: SponsorId,
    pub handle: String,
    pub external_channel_id: String,
    pub join_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SponsorStatus {
    pub sponsor: SponsorChannel,
    pub subscribed: bool,
}

/// Gate verdict for one user.
/// With no sponsors configured the verdict is vacuously positive.
#[derive(Debug, Clone, Serialize)]
pub struct GateStatus {
    pub all_subscribed: bool,
    pub per_sponsor: Vec<SponsorStatus>,
}

impl BotCore {
    // ── Sponsor administration ────────────────────────────────────

    pub fn add_sponsor(
        &self,
        handle: &str,
        external_channel_id: &str,
        join_url: &str,
    ) -> BotResult<SponsorChannel> {
        let sponsor_id = self
            .store
            .insert_sponsor(handle, external_channel_id, join_url)?;
        log::info!("sponsor added: {handle} (id={sponsor_id})");
        Ok(SponsorChannel {
            sponsor_id,
            handle: handle.to_string(),
            external_channel_id: external_channel_id.to_string(),
            join_url: join_url.to_string(),
        })
    }

    pub fn remove_sponsor(&self, sponsor_id: SponsorId) -> BotResult<()> {
        self.store.delete_sponsor(sponsor_id)
    }

    pub fn list_sponsors(&self) -> BotResult<Vec<SponsorChannel>> {
        self.store.list_sponsors()
    }

    // ── Gate ──────────────────────────────────────────────────────

    /// Pure read: AND over all configured sponsors, unrecorded pairs
    /// defaulting to unsubscribed. Empty sponsor set => vacuously true.
    pub fn gate_status(&self, user_id: UserId) -> BotResult<GateStatus> {
        let rows = self.store.sponsor_statuses_for(user_id)?;
        let all_subscribed = rows.iter().all(|(_, subscribed)| *subscribed);
        Ok(GateStatus {
            all_subscribed,
            per_sponsor: rows
                .into_iter()
                .map(|(sponsor, subscribed)| SponsorStatus {
                    sponsor,
                    subscribed,
                })
                .collect(),
        })
    }

    /// Record one verification outcome reported by the external checker.
    pub fn gate_record(
        &self,
        user_id: UserId,
        sponsor_id: SponsorId,
        subscribed: bool,
    ) -> BotResult<()> {
        self.store
            .upsert_subscription(user_id, sponsor_id, subscribed)
    }

    /// The clearance check rewarded actions run before doing anything.
    /// The first time a registered user is observed fully subscribed,
    /// the one-time referral signup bonus fires; the persisted flag
    /// guarantees at most once per user, ever.
    pub fn clearance(&self, user_id: UserId) -> BotResult<bool> {
        let status = self.gate_status(user_id)?;
        if !status.all_subscribed {
            return Ok(false);
        }

        let account = self
            .store
            .get_account(user_id)?
            .ok_or(BotError::UnknownAccount { user_id })?;
        if !account.signup_bonus_fired {
            // Flag first: a storage failure mid-payout must not allow a
            // second firing on retry.
            self.store.mark_signup_bonus_fired(user_id)?;
            if let Some(referrer) = account.referrer_id {
                self.credit_or_debit(
                    referrer,
                    self.config.signup_bonus_referrer,
                    TxKind::ReferralSignupBonus,
                    &format!("signup bonus for referring {user_id}"),
                )?;
                self.credit_or_debit(
                    user_id,
                    self.config.signup_bonus_user,
                    TxKind::ReferralSignupBonus,
                    &format!("signup bonus, referred by {referrer}"),
                )?;
                log::info!("signup bonus fired: user={user_id} referrer={referrer}");
            }
        }

        Ok(true)
    }
}
