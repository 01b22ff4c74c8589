//! The ledger — the single owner of balance mutation.
//!
//! Every component (games, rewards, withdrawals, admin overrides) changes
//! a balance by asking the ledger for one signed delta; the delta and its
//! matching log entry commit together or not at all.
//!
//! The ledger does NOT enforce balance >= 0. Callers pre-check
//! sufficiency before debiting (games and withdrawals do); the write path
//! itself stays permissive.

use crate::{
    engine::BotCore,
    error::{BotError, BotResult},
    types::{Amount, EntryId, Timestamp, UserId},
};
use serde::{Deserialize, Serialize};

/// Every reason a balance can change. Stored as the `kind` column of the
/// ledger log; the set is append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxKind {
    Click,
    ReferralSignupBonus,
    ReferralIncome,
    GameWin,
    GameLoss,
    Withdrawal,
    WithdrawalRefund,
    AdminAdjustment,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::ReferralSignupBonus => "referral_signup_bonus",
            Self::ReferralIncome => "referral_income",
            Self::GameWin => "game_win",
            Self::GameLoss => "game_loss",
            Self::Withdrawal => "withdrawal",
            Self::WithdrawalRefund => "withdrawal_refund",
            Self::AdminAdjustment => "admin_adjustment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "click" => Some(Self::Click),
            "referral_signup_bonus" => Some(Self::ReferralSignupBonus),
            "referral_income" => Some(Self::ReferralIncome),
            "game_win" => Some(Self::GameWin),
            "game_loss" => Some(Self::GameLoss),
            "withdrawal" => Some(Self::Withdrawal),
            "withdrawal_refund" => Some(Self::WithdrawalRefund),
            "admin_adjustment" => Some(Self::AdminAdjustment),
            _ => None,
        }
    }
}

/// One immutable row of the append-only audit trail.
/// Invariant: the deltas of a user's transactions sum to their balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: EntryId,
    pub user_id: UserId,
    pub delta: Amount,
    pub kind: TxKind,
    pub memo: String,
    pub created_at: Timestamp,
}

impl BotCore {
    /// Atomically apply one signed delta and append the audit entry.
    /// Fails with `UnknownAccount` if the user was never registered.
    pub fn credit_or_debit(
        &self,
        user_id: UserId,
        delta: Amount,
        kind: TxKind,
        memo: &str,
    ) -> BotResult<Transaction> {
        let entry = self
            .store
            .apply_ledger_entry(user_id, delta, kind, memo, self.now())?;
        log::debug!(
            "ledger: user={user_id} delta={delta:+.4} kind={} memo={memo}",
            kind.as_str()
        );
        Ok(entry)
    }

    pub fn balance_of(&self, user_id: UserId) -> BotResult<Amount> {
        self.store
            .balance(user_id)?
            .ok_or(BotError::UnknownAccount { user_id })
    }

    /// Admin override. Recorded as an `admin_adjustment` for the
    /// difference, so the sum-of-deltas invariant survives direct edits.
    pub fn set_balance(&self, user_id: UserId, new_balance: Amount) -> BotResult<Transaction> {
        let old = self.balance_of(user_id)?;
        self.credit_or_debit(
            user_id,
            new_balance - old,
            TxKind::AdminAdjustment,
            &format!("set_balance {old:.4} -> {new_balance:.4}"),
        )
    }

    /// Full audit trail for one user, oldest first.
    pub fn transactions_for(&self, user_id: UserId) -> BotResult<Vec<Transaction>> {
        if !self.store.account_exists(user_id)? {
            return Err(BotError::UnknownAccount { user_id });
        }
        self.store.ledger_entries_for(user_id)
    }
}
