//! The withdrawal workflow.
//!
//! Funds are reserved at request time: a successful request debits the
//! amount immediately, approval changes nothing, rejection credits the
//! amount back. The pending→terminal transition is guarded inside the
//! store so a request can never be processed twice.

use crate::{
    engine::BotCore,
    error::{BotError, BotResult},
    ledger::TxKind,
    types::{Amount, RequestId, Timestamp, UserId},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
}

impl WithdrawalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub id: RequestId,
    pub user_id: UserId,
    pub amount: Amount,
    pub status: WithdrawalStatus,
    /// External payout reference handed to the admin surface.
    pub reference: String,
    pub created_at: Timestamp,
}

impl BotCore {
    /// Create a withdrawal request and reserve the funds.
    ///
    /// Rejections, in check order: `InvalidAmount` (amount <= 0),
    /// `InsufficientFunds`, `NotEnoughReferrals`. No request row is
    /// created on any rejection.
    pub fn request_withdrawal(
        &self,
        user_id: UserId,
        amount: Amount,
    ) -> BotResult<WithdrawalRequest> {
        if amount <= 0.0 {
            return Err(BotError::InvalidAmount { amount });
        }
        let available = self.balance_of(user_id)?;
        if available < amount {
            return Err(BotError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        let counts = self.referral_counts(user_id)?;
        if counts.active < self.config.min_active_referrals {
            return Err(BotError::NotEnoughReferrals {
                active: counts.active,
                required: self.config.min_active_referrals,
            });
        }

        let reference = Uuid::new_v4().to_string();
        let id = self
            .store
            .insert_withdrawal_request(user_id, amount, &reference, self.now())?;
        self.credit_or_debit(
            user_id,
            -amount,
            TxKind::Withdrawal,
            &format!("withdrawal request #{id}"),
        )?;
        log::info!("withdrawal requested: user={user_id} amount={amount} id={id}");

        self.store
            .get_withdrawal_request(id)?
            .ok_or(BotError::NotPending { request_id: id })
    }

    /// pending → approved. Funds were already debited at request time,
    /// so nothing moves here.
    pub fn approve_withdrawal(&self, request_id: RequestId) -> BotResult<()> {
        if !self
            .store
            .transition_withdrawal(request_id, WithdrawalStatus::Approved)?
        {
            return Err(BotError::NotPending { request_id });
        }
        log::info!("withdrawal approved: id={request_id}");
        Ok(())
    }

    /// pending → rejected, crediting the reserved amount back.
    pub fn reject_withdrawal(&self, request_id: RequestId) -> BotResult<()> {
        let request = self
            .store
            .get_withdrawal_request(request_id)?
            .ok_or(BotError::NotPending { request_id })?;
        if !self
            .store
            .transition_withdrawal(request_id, WithdrawalStatus::Rejected)?
        {
            return Err(BotError::NotPending { request_id });
        }
        self.credit_or_debit(
            request.user_id,
            request.amount,
            TxKind::WithdrawalRefund,
            &format!("refund for rejected withdrawal #{request_id}"),
        )?;
        log::info!("withdrawal rejected: id={request_id}");
        Ok(())
    }

    /// Admin queue, oldest first.
    pub fn list_pending_withdrawals(&self) -> BotResult<Vec<WithdrawalRequest>> {
        self.store.pending_withdrawals()
    }
}
