use crate::types::{Amount, RequestId, UserId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown account: {user_id}")]
    UnknownAccount { user_id: UserId },

    #[error("Invalid bet: {bet}")]
    InvalidBet { bet: Amount },

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: Amount },

    #[error("Insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: Amount, available: Amount },

    #[error("Not subscribed to all sponsor channels")]
    NotSubscribed,

    #[error("Cooldown active: {remaining_secs}s remaining")]
    CooldownActive { remaining_secs: i64 },

    #[error("Not enough active referrals: have {active}, need {required}")]
    NotEnoughReferrals { active: u32, required: u32 },

    #[error("Withdrawal request {request_id} is not pending")]
    NotPending { request_id: RequestId },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type BotResult<T> = Result<T, BotError>;
