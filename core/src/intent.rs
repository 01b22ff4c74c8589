//! Pending intents — the "awaiting bet amount" conversation state.
//!
//! When a user picks a game (and, for flip, a side) the transport parks
//! an intent here and asks for the stake. The record is consume-once and
//! expires after a short TTL so stale prompts cannot settle a round.

use crate::{
    engine::BotCore,
    error::BotResult,
    games::{FlipSide, Game},
    types::{Timestamp, UserId},
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingIntent {
    pub user_id: UserId,
    pub game: Game,
    /// Only meaningful for flip.
    pub choice: Option<FlipSide>,
    pub expires_at: Timestamp,
}

impl BotCore {
    /// Park an awaiting-bet intent for the user, replacing any previous
    /// one. Expiry is `now + intent_ttl_secs`.
    pub fn set_intent(
        &self,
        user_id: UserId,
        game: Game,
        choice: Option<FlipSide>,
    ) -> BotResult<PendingIntent> {
        let expires_at = self.now() + self.config.intent_ttl_secs;
        self.store.upsert_intent(
            user_id,
            game.as_str(),
            choice.map(|c| c.as_str()),
            expires_at,
        )?;
        Ok(PendingIntent {
            user_id,
            game,
            choice,
            expires_at,
        })
    }

    /// Consume the user's pending intent, if any. An expired intent is
    /// purged and reported as absent.
    pub fn take_intent(&self, user_id: UserId) -> BotResult<Option<PendingIntent>> {
        let row = self.store.take_intent(user_id, self.now())?;
        Ok(row.and_then(|(game, choice, expires_at)| {
            let game = Game::parse(&game)?;
            let choice = choice.as_deref().and_then(FlipSide::parse);
            Some(PendingIntent {
                user_id,
                game,
                choice,
                expires_at,
            })
        }))
    }
}
