use super::BotStore;
use crate::{
    error::BotResult,
    types::{Timestamp, UserId},
};
use rusqlite::{params, OptionalExtension};

impl BotStore {
    // ── Pending intents ───────────────────────────────────────────

    /// Set (or replace) the user's pending intent.
    pub fn upsert_intent(
        &self,
        user_id: UserId,
        game: &str,
        choice: Option<&str>,
        expires_at: Timestamp,
    ) -> BotResult<()> {
        self.conn.execute(
            "INSERT INTO pending_intent (user_id, game, choice, expires_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id) DO UPDATE
               SET game = excluded.game,
                   choice = excluded.choice,
                   expires_at = excluded.expires_at",
            params![user_id, game, choice, expires_at],
        )?;
        Ok(())
    }

    /// Consume the user's pending intent. The row is deleted whether or
    /// not it had expired; an expired row is reported as absent.
    pub fn take_intent(
        &self,
        user_id: UserId,
        now: Timestamp,
    ) -> BotResult<Option<(String, Option<String>, Timestamp)>> {
        let row: Option<(String, Option<String>, Timestamp)> = self
            .conn
            .query_row(
                "SELECT game, choice, expires_at FROM pending_intent WHERE user_id = ?1",
                params![user_id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        if row.is_some() {
            self.conn.execute(
                "DELETE FROM pending_intent WHERE user_id = ?1",
                params![user_id],
            )?;
        }
        Ok(row.filter(|(_, _, expires_at)| *expires_at > now))
    }
}
