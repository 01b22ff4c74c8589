use super::BotStore;
use crate::{
    error::BotResult,
    gate::SponsorChannel,
    types::{SponsorId, UserId},
};
use rusqlite::params;

impl BotStore {
    // ── Sponsor channels ──────────────────────────────────────────

    pub fn insert_sponsor(
        &self,
        handle: &str,
        external_channel_id: &str,
        join_url: &str,
    ) -> BotResult<SponsorId> {
        self.conn.execute(
            "INSERT INTO sponsor_channel (handle, external_channel_id, join_url)
             VALUES (?1, ?2, ?3)",
            params![handle, external_channel_id, join_url],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn delete_sponsor(&self, sponsor_id: SponsorId) -> BotResult<()> {
        self.conn.execute(
            "DELETE FROM subscription_status WHERE sponsor_id = ?1",
            params![sponsor_id],
        )?;
        self.conn.execute(
            "DELETE FROM sponsor_channel WHERE sponsor_id = ?1",
            params![sponsor_id],
        )?;
        Ok(())
    }

    pub fn list_sponsors(&self) -> BotResult<Vec<SponsorChannel>> {
        let mut stmt = self.conn.prepare(
            "SELECT sponsor_id, handle, external_channel_id, join_url
             FROM sponsor_channel ORDER BY sponsor_id ASC",
        )?;
        let sponsors = stmt
            .query_map([], |row| {
                Ok(SponsorChannel {
                    sponsor_id: row.get(0)?,
                    handle: row.get(1)?,
                    external_channel_id: row.get(2)?,
                    join_url: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sponsors)
    }

    // ── Subscription status ───────────────────────────────────────

    pub fn upsert_subscription(
        &self,
        user_id: UserId,
        sponsor_id: SponsorId,
        subscribed: bool,
    ) -> BotResult<()> {
        self.conn.execute(
            "INSERT INTO subscription_status (user_id, sponsor_id, subscribed)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id, sponsor_id) DO UPDATE SET subscribed = excluded.subscribed",
            params![user_id, sponsor_id, subscribed as i32],
        )?;
        Ok(())
    }

    /// Every configured sponsor paired with this user's recorded status.
    /// Pairs never recorded default to unsubscribed.
    pub fn sponsor_statuses_for(
        &self,
        user_id: UserId,
    ) -> BotResult<Vec<(SponsorChannel, bool)>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.sponsor_id, s.handle, s.external_channel_id, s.join_url,
                    COALESCE(ss.subscribed, 0)
             FROM sponsor_channel s
             LEFT JOIN subscription_status ss
               ON ss.sponsor_id = s.sponsor_id AND ss.user_id = ?1
             ORDER BY s.sponsor_id ASC",
        )?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok((
                    SponsorChannel {
                        sponsor_id: row.get(0)?,
                        handle: row.get(1)?,
                        external_channel_id: row.get(2)?,
                        join_url: row.get(3)?,
                    },
                    row.get::<_, i32>(4)? != 0,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
