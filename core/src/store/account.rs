use super::BotStore;
use crate::{
    account::Account,
    error::BotResult,
    types::{Timestamp, UserId},
};
use rusqlite::{params, OptionalExtension, Row};

fn account_from_row(row: &Row) -> rusqlite::Result<Account> {
    Ok(Account {
        user_id: row.get(0)?,
        display_name: row.get(1)?,
        balance: row.get(2)?,
        referrer_id: row.get(3)?,
        last_reward_claim: row.get(4)?,
        is_admin: row.get::<_, i32>(5)? != 0,
        signup_bonus_fired: row.get::<_, i32>(6)? != 0,
        created_at: row.get(7)?,
    })
}

const ACCOUNT_COLS: &str = "user_id, display_name, balance, referrer_id, \
                            last_reward_claim, is_admin, signup_bonus_fired, created_at";

impl BotStore {
    // ── Account ───────────────────────────────────────────────────

    pub fn insert_account(
        &self,
        user_id: UserId,
        display_name: &str,
        referrer_id: Option<UserId>,
        now: Timestamp,
    ) -> BotResult<()> {
        self.conn.execute(
            "INSERT INTO account (user_id, display_name, referrer_id, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id, display_name, referrer_id, now],
        )?;
        Ok(())
    }

    pub fn get_account(&self, user_id: UserId) -> BotResult<Option<Account>> {
        let account = self
            .conn
            .query_row(
                &format!("SELECT {ACCOUNT_COLS} FROM account WHERE user_id = ?1"),
                params![user_id],
                account_from_row,
            )
            .optional()?;
        Ok(account)
    }

    pub fn account_exists(&self, user_id: UserId) -> BotResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM account WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn set_last_reward_claim(&self, user_id: UserId, at: Timestamp) -> BotResult<()> {
        self.conn.execute(
            "UPDATE account SET last_reward_claim = ?1 WHERE user_id = ?2",
            params![at, user_id],
        )?;
        Ok(())
    }

    pub fn set_admin_flag(&self, user_id: UserId, is_admin: bool) -> BotResult<()> {
        self.conn.execute(
            "UPDATE account SET is_admin = ?1 WHERE user_id = ?2",
            params![is_admin as i32, user_id],
        )?;
        Ok(())
    }

    pub fn mark_signup_bonus_fired(&self, user_id: UserId) -> BotResult<()> {
        self.conn.execute(
            "UPDATE account SET signup_bonus_fired = 1 WHERE user_id = ?1",
            params![user_id],
        )?;
        Ok(())
    }

    // ── Referral back-references ──────────────────────────────────
    //
    // The graph stores child→parent only; children are always derived
    // by query, never walked from the parent side.

    pub fn referred_user_ids(&self, referrer_id: UserId) -> BotResult<Vec<UserId>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id FROM account WHERE referrer_id = ?1 ORDER BY user_id ASC",
        )?;
        let ids = stmt
            .query_map(params![referrer_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    pub fn accounts_by_balance_desc(&self) -> BotResult<Vec<Account>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ACCOUNT_COLS} FROM account ORDER BY balance DESC, user_id ASC"
        ))?;
        let accounts = stmt
            .query_map([], account_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(accounts)
    }
}
