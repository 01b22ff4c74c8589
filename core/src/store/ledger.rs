use super::BotStore;
use crate::{
    error::{BotError, BotResult},
    ledger::{Transaction, TxKind},
    types::{Amount, Timestamp, UserId},
};
use rusqlite::{params, OptionalExtension};

impl BotStore {
    // ── Ledger ────────────────────────────────────────────────────

    /// Apply one signed balance delta and append the matching log entry,
    /// in a single SQLite transaction. This is the only write path for
    /// balances: a read-modify-write here can never interleave with
    /// another one on the same connection.
    pub fn apply_ledger_entry(
        &self,
        user_id: UserId,
        delta: Amount,
        kind: TxKind,
        memo: &str,
        now: Timestamp,
    ) -> BotResult<Transaction> {
        let tx = self.conn.unchecked_transaction()?;

        let exists: Option<i64> = tx
            .query_row(
                "SELECT 1 FROM account WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(BotError::UnknownAccount { user_id });
        }

        tx.execute(
            "UPDATE account SET balance = balance + ?1 WHERE user_id = ?2",
            params![delta, user_id],
        )?;
        tx.execute(
            "INSERT INTO ledger_entry (user_id, delta, kind, memo, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_id, delta, kind.as_str(), memo, now],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Transaction {
            id,
            user_id,
            delta,
            kind,
            memo: memo.to_string(),
            created_at: now,
        })
    }

    pub fn balance(&self, user_id: UserId) -> BotResult<Option<Amount>> {
        let balance = self
            .conn
            .query_row(
                "SELECT balance FROM account WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(balance)
    }

    pub fn ledger_entries_for(&self, user_id: UserId) -> BotResult<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, delta, kind, memo, created_at
             FROM ledger_entry WHERE user_id = ?1
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![user_id], |row| {
                let kind_str: String = row.get(3)?;
                let kind = TxKind::parse(&kind_str).ok_or_else(|| {
                    rusqlite::Error::FromSqlConversionFailure(
                        3,
                        rusqlite::types::Type::Text,
                        format!("unknown tx kind: {kind_str}").into(),
                    )
                })?;
                Ok(Transaction {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    delta: row.get(2)?,
                    kind,
                    memo: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn ledger_sum_for(&self, user_id: UserId) -> BotResult<Amount> {
        let sum: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(delta), 0) FROM ledger_entry WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(sum)
    }
}
