use super::BotStore;
use crate::{
    error::BotResult,
    types::{Amount, RequestId, Timestamp, UserId},
    withdrawal::{WithdrawalRequest, WithdrawalStatus},
};
use rusqlite::{params, OptionalExtension, Row};

fn request_from_row(row: &Row) -> rusqlite::Result<WithdrawalRequest> {
    let status_str: String = row.get(3)?;
    let status = WithdrawalStatus::parse(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            format!("unknown withdrawal status: {status_str}").into(),
        )
    })?;
    Ok(WithdrawalRequest {
        id: row.get(0)?,
        user_id: row.get(1)?,
        amount: row.get(2)?,
        status,
        reference: row.get(4)?,
        created_at: row.get(5)?,
    })
}

impl BotStore {
    // ── Withdrawal requests ───────────────────────────────────────

    pub fn insert_withdrawal_request(
        &self,
        user_id: UserId,
        amount: Amount,
        reference: &str,
        now: Timestamp,
    ) -> BotResult<RequestId> {
        self.conn.execute(
            "INSERT INTO withdrawal_request (user_id, amount, status, reference, created_at)
             VALUES (?1, ?2, 'pending', ?3, ?4)",
            params![user_id, amount, reference, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_withdrawal_request(
        &self,
        request_id: RequestId,
    ) -> BotResult<Option<WithdrawalRequest>> {
        let request = self
            .conn
            .query_row(
                "SELECT id, user_id, amount, status, reference, created_at
                 FROM withdrawal_request WHERE id = ?1",
                params![request_id],
                request_from_row,
            )
            .optional()?;
        Ok(request)
    }

    /// Transition a request out of `pending`. Returns false if the
    /// request was not pending (or does not exist) — the status guard
    /// lives in the UPDATE itself so a request can never be processed
    /// twice.
    pub fn transition_withdrawal(
        &self,
        request_id: RequestId,
        to: WithdrawalStatus,
    ) -> BotResult<bool> {
        let changed = self.conn.execute(
            "UPDATE withdrawal_request SET status = ?1
             WHERE id = ?2 AND status = 'pending'",
            params![to.as_str(), request_id],
        )?;
        Ok(changed == 1)
    }

    pub fn pending_withdrawals(&self) -> BotResult<Vec<WithdrawalRequest>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, amount, status, reference, created_at
             FROM withdrawal_request WHERE status = 'pending'
             ORDER BY id ASC",
        )?;
        let requests = stmt
            .query_map([], request_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(requests)
    }
}
