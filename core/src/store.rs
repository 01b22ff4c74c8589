//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Domain modules call store methods — they never execute SQL directly.

use crate::error::BotResult;
mod account;
mod intent;
mod ledger;
mod sponsor;
mod withdrawal;
use rusqlite::Connection;

pub struct BotStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl BotStore {
    pub fn open(path: &str) -> BotResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> BotResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases, this returns a new in-memory database (isolated).
    /// For file-based databases, this opens the same file.
    pub fn reopen(&self) -> BotResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> BotResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_accounts.sql"))?;
        self.conn
            .execute_batch(include_str!("../../migrations/002_ledger.sql"))?;
        self.conn
            .execute_batch(include_str!("../../migrations/003_sponsors.sql"))?;
        self.conn
            .execute_batch(include_str!("../../migrations/004_withdrawals.sql"))?;
        self.conn
            .execute_batch(include_str!("../../migrations/005_intents.sql"))?;
        Ok(())
    }
}
