//! Shared primitive types used across the entire core.

/// A chat-platform user identifier. Stable for the lifetime of a user.
pub type UserId = i64;

/// A sponsor channel identifier (store-assigned).
pub type SponsorId = i64;

/// A withdrawal request identifier (store-assigned, monotonic).
pub type RequestId = i64;

/// A ledger entry identifier (store-assigned, monotonic).
pub type EntryId = i64;

/// A currency amount. Balances are non-negative by convention;
/// ledger deltas are signed.
pub type Amount = f64;

/// Unix timestamp in seconds.
pub type Timestamp = i64;
