//! Input record models for line-delimited JSON parsing.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A single input record, either an account-creation event or a
/// transaction event.
///
/// Each input line is a JSON object carrying exactly one key, `"account"`
/// or `"transaction"`, which maps directly onto serde's externally tagged
/// enum representation. Any other shape fails to deserialize.
#[derive(Debug, Deserialize)]
pub enum InputRecord {
    /// `{"account": {"active-card": ..., "available-limit": ...}}`
    #[serde(rename = "account")]
    Account(AccountRecord),

    /// `{"transaction": {"merchant": ..., "amount": ..., "time": ...}}`
    #[serde(rename = "transaction")]
    Transaction(TransactionRecord),
}

/// Payload of an account-creation event.
#[derive(Debug, Deserialize)]
pub struct AccountRecord {
    /// Whether the card can transact.
    #[serde(rename = "active-card")]
    pub active_card: bool,

    /// Initial spending capacity, in minor currency units.
    #[serde(rename = "available-limit")]
    pub available_limit: i64,
}

/// Payload of a transaction event.
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    /// Merchant name.
    pub merchant: String,

    /// Amount in minor currency units.
    pub amount: i64,

    /// ISO-8601 UTC timestamp with fractional seconds,
    /// e.g. `2019-02-13T10:00:00.000Z`.
    pub time: DateTime<Utc>,
}
