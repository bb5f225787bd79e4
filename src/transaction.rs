//! Card transaction model.

use chrono::{DateTime, Utc};

/// A single card transaction.
///
/// Immutable once decided, except for the approval flag which is set
/// exactly once before the transaction is appended to history.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Merchant name, matched verbatim by the doubled-transaction rule.
    pub merchant: String,

    /// Amount in minor currency units. Expected positive, not enforced.
    pub amount: i64,

    /// Event timestamp (UTC, sub-second precision).
    pub time: DateTime<Utc>,

    /// Decision outcome. Meaningful only after the authorizer has ruled
    /// on the transaction.
    pub approved: bool,
}

impl Transaction {
    /// Creates an undecided transaction.
    pub fn new(merchant: String, amount: i64, time: DateTime<Utc>) -> Self {
        Transaction {
            merchant,
            amount,
            time,
            approved: false,
        }
    }

    /// Sets the approval flag.
    ///
    /// Callers must not call this twice with conflicting values.
    pub fn set_approval(&mut self, approved: bool) {
        self.approved = approved;
    }

    /// Returns `true` if both transactions name the same merchant and
    /// carry the same amount.
    pub fn same_purchase(&self, other: &Transaction) -> bool {
        self.merchant == other.merchant && self.amount == other.amount
    }
}
