//! Chronological transaction log with windowed lookback.
//!
//! Every submitted transaction lands here, approved and declined alike,
//! in arrival order. The frequency heuristics query the log through
//! [`History::most_recent`], which never filters by approval status;
//! approval semantics belong to the rules.

use crate::transaction::Transaction;
use chrono::{DateTime, Duration, Utc};

/// Append-only transaction log, ordered by arrival.
///
/// The windowed query assumes the log is time-monotonic (each entry's
/// timestamp >= all predecessors'). This is a precondition on the input
/// stream, not enforced here.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<Transaction>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        History {
            entries: Vec::new(),
        }
    }

    /// Appends a decided transaction.
    pub fn push(&mut self, transaction: Transaction) {
        self.entries.push(transaction);
    }

    /// Returns the number of recorded transactions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no transaction has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all recorded transactions in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    /// Returns up to `quantity` transactions inside the trailing 2-minute
    /// window ending at `reference`, newest first.
    ///
    /// Scans backward from the most recent entry, including a transaction
    /// iff `reference - time <= 2 minutes`, and stops at the first entry
    /// outside the window. Under the monotonic-timestamp precondition this
    /// is equivalent to filtering the whole log, without walking it.
    pub fn most_recent(&self, reference: DateTime<Utc>, quantity: usize) -> Vec<&Transaction> {
        let window = Duration::minutes(2);
        let mut recent = Vec::new();

        for transaction in self.entries.iter().rev() {
            if reference - transaction.time > window {
                break;
            }
            recent.push(transaction);
            if recent.len() == quantity {
                break;
            }
        }

        recent
    }
}
