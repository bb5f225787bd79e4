//! Audit log records, the system's sole output artifact.

use crate::account::Account;
use crate::rules::Violation;
use serde::Serialize;

/// Account state captured after a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSnapshot {
    /// Whether the card can transact.
    #[serde(rename = "active-card")]
    pub active_card: bool,

    /// Remaining spending capacity, in minor currency units.
    #[serde(rename = "available-limit")]
    pub available_limit: i64,
}

impl From<&Account> for AccountSnapshot {
    fn from(account: &Account) -> Self {
        AccountSnapshot {
            active_card: account.active_card,
            available_limit: account.available_limit,
        }
    }
}

/// One audit record per processed input event.
///
/// Serializes to the output line shape
/// `{"account": {...}, "violations": [...]}`. The account is `null` for
/// events processed before any account exists. An empty violation list
/// means the event succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    /// Post-decision account state, if an account exists.
    pub account: Option<AccountSnapshot>,

    /// Violations detected for this event, in rule-evaluation order.
    pub violations: Vec<Violation>,
}
