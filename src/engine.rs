//! Core authorization engine.
//!
//! Processes events strictly in arrival order and maintains the account,
//! the transaction history, and the audit log. Each event fully resolves
//! (rules, decision, state mutation, audit append) before the next one is
//! considered; the windowed rules depend on seeing history as it stood
//! before the current transaction is appended.

use crate::account::Account;
use crate::audit::{AccountSnapshot, AuditRecord};
use crate::error::{AuthorizerError, Result};
use crate::history::History;
use crate::record::InputRecord;
use crate::rules::{Violation, RULES};
use crate::transaction::Transaction;
use log::{debug, warn};
use std::io::{BufRead, Write};

/// The transaction authorizer.
///
/// Exclusive owner of the account, the history, and the audit log;
/// nothing outside this struct ever mutates them. Rule violations are
/// recorded as audit data, never surfaced as errors.
pub struct Authorizer {
    /// The single account, `None` until the first creation event.
    account: Option<Account>,

    /// Every submitted transaction, approved and declined alike.
    history: History,

    /// One record per processed event, in processing order.
    audit_log: Vec<AuditRecord>,
}

impl Authorizer {
    /// Creates a new authorizer with no account and empty history.
    pub fn new() -> Self {
        Authorizer {
            account: None,
            history: History::new(),
            audit_log: Vec::new(),
        }
    }

    /// Processes line-delimited JSON records from a reader.
    ///
    /// Records are consumed strictly in file order, which is assumed to be
    /// the true chronological order of events. A record that fails to
    /// parse aborts the whole run: the engine has no defined behavior for
    /// input it cannot understand, so it must not guess.
    pub fn process<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for (idx, line) in reader.lines().enumerate() {
            let line_num = idx + 1;
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            let record: InputRecord = serde_json::from_str(&line).map_err(|source| {
                AuthorizerError::MalformedRecord {
                    line: line_num,
                    source,
                }
            })?;

            match record {
                InputRecord::Account(account) => {
                    self.create_account(account.active_card, account.available_limit);
                }
                InputRecord::Transaction(tx) => {
                    self.authorize(Transaction::new(tx.merchant, tx.amount, tx.time));
                }
            }
        }

        Ok(())
    }

    /// Handles an account-creation event.
    ///
    /// The first creation event constructs the account. Any further
    /// creation event is rejected with `account-already-initialized` and
    /// leaves the existing account untouched.
    pub fn create_account(&mut self, active_card: bool, available_limit: i64) {
        if self.account.is_none() {
            self.account = Some(Account::new(active_card, available_limit));
            debug!(
                "Account created: active_card={}, available_limit={}",
                active_card, available_limit
            );
            self.record_operation(Vec::new());
        } else {
            warn!("Duplicate account creation rejected");
            self.record_operation(vec![Violation::AccountAlreadyInitialized]);
        }
    }

    /// Authorizes a single transaction.
    ///
    /// Runs every rule against pre-append state, debits the account when
    /// no violation was found, records an audit snapshot, and appends the
    /// transaction to history whether it was approved or declined.
    /// Declined attempts still occupy window slots in future scans.
    pub fn authorize(&mut self, mut transaction: Transaction) {
        let violations = self.analyze(&transaction);

        if violations.is_empty() {
            // Safety: an absent account would have raised account-not-initialized
            let account = self.account.as_mut().expect("account exists");
            account.debit(transaction.amount);
            transaction.set_approval(true);
            debug!(
                "Approved \"{}\" for {}, remaining limit {}",
                transaction.merchant, transaction.amount, account.available_limit
            );
        } else {
            transaction.set_approval(false);
            debug!(
                "Declined \"{}\" for {}: {:?}",
                transaction.merchant, transaction.amount, violations
            );
        }

        self.record_operation(violations);
        self.history.push(transaction);
    }

    /// Runs the full rule set against the incoming transaction.
    ///
    /// Every rule is evaluated; violations are collected in the fixed
    /// evaluation order, which is observable in the audit output.
    fn analyze(&self, transaction: &Transaction) -> Vec<Violation> {
        let mut violations = Vec::new();

        for rule in &RULES {
            if (rule.check)(self.account.as_ref(), &self.history, transaction) {
                violations.push(rule.violation);
            }
        }

        violations
    }

    /// Appends an audit record with the current account state.
    fn record_operation(&mut self, violations: Vec<Violation>) {
        self.audit_log.push(AuditRecord {
            account: self.account.as_ref().map(AccountSnapshot::from),
            violations,
        });
    }

    /// Writes the audit log as line-delimited JSON, one record per
    /// processed event, in processing order.
    pub fn write_output<W: Write>(&self, mut writer: W) -> Result<()> {
        for record in &self.audit_log {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Returns the audit log accumulated so far.
    pub fn audit_log(&self) -> &[AuditRecord] {
        &self.audit_log
    }

    /// Returns a reference to the account (for testing).
    #[cfg(test)]
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Returns a reference to the history (for testing).
    #[cfg(test)]
    pub fn history(&self) -> &History {
        &self.history
    }
}

impl Default for Authorizer {
    fn default() -> Self {
        Self::new()
    }
}
