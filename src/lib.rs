//! # Card Authorizer
//!
//! A streaming authorizer that processes an account-creation event and a
//! sequence of card transactions, producing an append-only audit log of
//! account state and rule violations after each event.
//!
//! ## Design Principles
//!
//! - **Integer amounts**: minor currency units as `i64`, no floating point
//! - **Streaming processing**: line-delimited JSON, one decision per record
//! - **Append-only history**: declined attempts still count toward the
//!   windowed fraud heuristics
//! - **Deterministic output**: one audit record per input event, in
//!   processing order, with violations listed in rule-evaluation order
//!
//! ## Example
//!
//! ```no_run
//! use authorizer::Authorizer;
//! use std::io::Cursor;
//!
//! let input = r#"{"account": {"active-card": true, "available-limit": 100}}"#;
//! let mut authorizer = Authorizer::new();
//! authorizer.process(Cursor::new(input)).unwrap();
//! authorizer.write_output(std::io::stdout()).unwrap();
//! ```

pub mod account;
pub mod audit;
pub mod engine;
pub mod error;
pub mod history;
pub mod record;
pub mod rules;
pub mod transaction;

pub use account::Account;
pub use audit::{AccountSnapshot, AuditRecord};
pub use engine::Authorizer;
pub use error::{AuthorizerError, Result};
pub use history::History;
pub use record::{AccountRecord, InputRecord, TransactionRecord};
pub use rules::{Rule, Violation, RULES};
pub use transaction::Transaction;
