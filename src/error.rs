//! Error types for the authorizer.
//!
//! Rule violations are not errors: they are expected outcomes recorded in
//! the audit log. The variants here are adapter-level failures that abort
//! the whole run.

use thiserror::Error;

/// Result type alias for authorizer operations
pub type Result<T> = std::result::Result<T, AuthorizerError>;

/// Errors that can occur while driving the authorizer.
#[derive(Error, Debug)]
pub enum AuthorizerError {
    /// Failed to open, read, or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input record that could not be parsed; the run is rejected
    /// rather than guessing at its meaning
    #[error("Malformed record at line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Audit log serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: authorizer <input.ndjson> [output.ndjson]")]
    MissingArgument,
}
