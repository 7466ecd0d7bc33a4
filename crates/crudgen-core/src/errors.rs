//! Cross-cutting error types for crudgen.
//!
//! Stage-specific errors (`SchemaError`, `NormalizeError`, `PersistenceError`)
//! live in their own crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by core value constructors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A stored digest string is not of the form `sha256:<64 hex chars>`.
    #[error("Invalid content hash '{value}': expected sha256:<64 lowercase hex chars>")]
    InvalidHash { value: String },
}
