//! Repository error types.

use thiserror::Error;

/// Errors surfaced by the repository ports.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Query execution failed: {0}")]
    Query(String),

    /// A database uniqueness constraint rejected the write. The payload is
    /// the violated constraint name as reported by the driver, which lets
    /// callers tell a username collision from an email collision.
    #[error("Uniqueness violation: {0}")]
    Conflict(String),
}
