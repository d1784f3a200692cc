//! Account Store Errors
//!
//! Error types for account persistence.

use crate::domain::AccountId;

/// Errors that can occur in the account store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row with this id
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// Unique constraint on `email` rejected the insert
    #[error("Account with email {0} already exists")]
    DuplicateEmail(String),

    /// Any other constraint violation (e.g. negative balance check)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Commit of a transaction failed; nothing was applied
    #[error("Commit failed: {0}")]
    Commit(#[source] sqlx::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Classify an error raised by an `INSERT INTO accounts`
    pub(crate) fn from_insert(err: sqlx::Error, email: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateEmail(email.to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                StoreError::Constraint(db_err.message().to_string())
            }
            _ => StoreError::Database(err),
        }
    }

    /// Check if this error means the row does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
