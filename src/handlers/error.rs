//! Transfer errors

use rust_decimal::Decimal;

use crate::domain::AccountId;
use crate::store::StoreError;

/// Errors returned by [`super::TransferHandler`]
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Non-positive or malformed amount, or sender == receiver
    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),

    #[error("Sender not found: {0}")]
    SenderNotFound(AccountId),

    #[error("Receiver not found: {0}")]
    ReceiverNotFound(AccountId),

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    /// Commit failed; no part of the transfer was applied
    #[error("Commit failed: {0}")]
    CommitFailed(#[source] sqlx::Error),

    #[error(transparent)]
    Store(StoreError),
}

impl TransferError {
    pub fn insufficient_funds(required: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }

    /// Check if this is a client error (caller's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransfer(_)
                | Self::SenderNotFound(_)
                | Self::ReceiverNotFound(_)
                | Self::InsufficientFunds { .. }
        )
    }
}

impl From<StoreError> for TransferError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Commit(e) => TransferError::CommitFailed(e),
            other => TransferError::Store(other),
        }
    }
}
