//! Command definitions
//!
//! Commands represent intentions to change the ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Amount};

use super::TransferError;

// =========================================================================
// TransferCommand
// =========================================================================

/// Command to move money between two accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCommand {
    /// Account debited
    pub from_id: AccountId,
    /// Account credited
    pub to_id: AccountId,
    /// Amount to transfer (as string for precise decimal)
    pub amount: String,
}

impl TransferCommand {
    pub fn new(from_id: AccountId, to_id: AccountId, amount: impl Into<String>) -> Self {
        Self {
            from_id,
            to_id,
            amount: amount.into(),
        }
    }

    /// Check the command without touching the store.
    ///
    /// Rejects a non-positive or malformed amount and a transfer from an
    /// account to itself.
    pub fn validate(&self) -> Result<TransferRequest, TransferError> {
        if self.from_id == self.to_id {
            return Err(TransferError::InvalidTransfer(
                "Cannot transfer to the same account".to_string(),
            ));
        }

        let amount: Amount = self
            .amount
            .parse()
            .map_err(|e| TransferError::InvalidTransfer(format!("Invalid amount: {}", e)))?;

        Ok(TransferRequest {
            from_id: self.from_id,
            to_id: self.to_id,
            amount,
        })
    }
}

/// A validated transfer. Only exists for the duration of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    pub from_id: AccountId,
    pub to_id: AccountId,
    pub amount: Amount,
}

/// Result of a successful transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub from_id: AccountId,
    pub to_id: AccountId,
    pub amount: Decimal,
    /// Sender balance after the transfer
    pub from_balance: Decimal,
    /// Receiver balance after the transfer
    pub to_balance: Decimal,
}
