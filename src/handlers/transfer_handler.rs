//! Transfer Handler
//!
//! Moves money between two accounts as a single transaction.

use sqlx::{Postgres, Transaction};

use crate::store::AccountStore;

use super::{TransferCommand, TransferError, TransferRequest, TransferResult};

/// Handler for account-to-account transfers.
///
/// Transfers are not idempotent: executing the same command twice moves the
/// amount twice.
#[derive(Debug, Clone)]
pub struct TransferHandler {
    store: AccountStore,
}

impl TransferHandler {
    pub fn new(store: AccountStore) -> Self {
        Self { store }
    }

    /// Execute the transfer command
    pub async fn execute(&self, command: TransferCommand) -> Result<TransferResult, TransferError> {
        // Rejected before a transaction is opened
        let request = command.validate()?;

        let result: Result<TransferResult, TransferError> = self
            .store
            .with_transaction(move |tx| Box::pin(async move { Self::apply(tx, request).await }))
            .await;

        match &result {
            Ok(done) => tracing::info!(
                from_id = done.from_id,
                to_id = done.to_id,
                amount = %done.amount,
                "Transfer completed"
            ),
            Err(e) if e.is_client_error() => tracing::warn!(
                from_id = request.from_id,
                to_id = request.to_id,
                amount = %request.amount,
                error = %e,
                "Transfer rejected"
            ),
            Err(e) => tracing::error!(
                from_id = request.from_id,
                to_id = request.to_id,
                error = %e,
                "Transfer failed"
            ),
        }

        result
    }

    /// Transfer body. Runs inside the transaction; any error rolls it back.
    async fn apply(
        tx: &mut Transaction<'_, Postgres>,
        request: TransferRequest,
    ) -> Result<TransferResult, TransferError> {
        let (from, to) = AccountStore::lock_pair(tx, request.from_id, request.to_id).await?;

        let from = from.ok_or(TransferError::SenderNotFound(request.from_id))?;
        let to = to.ok_or(TransferError::ReceiverNotFound(request.to_id))?;

        let amount = request.amount;
        if from.balance < amount.value() {
            return Err(TransferError::insufficient_funds(
                amount.value(),
                from.balance,
            ));
        }

        let from_balance = AccountStore::debit(tx, from.id, &amount)
            .await?
            .ok_or_else(|| TransferError::insufficient_funds(amount.value(), from.balance))?;

        let to_balance = AccountStore::credit(tx, to.id, &amount)
            .await?
            .ok_or(TransferError::ReceiverNotFound(to.id))?;

        Ok(TransferResult {
            from_id: from.id,
            to_id: to.id,
            amount: amount.value(),
            from_balance,
            to_balance,
        })
    }
}
