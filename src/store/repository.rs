//! Account Store Repository
//!
//! PostgreSQL-backed persistence for the `accounts` relation.
//! Provides point lookups, inserts, and a transaction scope for
//! multi-row balance mutation.

use std::future::Future;
use std::pin::Pin;

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{Account, AccountId, Amount, NewAccount};

use super::StoreError;

/// Future returned by a transaction body. Borrows the transaction for `'c`.
pub type TxFuture<'c, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'c>>;

/// Handle to the account store. Cheap to clone (wraps the pool).
#[derive(Debug, Clone)]
pub struct AccountStore {
    pool: PgPool,
}

impl AccountStore {
    /// Create a new AccountStore with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new account and return its assigned id
    pub async fn insert(&self, account: &NewAccount) -> Result<AccountId, StoreError> {
        let id: AccountId = sqlx::query_scalar(
            r#"
            INSERT INTO accounts (name, email, balance)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&account.name)
        .bind(&account.email)
        .bind(account.balance.value())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_insert(e, &account.email))?;

        tracing::debug!(account_id = id, email = %account.email, "Account inserted");

        Ok(id)
    }

    /// Get an account by id
    pub async fn get(&self, id: AccountId) -> Result<Account, StoreError> {
        let account: Option<Account> = sqlx::query_as(
            r#"
            SELECT id, name, email, balance
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        account.ok_or(StoreError::NotFound(id))
    }

    /// List all accounts in insertion order
    pub async fn list_all(&self) -> Result<Vec<Account>, StoreError> {
        let accounts = sqlx::query_as(
            r#"
            SELECT id, name, email, balance
            FROM accounts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    // =========================================================================
    // Transaction scope
    // =========================================================================

    /// Run `body` inside a transaction.
    ///
    /// The transaction is committed only when `body` returns `Ok`. When `body`
    /// fails it is rolled back explicitly before the error is returned. A
    /// commit failure is reported as [`StoreError::Commit`]; Postgres discards
    /// the transaction in that case.
    pub async fn with_transaction<T, E, F>(&self, body: F) -> Result<T, E>
    where
        F: for<'c> FnOnce(&'c mut Transaction<'static, Postgres>) -> TxFuture<'c, T, E>,
        E: From<StoreError>,
    {
        let mut tx = self.pool.begin().await.map_err(StoreError::from)?;

        match body(&mut tx).await {
            Ok(value) => {
                tx.commit().await.map_err(StoreError::Commit)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    // Dropping the connection aborts the transaction anyway.
                    tracing::error!(error = %rollback_err, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Read two accounts and lock their rows until the transaction ends.
    ///
    /// Rows are locked in ascending id order, so two transfers touching the
    /// same pair in opposite directions queue up instead of deadlocking.
    pub async fn lock_pair(
        tx: &mut Transaction<'_, Postgres>,
        first: AccountId,
        second: AccountId,
    ) -> Result<(Option<Account>, Option<Account>), StoreError> {
        let ids = [first, second];
        let rows: Vec<Account> = sqlx::query_as(
            r#"
            SELECT id, name, email, balance
            FROM accounts
            WHERE id = ANY($1)
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(&ids[..])
        .fetch_all(&mut **tx)
        .await?;

        let find = |id: AccountId| rows.iter().find(|a| a.id == id).cloned();

        Ok((find(first), find(second)))
    }

    /// Conditionally subtract `amount` from an account.
    ///
    /// Returns the new balance, or `None` when the row is missing or its
    /// balance does not cover the amount.
    pub async fn debit(
        tx: &mut Transaction<'_, Postgres>,
        id: AccountId,
        amount: &Amount,
    ) -> Result<Option<Decimal>, StoreError> {
        let balance = sqlx::query_scalar(
            r#"
            UPDATE accounts
            SET balance = balance - $1
            WHERE id = $2 AND balance >= $1
            RETURNING balance
            "#,
        )
        .bind(amount.value())
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(balance)
    }

    /// Add `amount` to an account. Returns the new balance, or `None` when
    /// the row is missing.
    pub async fn credit(
        tx: &mut Transaction<'_, Postgres>,
        id: AccountId,
        amount: &Amount,
    ) -> Result<Option<Decimal>, StoreError> {
        let balance = sqlx::query_scalar(
            r#"
            UPDATE accounts
            SET balance = balance + $1
            WHERE id = $2
            RETURNING balance
            "#,
        )
        .bind(amount.value())
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(balance)
    }
}
