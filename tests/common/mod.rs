//! Common test utilities

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use account_ledger::{db, AccountId, AccountStore, Balance, NewAccount};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;

static NEXT_EMAIL: AtomicU64 = AtomicU64::new(0);

/// Connect to the test database and make sure the schema exists.
///
/// Tests never truncate: each one seeds accounts with unique emails and only
/// looks at its own rows.
pub async fn setup_test_db() -> AccountStore {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    db::ensure_schema(&pool)
        .await
        .expect("Failed to create schema");

    AccountStore::new(pool)
}

/// Email no other test (or earlier run) has used
pub fn unique_email(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let n = NEXT_EMAIL.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}-{}-{}@test.local", tag, std::process::id(), nanos, n)
}

/// Insert an account with the given balance and return its id
pub async fn seed_account(store: &AccountStore, name: &str, balance: Decimal) -> AccountId {
    let account = NewAccount::new(name, unique_email(name), Balance::new(balance).unwrap());
    store.insert(&account).await.expect("Failed to seed account")
}

/// Current balance of an account
pub async fn balance_of(store: &AccountStore, id: AccountId) -> Decimal {
    store.get(id).await.expect("Account should exist").balance
}
