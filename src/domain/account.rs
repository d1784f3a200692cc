//! Account entity
//!
//! A row of the `accounts` relation and the input used to create one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Balance;

/// Identifier assigned by the store on insert
pub type AccountId = i64;

/// Persisted account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub balance: Decimal,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID={} | Name={} | Email={} | Balance={:.2}",
            self.id, self.name, self.email, self.balance
        )
    }
}

/// Account to be inserted; the store assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub balance: Balance,
}

impl NewAccount {
    pub fn new(name: impl Into<String>, email: impl Into<String>, balance: Balance) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            balance,
        }
    }
}
