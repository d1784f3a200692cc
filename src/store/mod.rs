//! Account Store module
//!
//! Persistence layer for accounts.

mod error;
mod repository;

pub use error::StoreError;
pub use repository::{AccountStore, TxFuture};
