//! Domain module
//!
//! Core domain types for the account ledger.

pub mod account;
pub mod amount;

pub use account::{Account, AccountId, NewAccount};
pub use amount::{Amount, AmountError, Balance};
