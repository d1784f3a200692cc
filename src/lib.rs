//! account_ledger Library
//!
//! User lookup API behind an API-key gate, and a PostgreSQL account ledger
//! with atomic transfers. Both binaries build on these modules.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod store;
pub mod telemetry;
pub mod users;

mod error;

pub use config::{ConfigError, DatabaseConfig, ServerConfig};
pub use domain::{Account, AccountId, Amount, AmountError, Balance, NewAccount};
pub use error::{AppError, AppResult, ErrorResponse};
pub use handlers::{TransferCommand, TransferError, TransferHandler, TransferResult};
pub use store::{AccountStore, StoreError};
