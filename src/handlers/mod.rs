//! Command Handlers module
//!
//! Handlers that orchestrate ledger operations against the account store.

mod commands;
mod error;
mod transfer_handler;


pub use commands::*;
pub use error::TransferError;
pub use transfer_handler::TransferHandler;
