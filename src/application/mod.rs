//! Application layer containing the settlement use cases.
//!
//! Each use case borrows the store ports it needs and runs one request to
//! completion. `SettlementEngine` owns the stores and is the entry point used
//! by the outer interfaces.

pub mod config;
pub mod create_payment;
pub mod engine;
pub mod get_cashout;
pub mod ledger;
pub mod process_payment;

#[cfg(test)]
pub(crate) mod testing;
