//! Debt settlement for orders paid through one or more payment attempts.
//!
//! - [`domain`]: orders, payments, derived charges and the store ports.
//! - [`application`]: the create/process/cashout use cases and the engine.
//! - [`infrastructure`]: in-memory and RocksDB stores.
//! - [`interfaces`]: CSV input and report output.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod observability;
