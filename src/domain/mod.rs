//! Settlement entities and the store ports the application layer depends on.

pub mod charge;
pub mod money;
pub mod order;
pub mod payment;
pub mod ports;
