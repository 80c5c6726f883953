//! CSV readers for orders and operations, and the cashout report writer.

pub mod cashout_writer;
pub mod operation_reader;
pub mod order_reader;
