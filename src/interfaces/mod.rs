//! Outer interfaces translating external formats into engine calls.

pub mod csv;
