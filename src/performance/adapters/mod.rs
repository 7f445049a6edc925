//! Adapter implementations of the performance ports.

pub mod memory;
pub mod postgres;
