//! Adapter implementations of the pipeline ports.

pub mod memory;
pub mod postgres;
