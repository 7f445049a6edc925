//! Step definitions for performance time-basis scenarios.

pub mod world;

mod given;
mod then;
mod when;
