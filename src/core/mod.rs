//! Core foundation: geometry types and math primitives.

pub mod math;
pub mod types;
