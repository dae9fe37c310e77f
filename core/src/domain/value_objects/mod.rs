//! Value objects produced by the token services

pub mod validation_result;

pub use validation_result::{InvalidReason, ValidationResult};
