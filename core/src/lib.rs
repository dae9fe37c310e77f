//! # TokenGuard Core
//!
//! Token lifecycle engine for stateless bearer authentication.
//! This crate contains the claim set and principal abstractions, the error
//! taxonomy, the collaborator interfaces (cache, user provider), and the
//! services that issue, validate, revoke and resolve tokens.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
