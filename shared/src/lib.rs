//! Shared configuration and response types for the TokenGuard workspace
//!
//! This crate provides the pieces every other crate agrees on:
//! - Configuration types (JWT, cache, server, logging, environment)
//! - The error response body returned by the HTTP layer

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheBackend, CacheConfig, Environment, JwtConfig, LoggingConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
