//! Authentication module: user resolution and the engine facade
//!
//! This module wires the token services together:
//! - Resolution of a validated token to a principal, memoized in the cache
//! - Ordered post-resolution filters
//! - The `JwtAuth` facade used by request guards

mod filter;
mod resolver;
mod service;

#[cfg(test)]
mod tests;

pub use filter::{FilterChain, UserFilter};
pub use resolver::{user_cache_key, UserResolver};
pub use service::JwtAuth;
