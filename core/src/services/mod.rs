//! Token lifecycle services.

pub mod auth;
pub mod revocation;
pub mod token;

// Re-export commonly used types
pub use auth::{FilterChain, JwtAuth, UserFilter, UserResolver};
pub use revocation::RevocationLedger;
pub use token::{ClaimsCodec, JwtSettings, TokenIssuer, TokenValidator};
