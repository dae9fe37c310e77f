//! Token module for claim encoding, issuance and validation
//!
//! - `codec` turns a claim set into a compact HMAC-SHA-512 token and back
//! - `issuer` builds the canonical claim set for a principal
//! - `validator` runs structural, signature, window, issuer/audience and
//!   revocation checks

mod codec;
mod config;
mod issuer;
mod validator;

#[cfg(test)]
mod tests;

pub use codec::{ClaimsCodec, SIGNING_ALGORITHM};
pub use config::{JwtSettings, MAX_TTL_SECONDS};
pub use issuer::TokenIssuer;
pub use validator::TokenValidator;
