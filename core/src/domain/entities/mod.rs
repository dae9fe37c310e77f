//! Domain entities

pub mod claims;
pub mod principal;


pub use claims::ClaimSet;
pub use principal::Principal;
