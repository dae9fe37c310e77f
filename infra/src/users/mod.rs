//! User provider implementations

pub mod static_provider;


pub use static_provider::{StaticUser, StaticUserProvider};
