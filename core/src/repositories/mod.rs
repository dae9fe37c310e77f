//! Collaborator interfaces the engine depends on.
//!
//! Concrete implementations live in the infrastructure crate; the mocks here
//! back the unit tests.

pub mod cache;
pub mod user;

pub use cache::{CacheProducer, CacheStore};
pub use user::{Credentials, UserProvider};

#[cfg(test)]
pub use cache::MockCacheStore;
#[cfg(test)]
pub use user::MockUserProvider;
