//! User lookup interface used to turn a validated subject into a principal.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::Principal;
use crate::errors::DomainResult;

/// Login credentials as submitted by the client (e.g. `email` / `password`)
pub type Credentials = HashMap<String, String>;

/// User provider collaborator
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use tg_core::domain::Principal;
/// use tg_core::errors::DomainResult;
/// use tg_core::repositories::{Credentials, UserProvider};
///
/// struct Admin;
///
/// impl Principal for Admin {
///     fn auth_identifier(&self) -> String {
///         "admin".to_string()
///     }
/// }
///
/// struct SingleAdmin;
///
/// #[async_trait]
/// impl UserProvider for SingleAdmin {
///     type User = Admin;
///
///     async fn retrieve_by_id(&self, id: &str) -> DomainResult<Option<Admin>> {
///         Ok((id == "admin").then_some(Admin))
///     }
///
///     async fn retrieve_by_credentials(&self, _c: &Credentials) -> DomainResult<Option<Admin>> {
///         Ok(Some(Admin))
///     }
///
///     async fn validate_credentials(&self, _u: &Admin, c: &Credentials) -> DomainResult<bool> {
///         Ok(c.get("password").map(String::as_str) == Some("secret"))
///     }
/// }
/// ```
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Concrete principal type this provider returns
    type User: Principal;

    /// Find a user by the identifier stored in the `sub` claim
    ///
    /// # Returns
    /// * `Ok(Some(user))` - User found
    /// * `Ok(None)` - No such user
    /// * `Err(DomainError)` - Lookup failed
    async fn retrieve_by_id(&self, id: &str) -> DomainResult<Option<Self::User>>;

    /// Find a user by login credentials, without checking the secret part
    async fn retrieve_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> DomainResult<Option<Self::User>>;

    /// Check the secret part of `credentials` against `user`
    async fn validate_credentials(
        &self,
        user: &Self::User,
        credentials: &Credentials,
    ) -> DomainResult<bool>;
}
