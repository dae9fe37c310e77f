//! Fixed, in-memory user directory with bcrypt password hashes
//!
//! Users are looked up by id for token resolution and by email (or id) for
//! credential checks.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tg_core::domain::Principal;
use tg_core::errors::{DomainError, DomainResult};
use tg_core::repositories::{Credentials, UserProvider};
use tracing::{debug, info};

use crate::InfrastructureError;

/// User record served by [`StaticUserProvider`]
///
/// The password hash never leaves the provider: it is skipped when the user
/// is serialized into the user cache or an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticUser {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing)]
    pub password_hash: String,
}

impl StaticUser {
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            password_hash: String::new(),
        }
    }

    /// Hashes `password` with the given bcrypt cost
    pub fn with_password(mut self, password: &str, cost: u32) -> Result<Self, InfrastructureError> {
        self.password_hash = bcrypt::hash(password, cost)?;
        Ok(self)
    }

    /// Uses an existing bcrypt hash
    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = hash.into();
        self
    }
}

impl Principal for StaticUser {
    fn auth_identifier(&self) -> String {
        self.id.clone()
    }
}

/// `UserProvider` over a fixed set of users
#[derive(Debug, Clone, Default)]
pub struct StaticUserProvider {
    users: HashMap<String, StaticUser>,
}

impl StaticUserProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: StaticUser) -> Self {
        self.users.insert(user.id.clone(), user);
        self
    }

    /// Provider holding the single user described by `DEMO_USER_*` variables
    ///
    /// Reads `DEMO_USER_ID` (default `1`), `DEMO_USER_EMAIL`, `DEMO_USER_NAME`
    /// and `DEMO_USER_PASSWORD`. Without an email and password the provider
    /// is empty.
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let email = std::env::var("DEMO_USER_EMAIL").ok().filter(|v| !v.is_empty());
        let password = std::env::var("DEMO_USER_PASSWORD").ok().filter(|v| !v.is_empty());

        let (Some(email), Some(password)) = (email, password) else {
            info!("No demo user configured");
            return Ok(Self::new());
        };

        let id = std::env::var("DEMO_USER_ID").unwrap_or_else(|_| "1".to_string());
        let name = std::env::var("DEMO_USER_NAME").unwrap_or_else(|_| "Demo User".to_string());
        let user = StaticUser::new(id, email, name).with_password(&password, bcrypt::DEFAULT_COST)?;

        info!(id = %user.id, "Seeded demo user");
        Ok(Self::new().with_user(user))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    fn find_by_email(&self, email: &str) -> Option<&StaticUser> {
        self.users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }
}

#[async_trait]
impl UserProvider for StaticUserProvider {
    type User = StaticUser;

    async fn retrieve_by_id(&self, id: &str) -> DomainResult<Option<StaticUser>> {
        Ok(self.users.get(id).cloned())
    }

    async fn retrieve_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> DomainResult<Option<StaticUser>> {
        let user = match (credentials.get("email"), credentials.get("id")) {
            (Some(email), _) => self.find_by_email(email),
            (None, Some(id)) => self.users.get(id),
            (None, None) => None,
        };
        Ok(user.cloned())
    }

    async fn validate_credentials(
        &self,
        user: &StaticUser,
        credentials: &Credentials,
    ) -> DomainResult<bool> {
        let Some(password) = credentials.get("password").cloned() else {
            return Ok(false);
        };
        if user.password_hash.is_empty() {
            debug!(id = %user.id, "User has no password set");
            return Ok(false);
        }

        let hash = user.password_hash.clone();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::user_provider(format!("password check aborted: {}", e)))?
            .map_err(|e| DomainError::user_provider(e.to_string()))
    }
}
