//! Mock implementation of UserProvider for testing

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::Principal;
use crate::errors::DomainResult;

use super::trait_::{Credentials, UserProvider};

/// Principal used by most tests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestUser {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub remember_token: Option<String>,
}

impl TestUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            remember_token: None,
        }
    }
}

impl Principal for TestUser {
    fn auth_identifier(&self) -> String {
        self.id.clone()
    }
}

/// Second principal type whose ids can collide with `TestUser`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherUser {
    pub id: String,
}

impl Principal for OtherUser {
    fn auth_identifier(&self) -> String {
        self.id.clone()
    }
}

/// Provider over a fixed set of users that counts id lookups
pub struct MockUserProvider<U> {
    users: HashMap<String, U>,
    passwords: HashMap<String, String>,
    lookups: AtomicUsize,
}

impl<U: Principal + Clone> MockUserProvider<U> {
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            passwords: HashMap::new(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn with_user(mut self, user: U) -> Self {
        self.users.insert(user.auth_identifier(), user);
        self
    }

    pub fn with_password(mut self, user: U, password: &str) -> Self {
        let id = user.auth_identifier();
        self.passwords.insert(id, password.to_string());
        self.with_user(user)
    }

    /// Number of `retrieve_by_id` calls so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<U: Principal + Clone> UserProvider for MockUserProvider<U> {
    type User = U;

    async fn retrieve_by_id(&self, id: &str) -> DomainResult<Option<U>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.get(id).cloned())
    }

    async fn retrieve_by_credentials(&self, credentials: &Credentials) -> DomainResult<Option<U>> {
        Ok(credentials
            .get("id")
            .and_then(|id| self.users.get(id))
            .cloned())
    }

    async fn validate_credentials(&self, user: &U, credentials: &Credentials) -> DomainResult<bool> {
        let expected = self.passwords.get(&user.auth_identifier());
        Ok(expected.is_some() && expected == credentials.get("password"))
    }
}
