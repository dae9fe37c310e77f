//! Authentication route handlers
//!
//! - Login with email and password
//! - Logout (revokes every token of the caller)
//! - Current user

pub mod login;
pub mod logout;
pub mod me;

use std::sync::Arc;

use tg_core::services::JwtAuth;

/// State shared by the authentication routes, the middleware and the session guard
pub struct AppState<U, P> {
    pub auth: Arc<JwtAuth<U>>,
    pub users: Arc<P>,
}

impl<U, P> AppState<U, P> {
    pub fn new(auth: JwtAuth<U>, users: P) -> Self {
        Self {
            auth: Arc::new(auth),
            users: Arc::new(users),
        }
    }
}
