//! Per-request session guard
//!
//! A `SessionGuard` wraps the bearer token of one request and answers "who is
//! calling?" by delegating to the shared `JwtAuth` engine. Claims and the
//! resolved user are memoized for the lifetime of the guard, so repeated
//! calls within a request validate the token once.

use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpMessage, HttpRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tg_core::domain::{ClaimSet, Principal};
use tg_core::errors::DomainResult;
use tg_core::repositories::{Credentials, UserProvider};
use tg_core::services::JwtAuth;
use tracing::{debug, error, info};

use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::routes::auth::AppState;

const BEARER_SCHEME: &str = "bearer ";

/// Token of an `Authorization: Bearer <token>` header value
///
/// The scheme is matched case-insensitively; an empty token counts as absent.
pub fn extract_bearer_token(header: Option<&str>) -> Option<String> {
    let value = header?.trim();
    let scheme = value.get(..BEARER_SCHEME.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = value[BEARER_SCHEME.len()..].trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Authentication state of a single request
pub struct SessionGuard<U, P> {
    auth: Arc<JwtAuth<U>>,
    provider: Arc<P>,
    token: Option<String>,
    claims: Option<ClaimSet>,
    user: Option<U>,
    resolved: bool,
}

impl<U, P> SessionGuard<U, P>
where
    U: Principal + Serialize + DeserializeOwned + Clone + 'static,
    P: UserProvider<User = U>,
{
    pub fn new(auth: Arc<JwtAuth<U>>, provider: Arc<P>, token: Option<String>) -> Self {
        Self {
            auth,
            provider,
            token,
            claims: None,
            user: None,
            resolved: false,
        }
    }

    /// Guard for the raw `Authorization` header value of a request
    pub fn from_authorization(auth: Arc<JwtAuth<U>>, provider: Arc<P>, header: Option<&str>) -> Self {
        Self::new(auth, provider, extract_bearer_token(header))
    }

    /// Guard whose token was already validated and resolved to `user`
    pub fn authenticated(
        auth: Arc<JwtAuth<U>>,
        provider: Arc<P>,
        token: String,
        claims: ClaimSet,
        user: U,
    ) -> Self {
        Self {
            auth,
            provider,
            token: Some(token),
            claims: Some(claims),
            user: Some(user),
            resolved: true,
        }
    }

    /// Raw bearer token, if the request carried one
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Claims of the current token; empty when there is no valid token
    pub async fn claims(&mut self) -> ClaimSet {
        if let Some(claims) = &self.claims {
            return claims.clone();
        }

        let claims = match &self.token {
            Some(token) => self.auth.retrieve_claims(token).await,
            None => ClaimSet::new(),
        };
        self.claims = Some(claims.clone());
        claims
    }

    /// Single claim of the current token
    pub async fn claim(&mut self, name: &str) -> Option<Value> {
        self.claims().await.get(name).cloned()
    }

    /// The authenticated user, resolved at most once per guard
    pub async fn user(&mut self) -> DomainResult<Option<U>> {
        if !self.resolved {
            let claims = self.claims().await;
            self.user = if claims.is_empty() {
                None
            } else {
                self.auth
                    .retrieve_user_for_claims(&claims, self.provider.as_ref())
                    .await?
            };
            self.resolved = true;
        }
        Ok(self.user.clone())
    }

    pub async fn check(&mut self) -> DomainResult<bool> {
        Ok(self.user().await?.is_some())
    }

    pub async fn guest(&mut self) -> DomainResult<bool> {
        Ok(!self.check().await?)
    }

    /// Makes `user` the current user and returns a freshly issued token for it
    pub fn login(&mut self, user: U) -> DomainResult<String> {
        let token = self.auth.generate_token(&user, ClaimSet::new())?;
        info!(sub = %user.auth_identifier(), "User logged in");

        self.token = Some(token.clone());
        self.claims = None;
        self.user = Some(user);
        self.resolved = true;
        Ok(token)
    }

    /// Revokes every token of the current subject and forgets the current user
    pub async fn logout(&mut self) -> DomainResult<()> {
        let subject = match self.user.as_ref().map(Principal::auth_identifier) {
            Some(subject) => Some(subject),
            None => self.claims().await.subject(),
        };

        if let Some(subject) = subject {
            self.auth.logout(&subject).await?;
            info!(sub = %subject, "User logged out");
        }

        self.token = None;
        self.claims = Some(ClaimSet::new());
        self.user = None;
        self.resolved = true;
        Ok(())
    }

    /// Whether `credentials` identify a user and match its secret
    pub async fn validate(&self, credentials: &Credentials) -> DomainResult<bool> {
        Ok(self.find_by_credentials(credentials).await?.is_some())
    }

    /// Validates `credentials` and, if `login` is set, logs the user in
    ///
    /// The new token is available through [`token`](Self::token) afterwards.
    pub async fn attempt(&mut self, credentials: &Credentials, login: bool) -> DomainResult<bool> {
        match self.find_by_credentials(credentials).await? {
            Some(user) => {
                if login {
                    self.login(user)?;
                }
                Ok(true)
            }
            None => {
                debug!("Credential check failed");
                Ok(false)
            }
        }
    }

    async fn find_by_credentials(&self, credentials: &Credentials) -> DomainResult<Option<U>> {
        let Some(user) = self.provider.retrieve_by_credentials(credentials).await? else {
            return Ok(None);
        };
        if self.provider.validate_credentials(&user, credentials).await? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

/// Builds the guard from the application state and the request headers
///
/// When the authentication middleware already ran, the guard starts out
/// with its resolved user.
impl<U, P> FromRequest for SessionGuard<U, P>
where
    U: Principal + Serialize + DeserializeOwned + Clone + 'static,
    P: UserProvider<User = U> + 'static,
{
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState<U, P>>>() else {
            error!("Session guard requested without application state");
            return ready(Err(ApiError::Internal("application state missing".to_string()).into()));
        };
        let auth = Arc::clone(&state.auth);
        let users = Arc::clone(&state.users);

        if let Some(context) = req.extensions().get::<AuthContext<U>>() {
            let context = context.clone();
            return ready(Ok(Self::authenticated(
                auth,
                users,
                context.token,
                context.claims,
                context.user,
            )));
        }

        let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        ready(Ok(Self::from_authorization(auth, users, header)))
    }
}
