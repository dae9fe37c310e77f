//! Bearer-token authentication middleware for protected endpoints.
//!
//! The middleware extracts the token from the `Authorization` header, runs it
//! through the engine's validator, resolves the user behind it and injects an
//! [`AuthContext`] into the request. Failures are answered here, without
//! reaching the handler: the same 401 body whatever the reason, or 403 when a
//! user filter refused the caller.

use std::{
    future::{ready, Ready},
    marker::PhantomData,
    rc::Rc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tg_core::domain::{ClaimSet, Principal, ValidationResult};
use tg_core::repositories::UserProvider;
use tracing::debug;

use crate::guard::extract_bearer_token;
use crate::handlers::ApiError;
use crate::routes::auth::AppState;

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext<U> {
    /// Bearer token the request was authenticated with
    pub token: String,
    /// Claims of that token
    pub claims: ClaimSet,
    /// User resolved from the `sub` claim
    pub user: U,
}

/// Authentication middleware factory
///
/// Requires `web::Data<AppState<U, P>>` to be registered on the app.
pub struct JwtAuthentication<U, P> {
    _marker: PhantomData<fn() -> (U, P)>,
}

impl<U, P> JwtAuthentication<U, P> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<U, P> Default for JwtAuthentication<U, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B, U, P> Transform<S, ServiceRequest> for JwtAuthentication<U, P>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    U: Principal + Serialize + DeserializeOwned + Clone + 'static,
    P: UserProvider<User = U> + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthenticationMiddleware<S, U, P>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthenticationMiddleware {
            service: Rc::new(service),
            _marker: PhantomData,
        }))
    }
}

/// Authentication middleware service
pub struct JwtAuthenticationMiddleware<S, U, P> {
    service: Rc<S>,
    _marker: PhantomData<fn() -> (U, P)>,
}

impl<S, B, U, P> Service<ServiceRequest> for JwtAuthenticationMiddleware<S, U, P>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    U: Principal + Serialize + DeserializeOwned + Clone + 'static,
    P: UserProvider<User = U> + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate::<U, P>(&req).await {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(err) => Ok(req.error_response(err).map_into_right_body()),
            }
        })
    }
}

async fn authenticate<U, P>(req: &ServiceRequest) -> Result<AuthContext<U>, ApiError>
where
    U: Principal + Serialize + DeserializeOwned + Clone + 'static,
    P: UserProvider<User = U> + 'static,
{
    let state = req
        .app_data::<web::Data<AppState<U, P>>>()
        .cloned()
        .ok_or_else(|| ApiError::Internal("application state missing".to_string()))?;

    let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let token = extract_bearer_token(header).ok_or(ApiError::Unauthenticated)?;

    let claims = match state.auth.validate(&token).await {
        ValidationResult::Valid(claims) => claims,
        ValidationResult::Invalid(reason) => {
            debug!(%reason, path = %req.path(), "Rejected bearer token");
            return Err(ApiError::Unauthenticated);
        }
    };

    let user = state
        .auth
        .retrieve_user_for_claims(&claims, state.users.as_ref())
        .await?
        .ok_or(ApiError::Unauthenticated)?;

    Ok(AuthContext {
        token,
        claims,
        user,
    })
}

/// Extractor for required authentication
impl<U: Clone + 'static> FromRequest for AuthContext<U> {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result: Result<Self, Error> = req
            .extensions()
            .get::<AuthContext<U>>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthenticated.into());

        ready(result)
    }
}
