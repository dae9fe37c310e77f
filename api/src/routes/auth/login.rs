use actix_web::{web, HttpResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tg_core::domain::Principal;
use tg_core::repositories::UserProvider;

use crate::dto::{LoginRequest, TokenResponse};
use crate::guard::SessionGuard;
use crate::handlers::ApiError;

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// # Request Body
///
/// ```json
/// {
///     "email": "ada@example.com",
///     "password": "correct horse"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 2592000
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Email or password missing
/// - 401 Unauthorized: Unknown user or wrong password
pub async fn login<U, P>(
    state: web::Data<AppState<U, P>>,
    mut guard: SessionGuard<U, P>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: Principal + Serialize + DeserializeOwned + Clone + 'static,
    P: UserProvider<User = U> + 'static,
{
    let request = request.into_inner();
    if !request.is_complete() {
        return Err(ApiError::BadRequest(
            "email and password are required".to_string(),
        ));
    }

    let credentials = request.into_credentials();
    if !guard.attempt(&credentials, true).await? {
        return Err(ApiError::InvalidCredentials);
    }

    let token = guard
        .token()
        .ok_or_else(|| ApiError::Internal("login produced no token".to_string()))?
        .to_string();

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token, state.auth.settings().ttl)))
}
