use actix_web::HttpResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tg_core::domain::Principal;
use tg_core::repositories::UserProvider;

use crate::dto::LogoutResponse;
use crate::guard::SessionGuard;
use crate::handlers::ApiError;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes every token issued to the caller so far and drops the cached user.
/// Requires authentication via Bearer token in Authorization header.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 500 Internal Server Error: Revocation marker could not be written
pub async fn logout<U, P>(mut guard: SessionGuard<U, P>) -> Result<HttpResponse, ApiError>
where
    U: Principal + Serialize + DeserializeOwned + Clone + 'static,
    P: UserProvider<User = U> + 'static,
{
    guard.logout().await?;

    Ok(HttpResponse::Ok().json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}
