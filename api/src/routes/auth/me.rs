use actix_web::HttpResponse;
use serde::Serialize;

use crate::dto::MeResponse;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/auth/me
///
/// Returns the authenticated user and the claims of the presented token.
pub async fn me<U>(auth: AuthContext<U>) -> HttpResponse
where
    U: Serialize + Clone + 'static,
{
    HttpResponse::Ok().json(MeResponse {
        user: auth.user,
        claims: auth.claims,
    })
}
