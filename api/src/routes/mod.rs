//! Route table

pub mod auth;
pub mod health;

use actix_web::{web, HttpResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tg_core::domain::Principal;
use tg_core::repositories::UserProvider;
use tg_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::JwtAuthentication;

/// Registers every route; `web::Data<AppState<U, P>>` must be registered by the caller
pub fn configure<U, P>(cfg: &mut web::ServiceConfig)
where
    U: Principal + Serialize + DeserializeOwned + Clone + 'static,
    P: UserProvider<User = U> + 'static,
{
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api/v1/auth")
            .route("/login", web::post().to(auth::login::login::<U, P>))
            .route(
                "/logout",
                web::post()
                    .to(auth::logout::logout::<U, P>)
                    .wrap(JwtAuthentication::<U, P>::new()),
            )
            .route(
                "/me",
                web::get()
                    .to(auth::me::me::<U>)
                    .wrap(JwtAuthentication::<U, P>::new()),
            ),
    );
}

/// Default handler for unknown paths
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
