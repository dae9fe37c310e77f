//! Application factory

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tg_core::domain::Principal;
use tg_core::repositories::UserProvider;

use crate::routes::{self, auth::AppState};

/// Create the application with its state, routes and 404 fallback
///
/// Request logging is left to the caller so tests can build the same app
/// without a global subscriber.
pub fn create_app<U, P>(
    app_state: web::Data<AppState<U, P>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
>
where
    U: Principal + Serialize + DeserializeOwned + Clone + 'static,
    P: UserProvider<User = U> + 'static,
{
    App::new()
        .app_data(app_state)
        .configure(routes::configure::<U, P>)
        .default_service(web::route().to(routes::not_found))
}
