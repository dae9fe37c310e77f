//! HTTP surface of the token engine
//!
//! - `guard` - per-request session guard (`SessionGuard`)
//! - `middleware` - bearer-token authentication for protected routes
//! - `routes` - login, logout, current user and health endpoints

pub mod app;
pub mod dto;
pub mod guard;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use guard::SessionGuard;
pub use routes::auth::AppState;
