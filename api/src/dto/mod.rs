//! Request and response bodies

pub mod auth;

pub use auth::{LoginRequest, LogoutResponse, MeResponse, TokenResponse};
