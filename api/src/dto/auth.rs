use serde::{Deserialize, Serialize};
use tg_core::domain::ClaimSet;
use tg_core::repositories::Credentials;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// Both fields must be present and non-blank
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    pub fn into_credentials(self) -> Credentials {
        Credentials::from([
            ("email".to_string(), self.email.trim().to_string()),
            ("password".to_string(), self.password),
        ])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeResponse<U> {
    pub user: U,
    pub claims: ClaimSet,
}
