use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

// Login form (OAuth2-style field names)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address. No format rule: a malformed address fails
    /// login the same way an unknown one does.
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RequestVerificationDto {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyEmailDto {
    #[validate(length(min = 1))]
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RequestPasswordResetDto {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordDto {
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Outcome of looking up a reset token without consuming it, used by the
/// HTML form page.
#[derive(Debug, PartialEq, Eq)]
pub enum ResetTokenStatus {
    Valid,
    Invalid,
    Expired,
}
