use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde_json::json;
use tracing::instrument;
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedForm;

use super::model::{
    LoginRequest, MessageResponse, RequestPasswordResetDto, RequestVerificationDto,
    ResetPasswordDto, ResetTokenStatus, TokenQuery, TokenResponse, VerifyEmailDto,
};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedForm(dto): ValidatedForm<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let user = AuthService::current_user(&state.db, auth_user.user_id()?).await?;
    Ok(Json(json!({
        "user": { "id": user.id, "name": user.name, "email": user.email }
    })))
}

/// Request an email verification link
#[utoipa::path(
    post,
    path = "/api/auth/request-verification",
    request_body(content = RequestVerificationDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Verification email sent", body = MessageResponse),
        (status = 400, description = "Email already verified", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn request_verification(
    State(state): State<AppState>,
    ValidatedForm(dto): ValidatedForm<RequestVerificationDto>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::request_verification(&state.db, &state.notifier, &dto.email).await?;
    Ok(Json(MessageResponse {
        message: "Verification email sent".to_string(),
    }))
}

/// Verify an email address (link target)
#[utoipa::path(
    get,
    path = "/api/auth/verify-email",
    params(("token" = String, Query, description = "Email verification token")),
    responses(
        (status = 200, description = "Email verified", body = MessageResponse),
        (status = 400, description = "Invalid or expired token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn verify_email_get(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::verify_email(&state.db, &query.token).await?;
    Ok(Json(MessageResponse {
        message: "Email verified successfully".to_string(),
    }))
}

/// Verify an email address
#[utoipa::path(
    post,
    path = "/api/auth/verify-email",
    request_body(content = VerifyEmailDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Email verified", body = MessageResponse),
        (status = 400, description = "Invalid or expired token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn verify_email_post(
    State(state): State<AppState>,
    ValidatedForm(dto): ValidatedForm<VerifyEmailDto>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::verify_email(&state.db, &dto.token).await?;
    Ok(Json(MessageResponse {
        message: "Email verified successfully".to_string(),
    }))
}

/// Request a password reset link
#[utoipa::path(
    post,
    path = "/api/auth/request-password-reset",
    request_body(content = RequestPasswordResetDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Reset email sent if the account exists", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn request_password_reset(
    State(state): State<AppState>,
    ValidatedForm(dto): ValidatedForm<RequestPasswordResetDto>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::request_password_reset(&state.db, &state.notifier, &dto.email).await?;
    Ok(Json(MessageResponse {
        message: "If the email exists, a password reset link has been sent".to_string(),
    }))
}

/// Password reset form (link target)
#[utoipa::path(
    get,
    path = "/api/auth/reset-password",
    params(("token" = String, Query, description = "Password reset token")),
    responses(
        (status = 200, description = "HTML reset form"),
        (status = 400, description = "Invalid or expired token (HTML)")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn reset_password_get(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<(StatusCode, Html<String>), AppError> {
    match AuthService::reset_token_status(&state.db, &query.token).await? {
        ResetTokenStatus::Invalid => Ok((
            StatusCode::BAD_REQUEST,
            Html(
                "<html><body>\
                 <h2>Invalid Reset Token</h2>\
                 <p>The password reset token is invalid or has expired.</p>\
                 <p>Please request a new password reset link.</p>\
                 </body></html>"
                    .to_string(),
            ),
        )),
        ResetTokenStatus::Expired => Ok((
            StatusCode::BAD_REQUEST,
            Html(
                "<html><body>\
                 <h2>Token Expired</h2>\
                 <p>The password reset token has expired.</p>\
                 <p>Please request a new password reset link.</p>\
                 </body></html>"
                    .to_string(),
            ),
        )),
        ResetTokenStatus::Valid => Ok((
            StatusCode::OK,
            Html(format!(
                r#"<html>
  <body>
    <h2>Reset Your Password</h2>
    <form action="/api/auth/reset-password" method="post">
      <input type="hidden" name="token" value="{}">
      <label for="new_password">New Password:</label><br>
      <input type="password" id="new_password" name="new_password" required><br><br>
      <button type="submit">Reset Password</button>
    </form>
  </body>
</html>"#,
                query.token
            )),
        )),
    }
}

/// Reset password using a token
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body(content = ResetPasswordDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "Invalid or expired token", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn reset_password_post(
    State(state): State<AppState>,
    ValidatedForm(dto): ValidatedForm<ResetPasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::reset_password(&state.db, &dto.token, &dto.new_password).await?;
    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}
