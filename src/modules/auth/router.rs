use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    login_user, me, request_password_reset, request_verification, reset_password_get,
    reset_password_post, verify_email_get, verify_email_post,
};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/me", get(me))
        .route("/request-verification", post(request_verification))
        .route("/verify-email", get(verify_email_get).post(verify_email_post))
        .route("/request-password-reset", post(request_password_reset))
        .route(
            "/reset-password",
            get(reset_password_get).post(reset_password_post),
        )
}
