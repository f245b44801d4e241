use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedForm;

use super::model::{CreateUserDto, ShowUser, UpdateUserDto, UserResponse};
use super::service::UserService;

/// Create a user account
#[utoipa::path(
    post,
    path = "/api/users",
    request_body(content = CreateUserDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedForm(dto): ValidatedForm<CreateUserDto>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = UserService::create_user(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

/// Get a user and its deliveries
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User detail", body = ShowUser),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn show_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ShowUser>, AppError> {
    let user = UserService::show_user(&state.db, user_id).await?;
    Ok(Json(user))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/users/{user_id}",
    params(("user_id" = Uuid, Path, description = "User id")),
    request_body(content = UpdateUserDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    ValidatedForm(dto): ValidatedForm<UpdateUserDto>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::update_user(&state.db, user_id, dto).await?;
    Ok(Json(UserResponse {
        message: format!("User with id {} updated successfully", user_id),
        user,
    }))
}

/// Delete a user and its deliveries
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    UserService::delete_user(&state.db, user_id).await?;
    Ok(Json(serde_json::json!({
        "message": format!("User with id {} deleted successfully", user_id)
    })))
}
