use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedForm;

use super::model::{CreateDeliveryDto, Delivery, DeliveryResponse, UpdateDeliveryDto};
use super::service::DeliveryService;

/// Get a delivery
#[utoipa::path(
    get,
    path = "/api/deliveries/{delivery_id}",
    params(("delivery_id" = Uuid, Path, description = "Delivery id")),
    responses(
        (status = 200, description = "Delivery", body = Delivery),
        (status = 404, description = "Delivery not found", body = ErrorResponse)
    ),
    tag = "Deliveries"
)]
#[instrument(skip(state))]
pub async fn show_delivery(
    State(state): State<AppState>,
    Path(delivery_id): Path<Uuid>,
) -> Result<Json<Delivery>, AppError> {
    let delivery = DeliveryService::show_delivery(&state.db, delivery_id).await?;
    Ok(Json(delivery))
}

/// Create a delivery owned by the caller
#[utoipa::path(
    post,
    path = "/api/deliveries",
    request_body(content = CreateDeliveryDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Delivery created", body = DeliveryResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Deliveries"
)]
#[instrument(skip(state, dto))]
pub async fn create_delivery(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedForm(dto): ValidatedForm<CreateDeliveryDto>,
) -> Result<(StatusCode, Json<DeliveryResponse>), AppError> {
    let delivery = DeliveryService::create_delivery(
        &state.db,
        &state.notifier,
        auth_user.user_id()?,
        auth_user.email(),
        dto,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DeliveryResponse {
            message: "Delivery created successfully".to_string(),
            delivery,
        }),
    ))
}

/// Update a delivery (owner only)
#[utoipa::path(
    put,
    path = "/api/deliveries/{delivery_id}",
    params(("delivery_id" = Uuid, Path, description = "Delivery id")),
    request_body(content = UpdateDeliveryDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Delivery updated", body = DeliveryResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Delivery not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Deliveries"
)]
#[instrument(skip(state, dto))]
pub async fn update_delivery(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(delivery_id): Path<Uuid>,
    ValidatedForm(dto): ValidatedForm<UpdateDeliveryDto>,
) -> Result<Json<DeliveryResponse>, AppError> {
    let delivery = DeliveryService::update_delivery(
        &state.db,
        &state.notifier,
        delivery_id,
        auth_user.user_id()?,
        auth_user.email(),
        dto,
    )
    .await?;

    Ok(Json(DeliveryResponse {
        message: format!("Delivery with id {} updated successfully", delivery_id),
        delivery,
    }))
}

/// Delete a delivery (owner only)
#[utoipa::path(
    delete,
    path = "/api/deliveries/{delivery_id}",
    params(("delivery_id" = Uuid, Path, description = "Delivery id")),
    responses(
        (status = 200, description = "Delivery deleted"),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Delivery not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Deliveries"
)]
#[instrument(skip(state))]
pub async fn delete_delivery(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(delivery_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    DeliveryService::delete_delivery(&state.db, delivery_id, auth_user.user_id()?).await?;
    Ok(Json(serde_json::json!({
        "message": format!("Delivery with id {} deleted successfully", delivery_id)
    })))
}
