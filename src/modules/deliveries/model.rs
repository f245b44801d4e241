use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Delivery {
    pub id: Uuid,
    pub item_name: String,
    pub destination: String,
    pub status: String,
    pub tracking_number: String,
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDeliveryDto {
    #[validate(length(min = 1))]
    pub item_name: String,
    #[validate(length(min = 1))]
    pub destination: String,
    #[validate(length(min = 1))]
    pub status: String,
    #[validate(length(min = 1))]
    pub tracking_number: String,
    /// Optional phone number for an SMS notification in addition to the
    /// owner's email.
    pub notify_phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDeliveryDto {
    #[validate(length(min = 1))]
    pub item_name: Option<String>,
    #[validate(length(min = 1))]
    pub destination: Option<String>,
    #[validate(length(min = 1))]
    pub status: Option<String>,
    #[validate(length(min = 1))]
    pub tracking_number: Option<String>,
    pub notify_phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeliveryResponse {
    pub message: String,
    pub delivery: Delivery,
}
