use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::notify::{DeliveryInfo, Notification, Notifier};
use crate::utils::errors::AppError;

use super::model::{CreateDeliveryDto, Delivery, UpdateDeliveryDto};

pub struct DeliveryService;

impl DeliveryService {
    #[instrument]
    pub async fn show_delivery(db: &PgPool, id: Uuid) -> Result<Delivery, AppError> {
        sqlx::query_as::<_, Delivery>(
            "SELECT id, item_name, destination, status, tracking_number, user_id
             FROM deliveries
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Delivery not found"))
    }

    #[instrument(skip(notifier, dto))]
    pub async fn create_delivery(
        db: &PgPool,
        notifier: &Notifier,
        owner_id: Uuid,
        owner_email: &str,
        dto: CreateDeliveryDto,
    ) -> Result<Delivery, AppError> {
        let delivery = sqlx::query_as::<_, Delivery>(
            "INSERT INTO deliveries (item_name, destination, status, tracking_number, user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, item_name, destination, status, tracking_number, user_id",
        )
        .bind(&dto.item_name)
        .bind(&dto.destination)
        .bind(&dto.status)
        .bind(&dto.tracking_number)
        .bind(owner_id)
        .fetch_one(db)
        .await?;

        Self::notify(notifier, owner_email, dto.notify_phone.as_deref(), &delivery);

        Ok(delivery)
    }

    #[instrument(skip(notifier, dto))]
    pub async fn update_delivery(
        db: &PgPool,
        notifier: &Notifier,
        id: Uuid,
        caller_id: Uuid,
        caller_email: &str,
        dto: UpdateDeliveryDto,
    ) -> Result<Delivery, AppError> {
        let existing = Self::show_delivery(db, id).await?;
        if existing.user_id != caller_id {
            return Err(AppError::forbidden("Not authorized to update this delivery"));
        }

        let delivery = sqlx::query_as::<_, Delivery>(
            "UPDATE deliveries
             SET item_name = COALESCE($1, item_name),
                 destination = COALESCE($2, destination),
                 status = COALESCE($3, status),
                 tracking_number = COALESCE($4, tracking_number),
                 updated_at = NOW()
             WHERE id = $5
             RETURNING id, item_name, destination, status, tracking_number, user_id",
        )
        .bind(dto.item_name.as_deref())
        .bind(dto.destination.as_deref())
        .bind(dto.status.as_deref())
        .bind(dto.tracking_number.as_deref())
        .bind(id)
        .fetch_one(db)
        .await?;

        Self::notify(notifier, caller_email, dto.notify_phone.as_deref(), &delivery);

        Ok(delivery)
    }

    #[instrument]
    pub async fn delete_delivery(db: &PgPool, id: Uuid, caller_id: Uuid) -> Result<(), AppError> {
        let existing = Self::show_delivery(db, id).await?;
        if existing.user_id != caller_id {
            return Err(AppError::forbidden("Not authorized to delete this delivery"));
        }

        sqlx::query("DELETE FROM deliveries WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    fn notify(notifier: &Notifier, email: &str, phone: Option<&str>, delivery: &Delivery) {
        let info = DeliveryInfo {
            item_name: delivery.item_name.clone(),
            destination: delivery.destination.clone(),
            status: delivery.status.clone(),
            tracking_number: delivery.tracking_number.clone(),
        };

        notifier.dispatch(Notification::DeliveryUpdateEmail {
            email: email.to_string(),
            info: info.clone(),
        });

        if let Some(phone) = phone {
            notifier.dispatch(Notification::DeliveryUpdateSms {
                phone: phone.to_string(),
                info,
            });
        }
    }
}
