use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::deliveries::model::Delivery;
use crate::utils::errors::AppError;
use crate::utils::password::hash_password;

use super::model::{CreateUserDto, ShowUser, UpdateUserDto, User};

pub struct UserService;

impl UserService {
    #[instrument(skip(dto))]
    pub async fn create_user(db: &PgPool, dto: CreateUserDto) -> Result<User, AppError> {
        let existing =
            sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE email = $1")
                .bind(&dto.email)
                .fetch_optional(db)
                .await?;

        if existing.is_some() {
            return Err(AppError::conflict("Email already registered"));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password)
             VALUES ($1, $2, $3)
             RETURNING id, name, email",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await?;

        Ok(user)
    }

    #[instrument]
    pub async fn show_user(db: &PgPool, id: Uuid) -> Result<ShowUser, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserDetail {
            id: Uuid,
            name: String,
            email: String,
            is_verified: bool,
        }

        let user = sqlx::query_as::<_, UserDetail>(
            "SELECT id, name, email, is_verified FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        let deliveries = sqlx::query_as::<_, Delivery>(
            "SELECT id, item_name, destination, status, tracking_number, user_id
             FROM deliveries
             WHERE user_id = $1
             ORDER BY created_at",
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(ShowUser {
            id: user.id,
            name: user.name,
            email: user.email,
            is_verified: user.is_verified,
            deliveries,
        })
    }

    #[instrument(skip(dto))]
    pub async fn update_user(db: &PgPool, id: Uuid, dto: UpdateUserDto) -> Result<User, AppError> {
        let hashed_password = dto.password.as_deref().map(hash_password).transpose()?;

        let user = sqlx::query_as::<_, User>(
            "UPDATE users
             SET name = COALESCE($1, name),
                 email = COALESCE($2, email),
                 password = COALESCE($3, password),
                 updated_at = NOW()
             WHERE id = $4
             RETURNING id, name, email",
        )
        .bind(dto.name.as_deref())
        .bind(dto.email.as_deref())
        .bind(hashed_password.as_deref())
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        Ok(user)
    }

    /// Deleting a user also removes its deliveries through the foreign
    /// key cascade.
    #[instrument]
    pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User not found"));
        }

        Ok(())
    }
}
