use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::users::model::User;
use crate::notify::{Notification, Notifier};
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::token::generate_one_time_token;

use super::model::{LoginRequest, ResetTokenStatus, TokenResponse};

const VERIFICATION_TOKEN_TTL_HOURS: i64 = 24;
const RESET_TOKEN_TTL_HOURS: i64 = 1;

#[derive(sqlx::FromRow)]
struct TokenRow {
    id: Uuid,
    expires: Option<DateTime<Utc>>,
}

pub struct AuthService;

impl AuthService {
    /// Absent account and wrong password produce the identical error so
    /// responses cannot be used to probe which emails are registered.
    #[instrument(skip(dto))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            email: String,
            password: String,
        }

        let user = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, email, password FROM users WHERE email = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        let is_valid = verify_password(&dto.password, &user.password)?;

        if !is_valid {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let access_token = create_access_token(user.id, &user.email, jwt_config)?;

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    #[instrument]
    pub async fn current_user(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid or expired token"))
    }

    /// A fresh token overwrites any outstanding one, implicitly
    /// invalidating previously delivered links. The token and its expiry
    /// are written in a single statement so they can never diverge.
    #[instrument(skip(notifier))]
    pub async fn request_verification(
        db: &PgPool,
        notifier: &Notifier,
        email: &str,
    ) -> Result<(), AppError> {
        #[derive(sqlx::FromRow)]
        struct VerificationTarget {
            id: Uuid,
            is_verified: bool,
        }

        let user = sqlx::query_as::<_, VerificationTarget>(
            "SELECT id, is_verified FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.is_verified {
            return Err(AppError::bad_request("Email already verified"));
        }

        let token = generate_one_time_token();
        let expires = Utc::now() + Duration::hours(VERIFICATION_TOKEN_TTL_HOURS);

        sqlx::query(
            "UPDATE users
             SET verification_token = $1, verification_token_expires = $2, updated_at = NOW()
             WHERE id = $3",
        )
        .bind(&token)
        .bind(expires)
        .bind(user.id)
        .execute(db)
        .await?;

        notifier.dispatch(Notification::VerificationLink {
            email: email.to_string(),
            token,
        });

        Ok(())
    }

    /// Consumes a verification token: marks the account verified and
    /// clears the token in the same transaction. The row is locked for
    /// the duration so two concurrent consumers cannot both succeed.
    #[instrument]
    pub async fn verify_email(db: &PgPool, token: &str) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let row = sqlx::query_as::<_, TokenRow>(
            "SELECT id, verification_token_expires AS expires FROM users
             WHERE verification_token = $1
             FOR UPDATE",
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::bad_request("Invalid verification token"))?;

        if row.expires.is_some_and(|expires| expires < Utc::now()) {
            return Err(AppError::bad_request("Verification token expired"));
        }

        sqlx::query(
            "UPDATE users
             SET is_verified = TRUE, verification_token = NULL,
                 verification_token_expires = NULL, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(row.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Unknown emails succeed silently; only the caller of a registered
    /// address gets a token written and a mail queued.
    #[instrument(skip(notifier))]
    pub async fn request_password_reset(
        db: &PgPool,
        notifier: &Notifier,
        email: &str,
    ) -> Result<(), AppError> {
        #[derive(sqlx::FromRow)]
        struct ResetTarget {
            id: Uuid,
        }

        let Some(user) =
            sqlx::query_as::<_, ResetTarget>("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(db)
                .await?
        else {
            return Ok(());
        };

        let token = generate_one_time_token();
        let expires = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);

        sqlx::query(
            "UPDATE users
             SET reset_token = $1, reset_token_expires = $2, updated_at = NOW()
             WHERE id = $3",
        )
        .bind(&token)
        .bind(expires)
        .bind(user.id)
        .execute(db)
        .await?;

        notifier.dispatch(Notification::PasswordResetLink {
            email: email.to_string(),
            token,
        });

        Ok(())
    }

    /// Non-consuming check used by the HTML reset form.
    #[instrument]
    pub async fn reset_token_status(
        db: &PgPool,
        token: &str,
    ) -> Result<ResetTokenStatus, AppError> {
        let row = sqlx::query_as::<_, TokenRow>(
            "SELECT id, reset_token_expires AS expires FROM users WHERE reset_token = $1",
        )
        .bind(token)
        .fetch_optional(db)
        .await?;

        Ok(match row {
            None => ResetTokenStatus::Invalid,
            Some(row) if row.expires.is_some_and(|expires| expires < Utc::now()) => {
                ResetTokenStatus::Expired
            }
            Some(_) => ResetTokenStatus::Valid,
        })
    }

    /// Consumes a reset token: replaces the password hash and clears the
    /// token in the same transaction.
    #[instrument(skip(new_password))]
    pub async fn reset_password(
        db: &PgPool,
        token: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let row = sqlx::query_as::<_, TokenRow>(
            "SELECT id, reset_token_expires AS expires FROM users
             WHERE reset_token = $1
             FOR UPDATE",
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::bad_request("Invalid reset token"))?;

        if row.expires.is_some_and(|expires| expires < Utc::now()) {
            return Err(AppError::bad_request("Reset token expired"));
        }

        let hashed = hash_password(new_password)?;

        sqlx::query(
            "UPDATE users
             SET password = $1, reset_token = NULL, reset_token_expires = NULL,
                 updated_at = NOW()
             WHERE id = $2",
        )
        .bind(&hashed)
        .bind(row.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }
}
