use chrono::{DateTime, Duration, Utc};
use parceltrack::config::cors::CorsConfig;
use parceltrack::config::email::EmailConfig;
use parceltrack::config::jwt::JwtConfig;
use parceltrack::config::sms::SmsConfig;
use parceltrack::notify::Notifier;
use parceltrack::router::init_router;
use parceltrack::state::AppState;
use parceltrack::utils::password::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        notifier: Notifier::start(EmailConfig::from_env(), SmsConfig::from_env()),
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

pub async fn create_test_user(pool: &PgPool, email: &str, password: &str) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind("Test User")
    .bind(email)
    .bind(&hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub async fn verification_token(pool: &PgPool, email: &str) -> Option<String> {
    let (token,): (Option<String>,) =
        sqlx::query_as("SELECT verification_token FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(pool)
            .await
            .unwrap();
    token
}

#[allow(dead_code)]
pub async fn reset_token(pool: &PgPool, email: &str) -> Option<String> {
    let (token,): (Option<String>,) =
        sqlx::query_as("SELECT reset_token FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(pool)
            .await
            .unwrap();
    token
}

#[allow(dead_code)]
pub async fn is_verified(pool: &PgPool, email: &str) -> bool {
    let (verified,): (bool,) = sqlx::query_as("SELECT is_verified FROM users WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap();
    verified
}

/// Backdates a stored token expiry so expiry-handling paths can be
/// exercised without waiting.
#[allow(dead_code)]
pub async fn expire_token(pool: &PgPool, email: &str, kind: &str) {
    let past: DateTime<Utc> = Utc::now() - Duration::hours(2);
    let query = match kind {
        "verification" => {
            "UPDATE users SET verification_token_expires = $1 WHERE email = $2"
        }
        "reset" => "UPDATE users SET reset_token_expires = $1 WHERE email = $2",
        _ => panic!("Invalid token kind: {}", kind),
    };
    sqlx::query(query)
        .bind(past)
        .bind(email)
        .execute(pool)
        .await
        .unwrap();
}

#[allow(dead_code)]
pub struct TestDelivery {
    pub id: Uuid,
    pub user_id: Uuid,
}

#[allow(dead_code)]
pub async fn create_test_delivery(pool: &PgPool, user_id: Uuid) -> TestDelivery {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO deliveries (item_name, destination, status, tracking_number, user_id)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind("Test Item")
    .bind("Test Destination")
    .bind("pending")
    .bind(format!("TRK-{}", Uuid::new_v4()))
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap();

    TestDelivery { id, user_id }
}
