//! Database connection pool initialization.
//!
//! Reads the connection string from the `DATABASE_URL` environment
//! variable. The pool is cheaply cloneable and lives in the application
//! state for use in request handlers.

use sqlx::PgPool;
use std::env;

/// Initializes the PostgreSQL connection pool.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set or the connection fails. This is
/// called once at startup, before the server accepts requests.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
