//! PostgreSQL connection pool initialization.
//!
//! The connection string is read from `DATABASE_URL`. The returned pool
//! is cheaply cloneable and lives in [`crate::state::AppState`].

use sqlx::PgPool;
use std::env;

/// Connect to the database named by `DATABASE_URL`.
///
/// # Panics
///
/// Panics when the variable is unset or the connection fails; called
/// once during startup, before the server accepts traffic.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
