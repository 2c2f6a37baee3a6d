//! Shared application state for all routes.

use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Postgres schema the job-board tables live in.
    pub schema: String,
}
