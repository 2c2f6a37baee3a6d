//! Operational routes: liveness, readiness, build version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    schema: String,
    /// Whether the job-board tables have been migrated into `schema`.
    migrated: bool,
}

/// Last table the migrations create; if it resolves, the rest are there too.
fn sentinel_table(schema: &str) -> String {
    format!("\"{}\".\"applications\"", schema.replace('"', "\"\""))
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

/// 200 once the database answers and the schema is migrated, 503 otherwise.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyBody>) {
    let found = sqlx::query_scalar::<_, Option<String>>("SELECT to_regclass($1)::text")
        .bind(sentinel_table(&state.schema))
        .fetch_one(&state.pool)
        .await;
    let (status, label, migrated) = match found {
        Ok(Some(_)) => (StatusCode::OK, "ok", true),
        Ok(None) => {
            tracing::warn!(schema = %state.schema, "readiness: tables not migrated");
            (StatusCode::SERVICE_UNAVAILABLE, "unmigrated", false)
        }
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable", false)
        }
    };
    (
        status,
        Json(ReadyBody {
            status: label,
            schema: state.schema,
            migrated,
        }),
    )
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /health, GET /ready, GET /version.
pub fn common_routes_with_ready(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
