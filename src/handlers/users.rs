//! User handlers, including applying to a job.

use super::{body_to_map, parse_id};
use crate::entity::{JOBS, USERS};
use crate::error::AppError;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{ApplicationService, CrudService, RequestValidator, USER_RULES};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// GET /users: every user with the ids of jobs they applied to.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = ApplicationService::users_with_jobs(&state.pool, &state.schema).await?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let body = RequestValidator::validate_create(body_to_map(body)?, USER_RULES)?;
    let row = CrudService::create(&state.pool, &state.schema, &USERS, &body).await?;
    Ok(success_one(row))
}

pub async fn read(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let row = ApplicationService::user_with_jobs(&state.pool, &state.schema, &username).await?;
    Ok(success_one_ok(row))
}

/// PATCH /users/:username. Can grant admin; callers gate this route.
pub async fn update(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&username, USERS.pk_type)?;
    let payload = RequestValidator::validate_update(body_to_map(body)?, USER_RULES, USERS.updatable)?;
    let row = CrudService::update(&state.pool, &state.schema, &USERS, &id, &payload).await?;
    Ok(success_one_ok(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&username, USERS.pk_type)?;
    CrudService::delete(&state.pool, &state.schema, &USERS, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /users/:username/jobs/:id
pub async fn apply(
    State(state): State<AppState>,
    Path((username, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let job_id = parse_id(&id_str, JOBS.pk_type)?
        .as_i64()
        .ok_or_else(|| AppError::BadRequest("invalid id".into()))?;
    let row = ApplicationService::apply(&state.pool, &state.schema, &username, job_id).await?;
    Ok(success_one(row))
}
