//! Job handlers.

use super::{body_to_map, parse_id};
use crate::entity::JOBS;
use crate::error::AppError;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{CrudService, RequestValidator, JOB_QUERY_RULES, JOB_RULES};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// GET /jobs?title=&minSalary=&maxSalary=&hasEquity=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let criteria = RequestValidator::coerce_filter_query(params, JOB_QUERY_RULES)?;
    let rows = CrudService::list(&state.pool, &state.schema, &JOBS, &criteria).await?;
    Ok(success_many(rows))
}

/// POST /jobs. An unknown `companyHandle` fails on the foreign key and maps to 400.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let body = RequestValidator::validate_create(body_to_map(body)?, JOB_RULES)?;
    let row = CrudService::create(&state.pool, &state.schema, &JOBS, &body).await?;
    Ok(success_one(row))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, JOBS.pk_type)?;
    let row = CrudService::read(&state.pool, &state.schema, &JOBS, &id).await?;
    Ok(success_one_ok(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, JOBS.pk_type)?;
    let payload = RequestValidator::validate_update(body_to_map(body)?, JOB_RULES, JOBS.updatable)?;
    let row = CrudService::update(&state.pool, &state.schema, &JOBS, &id, &payload).await?;
    Ok(success_one_ok(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, JOBS.pk_type)?;
    CrudService::delete(&state.pool, &state.schema, &JOBS, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
