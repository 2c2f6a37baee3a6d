//! Company handlers.

use super::{body_to_map, parse_id};
use crate::entity::COMPANIES;
use crate::error::AppError;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{
    ApplicationService, CrudService, RequestValidator, COMPANY_QUERY_RULES, COMPANY_RULES,
};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

/// GET /companies?name=&minEmployees=&maxEmployees=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let criteria = RequestValidator::coerce_filter_query(params, COMPANY_QUERY_RULES)?;
    let rows = CrudService::list(&state.pool, &state.schema, &COMPANIES, &criteria).await?;
    Ok(success_many(rows))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let body = RequestValidator::validate_create(body_to_map(body)?, COMPANY_RULES)?;
    let row = CrudService::create(&state.pool, &state.schema, &COMPANIES, &body).await?;
    Ok(success_one(row))
}

/// GET /companies/:handle, with the company's jobs.
pub async fn read(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let row = ApplicationService::company_with_jobs(&state.pool, &state.schema, &handle).await?;
    Ok(success_one_ok(row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&handle, COMPANIES.pk_type)?;
    let payload = RequestValidator::validate_update(body_to_map(body)?, COMPANY_RULES, COMPANIES.updatable)?;
    let row = CrudService::update(&state.pool, &state.schema, &COMPANIES, &id, &payload).await?;
    Ok(success_one_ok(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&handle, COMPANIES.pk_type)?;
    CrudService::delete(&state.pool, &state.schema, &COMPANIES, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
