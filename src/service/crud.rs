//! Generic CRUD execution for the job-board entities.

use super::executor::QueryExecutor;
use crate::case::value_keys_to_camel_case_recursive;
use crate::entity::EntityDef;
use crate::error::{AppError, SqlBuildError};
use crate::sql::{
    delete, filter, insert, partial_update_allowed, select_by_column, select_by_pk, select_list, update,
    FilterCriteria, SqlFragment, UpdatePayload,
};
use serde_json::Value;

pub struct CrudService;

impl CrudService {
    /// List rows, narrowed by whatever criteria the entity's filter recognizes.
    pub async fn list<E: QueryExecutor + ?Sized>(
        db: &E,
        schema: &str,
        entity: &EntityDef,
        criteria: &FilterCriteria,
    ) -> Result<Vec<Value>, AppError> {
        let frag = match &entity.filter {
            Some(spec) if !criteria.is_empty() => filter(spec, criteria),
            _ => SqlFragment::default(),
        };
        let q = select_list(entity, schema, &frag);
        let rows = db.fetch_all(&q.sql, &q.params).await?;
        Ok(rows.into_iter().map(value_keys_to_camel_case_recursive).collect())
    }

    /// Fetch one row by primary key; `NotFound` when absent.
    pub async fn read<E: QueryExecutor + ?Sized>(
        db: &E,
        schema: &str,
        entity: &EntityDef,
        id: &Value,
    ) -> Result<Value, AppError> {
        let q = select_by_pk(entity, schema);
        db.fetch_optional(&q.sql, std::slice::from_ref(id))
            .await?
            .map(value_keys_to_camel_case_recursive)
            .ok_or_else(|| not_found(entity, id))
    }

    /// Rows of `entity` whose `column` equals `value`.
    pub async fn fetch_where<E: QueryExecutor + ?Sized>(
        db: &E,
        schema: &str,
        entity: &EntityDef,
        column: &str,
        value: &Value,
    ) -> Result<Vec<Value>, AppError> {
        if !entity.has_column(column) {
            return Err(SqlBuildError::FieldNotAllowed(column.to_string()).into());
        }
        let q = select_by_column(entity, schema, column);
        let rows = db.fetch_all(&q.sql, std::slice::from_ref(value)).await?;
        Ok(rows.into_iter().map(value_keys_to_camel_case_recursive).collect())
    }

    /// Insert one validated row and return it.
    pub async fn create<E: QueryExecutor + ?Sized>(
        db: &E,
        schema: &str,
        entity: &EntityDef,
        body: &UpdatePayload,
    ) -> Result<Value, AppError> {
        let q = insert(entity, schema, body);
        let row = db
            .fetch_optional(&q.sql, &q.params)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        tracing::info!(table = entity.table, "created row");
        Ok(value_keys_to_camel_case_recursive(row))
    }

    /// Partial update by primary key. Only the entity's updatable fields may appear in `payload`.
    pub async fn update<E: QueryExecutor + ?Sized>(
        db: &E,
        schema: &str,
        entity: &EntityDef,
        id: &Value,
        payload: &UpdatePayload,
    ) -> Result<Value, AppError> {
        let set = partial_update_allowed(payload, &entity.field_map(), entity.updatable)?;
        let q = update(entity, schema, set, id.clone());
        let row = db
            .fetch_optional(&q.sql, &q.params)
            .await?
            .ok_or_else(|| not_found(entity, id))?;
        tracing::info!(table = entity.table, id = %id, fields = payload.len(), "updated row");
        Ok(value_keys_to_camel_case_recursive(row))
    }

    /// Delete by primary key; `NotFound` when nothing was deleted.
    pub async fn delete<E: QueryExecutor + ?Sized>(
        db: &E,
        schema: &str,
        entity: &EntityDef,
        id: &Value,
    ) -> Result<(), AppError> {
        let q = delete(entity, schema);
        db.fetch_optional(&q.sql, std::slice::from_ref(id))
            .await?
            .ok_or_else(|| not_found(entity, id))?;
        tracing::info!(table = entity.table, id = %id, "deleted row");
        Ok(())
    }
}

pub(crate) fn not_found(entity: &EntityDef, id: &Value) -> AppError {
    let id = match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    AppError::NotFound(format!("No {}: {}", entity.label, id))
}
