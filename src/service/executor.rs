//! Persistence seam: run a statement with positional params and get rows back as JSON objects.

use crate::error::AppError;
use crate::sql::PgBindValue;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::{PgPool, Postgres};

type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Value>, AppError>;

    async fn fetch_optional(&self, sql: &str, params: &[Value]) -> Result<Option<Value>, AppError>;
}

#[async_trait]
impl QueryExecutor for PgPool {
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let rows = bind_all(sql, params)?.fetch_all(self).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn fetch_optional(&self, sql: &str, params: &[Value]) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let row = bind_all(sql, params)?.fetch_optional(self).await?;
        Ok(row.map(|r| row_to_json(&r)))
    }
}

/// Bind every param with its own declared type. Statements are not cached: the connection
/// cache keys on SQL text only, and the same `SET` clause may carry a null one call and a
/// number the next.
fn bind_all<'q>(sql: &'q str, params: &[Value]) -> Result<PgQuery<'q>, AppError> {
    let mut query = sqlx::query(sql).persistent(false);
    for p in params {
        query = query.bind(PgBindValue::from_json(p)?);
    }
    Ok(query)
}

fn row_to_json(row: &sqlx::postgres::PgRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        let v = cell_to_value(row, name);
        map.insert(name.to_string(), v);
    }
    Value::Object(map)
}

fn cell_to_value(row: &sqlx::postgres::PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    Value::Null
}
