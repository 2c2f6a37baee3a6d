//! HTTP handlers for companies, jobs and users.

pub mod companies;
pub mod jobs;
pub mod users;

use crate::entity::PkType;
use crate::error::AppError;
use serde_json::{Map, Value};

pub(crate) fn parse_id(id_str: &str, pk_type: PkType) -> Result<Value, AppError> {
    Ok(match pk_type {
        PkType::Int => {
            let n: i64 = id_str.parse().map_err(|_| AppError::BadRequest("invalid id".into()))?;
            Value::Number(n.into())
        }
        PkType::Text => Value::String(id_str.to_string()),
    })
}

pub(crate) fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}
