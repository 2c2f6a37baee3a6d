//! `SET` clause for a partial update.
//!
//! Column names are written into the clause unquoted and unescaped. They must come from
//! a developer-controlled allow-list (see `partial_update_allowed`), never straight from a
//! request body.

use super::fragment::{FieldMap, SqlFragment, UpdatePayload};
use crate::error::SqlBuildError;

/// Build `col1=$1, col2=$2, ...` from the payload, in payload order.
/// Each key is translated through `field_map`; unmapped keys are used as the column name.
pub fn partial_update(
    payload: &UpdatePayload,
    field_map: &FieldMap,
) -> Result<SqlFragment, SqlBuildError> {
    if payload.is_empty() {
        return Err(SqlBuildError::InvalidInput);
    }
    let mut frag = SqlFragment::default();
    let mut sets = Vec::with_capacity(payload.len());
    for (key, value) in payload.iter() {
        let n = frag.push_param(value.clone());
        sets.push(format!("{}=${}", field_map.column(key), n));
    }
    frag.clause = sets.join(", ");
    Ok(frag)
}

/// Same as `partial_update`, but every payload key must be in `allowed`.
pub fn partial_update_allowed(
    payload: &UpdatePayload,
    field_map: &FieldMap,
    allowed: &[&str],
) -> Result<SqlFragment, SqlBuildError> {
    if let Some((key, _)) = payload.iter().find(|(k, _)| !allowed.contains(k)) {
        return Err(SqlBuildError::FieldNotAllowed(key.to_string()));
    }
    partial_update(payload, field_map)
}
