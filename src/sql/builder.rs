//! Builds full parameterized statements from an entity definition, splicing in the
//! clause fragments produced by `partial_update` and `filter`.

use super::fragment::{SqlFragment, UpdatePayload};
use crate::entity::{ColumnKind, EntityDef};
use serde_json::Value;

/// Quote identifier for PostgreSQL (safe: only from entity definitions or config).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// SELECT list: numeric columns as col::text so precision survives the trip to JSON.
fn select_column_list(entity: &EntityDef) -> String {
    entity
        .columns
        .iter()
        .map(|c| match c.kind {
            ColumnKind::Decimal => format!("{0}::text AS {0}", c.name),
            _ => c.name.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT by primary key. Caller binds the id as `$1`.
pub fn select_by_pk(entity: &EntityDef, schema: &str) -> QueryBuf {
    select_by_column(entity, schema, entity.pk)
}

/// SELECT rows whose `column` equals `$1`, in the entity's list order.
pub fn select_by_column(entity: &EntityDef, schema: &str, column: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = $1 ORDER BY {}",
        select_column_list(entity),
        qualified_table(schema, entity.table),
        column,
        entity.order_by
    );
    q
}

/// SELECT list, narrowed by a filter fragment when it has any predicates.
pub fn select_list(entity: &EntityDef, schema: &str, filter: &SqlFragment) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_clause = if filter.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", filter.clause)
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {}",
        select_column_list(entity),
        qualified_table(schema, entity.table),
        where_clause,
        entity.order_by
    );
    q.params = filter.params.clone();
    q
}

/// INSERT one row. Body keys are API field names, translated through the field map;
/// the caller has already checked them against the entity's columns.
pub fn insert(entity: &EntityDef, schema: &str, body: &UpdatePayload) -> QueryBuf {
    let mut q = QueryBuf::new();
    let map = entity.field_map();
    let mut cols = Vec::with_capacity(body.len());
    let mut placeholders = Vec::with_capacity(body.len());
    for (field, value) in body.iter() {
        let n = q.push_param(value.clone());
        cols.push(map.column(field).to_string());
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        qualified_table(schema, entity.table),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(entity)
    );
    q
}

/// INSERT that yields no row instead of failing when the row already exists.
pub fn insert_or_skip(entity: &EntityDef, schema: &str, body: &UpdatePayload) -> QueryBuf {
    let mut q = insert(entity, schema, body);
    let returning = q.sql.find(" RETURNING ").unwrap_or(q.sql.len());
    q.sql.insert_str(returning, " ON CONFLICT DO NOTHING");
    q
}

/// UPDATE by primary key using a `SET` fragment. The id binds to the placeholder after the fragment's.
pub fn update(entity: &EntityDef, schema: &str, set: SqlFragment, id: Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let id_param = set.next_placeholder();
    q.params = set.params;
    q.params.push(id);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        qualified_table(schema, entity.table),
        set.clause,
        entity.pk,
        id_param,
        select_column_list(entity)
    );
    q
}

/// DELETE by primary key. Caller binds the id as `$1`.
pub fn delete(entity: &EntityDef, schema: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "DELETE FROM {} WHERE {} = $1 RETURNING {}",
        qualified_table(schema, entity.table),
        entity.pk,
        entity.pk
    );
    q
}
