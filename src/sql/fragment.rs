//! Ordered inputs and the `{clause, params}` output shared by the clause builders.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// A clause body (no `SET`/`WHERE` keyword) and the values its `$n` placeholders bind.
/// Placeholder `$k` always binds `params[k - 1]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SqlFragment {
    pub clause: String,
    pub params: Vec<Value>,
}

impl SqlFragment {
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// Append a value and return its 1-based placeholder number.
    pub(crate) fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }

    /// Placeholder number the caller should use for the next value it appends after this fragment.
    pub fn next_placeholder(&self) -> usize {
        self.params.len() + 1
    }
}

/// Fields to change on one row, in the order the client sent them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdatePayload(Vec<(String, Value)>);

impl UpdatePayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.0.push((key.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

impl From<Map<String, Value>> for UpdatePayload {
    /// Keeps the JSON object's insertion order (`serde_json` is built with `preserve_order`).
    fn from(map: Map<String, Value>) -> Self {
        UpdatePayload(map.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for UpdatePayload {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        UpdatePayload(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Logical field name -> physical column. Unmapped names are used as-is.
#[derive(Clone, Debug, Default)]
pub struct FieldMap(HashMap<String, String>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column<'a>(&'a self, field: &'a str) -> &'a str {
        self.0.get(field).map(String::as_str).unwrap_or(field)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FieldMap(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Search criteria from a query string, in request order. May hold keys no filter recognizes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterCriteria(Vec<(String, Value)>);

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.0.push((key.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for FilterCriteria {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        FilterCriteria(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
