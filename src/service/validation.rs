//! Request validation from static per-entity rules. Runs before any SQL is built, so the
//! clause builders only ever see known field names with well-typed values.

use crate::error::AppError;
use crate::sql::{FilterCriteria, UpdatePayload};
use regex::Regex;
use serde_json::{Map, Number, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    /// Fraction stored as `numeric`; accepts a number or a numeric string.
    Decimal,
    Bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Email,
    Url,
    Handle,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub format: Option<Format>,
}

impl FieldRule {
    pub const fn new(field: &'static str, kind: FieldKind) -> Self {
        FieldRule {
            field,
            kind,
            required: false,
            nullable: false,
            min_length: None,
            max_length: None,
            minimum: None,
            maximum: None,
            format: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub const fn range(mut self, min: f64, max: Option<f64>) -> Self {
        self.minimum = Some(min);
        self.maximum = max;
        self
    }

    pub const fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }
}

use FieldKind::{Bool, Decimal, Integer, Text};

/// Upper bound for fields stored in `INTEGER` (int4) columns.
const INT4_MAX: f64 = i32::MAX as f64;

pub const COMPANY_RULES: &[FieldRule] = &[
    FieldRule::new("handle", Text).required().length(1, 25).format(Format::Handle),
    FieldRule::new("name", Text).required().length(1, 255),
    FieldRule::new("description", Text).nullable(),
    FieldRule::new("numEmployees", Integer).nullable().range(0.0, Some(INT4_MAX)),
    FieldRule::new("logoUrl", Text).nullable().format(Format::Url),
];

pub const JOB_RULES: &[FieldRule] = &[
    FieldRule::new("title", Text).required().length(1, 255),
    FieldRule::new("salary", Integer).nullable().range(0.0, Some(INT4_MAX)),
    FieldRule::new("equity", Decimal).nullable().range(0.0, Some(1.0)),
    FieldRule::new("companyHandle", Text).required().length(1, 25),
];

pub const USER_RULES: &[FieldRule] = &[
    FieldRule::new("username", Text).required().length(1, 25),
    FieldRule::new("firstName", Text).required().length(1, 30),
    FieldRule::new("lastName", Text).required().length(1, 30),
    FieldRule::new("email", Text).required().length(6, 60).format(Format::Email),
    FieldRule::new("isAdmin", Bool),
];

pub const COMPANY_QUERY_RULES: &[FieldRule] = &[
    FieldRule::new("name", Text).length(1, 255),
    FieldRule::new("minEmployees", Integer).range(0.0, Some(INT4_MAX)),
    FieldRule::new("maxEmployees", Integer).range(0.0, Some(INT4_MAX)),
];

pub const JOB_QUERY_RULES: &[FieldRule] = &[
    FieldRule::new("title", Text).length(1, 255),
    FieldRule::new("minSalary", Integer).range(0.0, Some(INT4_MAX)),
    FieldRule::new("maxSalary", Integer).range(0.0, Some(INT4_MAX)),
    FieldRule::new("hasEquity", Bool),
];

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body: all required fields present, no unknown fields.
    /// Returns the (coerced) fields in request order.
    pub fn validate_create(body: Map<String, Value>, rules: &[FieldRule]) -> Result<UpdatePayload, AppError> {
        for rule in rules {
            let missing = body.get(rule.field).map_or(true, Value::is_null);
            if rule.required && missing {
                return Err(AppError::Validation(format!("{} is required", rule.field)));
            }
        }
        let mut out = UpdatePayload::new();
        for (field, v) in body {
            let rule = find_rule(rules, &field)
                .ok_or_else(|| AppError::Validation(format!("unknown field: {}", field)))?;
            let v = validate_field(rule, v)?;
            out.push(field, v);
        }
        Ok(out)
    }

    /// Validate a PATCH body: only `updatable` fields, each well-formed. Required is not
    /// enforced for missing fields, and an empty body passes through untouched.
    pub fn validate_update(
        body: Map<String, Value>,
        rules: &[FieldRule],
        updatable: &[&str],
    ) -> Result<UpdatePayload, AppError> {
        let mut out = UpdatePayload::new();
        for (field, v) in body {
            let rule = find_rule(rules, &field)
                .filter(|r| updatable.contains(&r.field))
                .ok_or_else(|| AppError::Validation(format!("field not updatable: {}", field)))?;
            if rule.required && v.is_null() {
                return Err(AppError::Validation(format!("{} cannot be null", field)));
            }
            let v = validate_field(rule, v)?;
            out.push(field, v);
        }
        Ok(out)
    }

    /// Turn raw query-string pairs into typed filter criteria. Keys with a rule must parse;
    /// other keys are passed through as strings and left for the filter builder to drop.
    pub fn coerce_filter_query(
        pairs: Vec<(String, String)>,
        rules: &[FieldRule],
    ) -> Result<FilterCriteria, AppError> {
        let mut out = FilterCriteria::new();
        for (key, raw) in pairs {
            let Some(rule) = find_rule(rules, &key) else {
                out.push(key, Value::String(raw));
                continue;
            };
            let v = match rule.kind {
                Integer => raw
                    .trim()
                    .parse::<i64>()
                    .map(|n| Value::Number(n.into()))
                    .map_err(|_| AppError::Validation(format!("{} must be an integer", key)))?,
                Bool => match raw.trim().to_ascii_lowercase().as_str() {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    _ => return Err(AppError::Validation(format!("{} must be true or false", key))),
                },
                Decimal => parse_decimal(&key, &raw)?,
                Text => Value::String(raw),
            };
            let v = validate_field(rule, v)?;
            out.push(key, v);
        }
        Ok(out)
    }
}

fn find_rule<'a>(rules: &'a [FieldRule], field: &str) -> Option<&'a FieldRule> {
    rules.iter().find(|r| r.field == field)
}

fn parse_decimal(field: &str, s: &str) -> Result<Value, AppError> {
    s.trim()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| AppError::Validation(format!("{} must be a number", field)))
}

/// Check one value against its rule, returning it in the form it should be bound with.
fn validate_field(rule: &FieldRule, v: Value) -> Result<Value, AppError> {
    let col = rule.field;
    if v.is_null() {
        if rule.nullable {
            return Ok(v);
        }
        return Err(AppError::Validation(format!("{} cannot be null", col)));
    }
    let v = match (rule.kind, v) {
        (Text, v @ Value::String(_)) => v,
        (Integer, Value::Number(n)) if n.is_i64() => Value::Number(n),
        (Decimal, Value::Number(n)) => Value::Number(n),
        (Decimal, Value::String(s)) => parse_decimal(col, &s)?,
        (Bool, v @ Value::Bool(_)) => v,
        (kind, _) => {
            return Err(AppError::Validation(format!(
                "{} must be {}",
                col,
                match kind {
                    Text => "a string",
                    Integer => "an integer",
                    Decimal => "a number",
                    Bool => "a boolean",
                }
            )))
        }
    };
    if let Some(s) = v.as_str() {
        let len = s.chars().count();
        if let Some(max) = rule.max_length {
            if len > max {
                return Err(AppError::Validation(format!("{} must be at most {} characters", col, max)));
            }
        }
        if let Some(min) = rule.min_length {
            if len < min {
                return Err(AppError::Validation(format!("{} must be at least {} characters", col, min)));
            }
        }
        if let Some(format) = rule.format {
            validate_format(col, s, format)?;
        }
    }
    if let Some(n) = v.as_f64() {
        if let Some(min) = rule.minimum {
            if n < min {
                return Err(AppError::Validation(format!("{} must be at least {}", col, min)));
            }
        }
        if let Some(max) = rule.maximum {
            if n > max {
                return Err(AppError::Validation(format!("{} must be at most {}", col, max)));
            }
        }
    }
    Ok(v)
}

fn validate_format(col: &str, s: &str, format: Format) -> Result<(), AppError> {
    let (pattern, what) = match format {
        Format::Email => (r"^[^@\s]+@[^@\s]+\.[^@\s]+$", "a valid email"),
        Format::Url => (r"^(https?://|/)\S+$", "a url or absolute path"),
        Format::Handle => (r"^[a-z0-9][a-z0-9-]*$", "lowercase letters, digits and dashes"),
    };
    let re = Regex::new(pattern).map_err(|_| AppError::Validation(format!("invalid pattern for {}", col)))?;
    if !re.is_match(s) {
        return Err(AppError::Validation(format!("{} must be {}", col, what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{COMPANIES, JOBS, USERS};
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    fn pairs(p: &[(&str, &str)]) -> Vec<(String, String)> {
        p.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn create_requires_fields() {
        let err = RequestValidator::validate_create(obj(json!({"title": "new", "salary": 10000})), JOB_RULES)
            .unwrap_err();
        assert_eq!(err.to_string(), "validation: companyHandle is required");
    }

    #[test]
    fn create_rejects_unknown_fields() {
        let body = json!({"title": "new", "companyHandle": "c2", "logoUrl": "not-a-url"});
        let err = RequestValidator::validate_create(obj(body), JOB_RULES).unwrap_err();
        assert_eq!(err.to_string(), "validation: unknown field: logoUrl");
    }

    #[test]
    fn create_coerces_equity_string_and_keeps_order() {
        let body = json!({"title": "new", "salary": 10000, "equity": "0.5", "companyHandle": "c2"});
        let payload = RequestValidator::validate_create(obj(body), JOB_RULES).unwrap();
        let fields: Vec<&str> = payload.iter().map(|(k, _)| k).collect();
        assert_eq!(fields, ["title", "salary", "equity", "companyHandle"]);
        assert_eq!(payload.get("equity"), Some(&json!(0.5)));
    }

    #[test]
    fn equity_out_of_range() {
        let body = json!({"title": "t", "equity": 1.5, "companyHandle": "c2"});
        assert!(RequestValidator::validate_create(obj(body), JOB_RULES).is_err());
    }

    #[test]
    fn integers_must_fit_int4_columns() {
        let body = json!({"title": "t", "salary": 3000000000u64, "companyHandle": "c1"});
        let err = RequestValidator::validate_create(obj(body), JOB_RULES).unwrap_err();
        assert_eq!(err.to_string(), "validation: salary must be at most 2147483647");

        let err = RequestValidator::validate_update(
            obj(json!({"numEmployees": 2147483648i64})),
            COMPANY_RULES,
            COMPANIES.updatable,
        )
        .unwrap_err();
        assert_eq!(err.status_and_code().1, "validation_error");

        let body = json!({"title": "t", "salary": 2147483647, "companyHandle": "c1"});
        assert!(RequestValidator::validate_create(obj(body), JOB_RULES).is_ok());
    }

    #[test]
    fn nullable_numbers_accept_null() {
        let payload = RequestValidator::validate_update(
            obj(json!({"salary": null, "equity": null})),
            JOB_RULES,
            JOBS.updatable,
        )
        .unwrap();
        assert_eq!(payload.get("salary"), Some(&Value::Null));
        assert_eq!(payload.get("equity"), Some(&Value::Null));
    }

    #[test]
    fn formats() {
        let bad_email = json!({"username": "u", "firstName": "F", "lastName": "L", "email": "nope"});
        assert!(RequestValidator::validate_create(obj(bad_email), USER_RULES).is_err());

        let bad_handle = json!({"handle": "Bad Handle", "name": "N"});
        assert!(RequestValidator::validate_create(obj(bad_handle), COMPANY_RULES).is_err());

        let ok = json!({"handle": "c-1", "name": "C1", "logoUrl": "/logos/logo3.png"});
        assert!(RequestValidator::validate_create(obj(ok), COMPANY_RULES).is_ok());
    }

    #[test]
    fn update_enforces_allow_list() {
        let err = RequestValidator::validate_update(
            obj(json!({"handle": "c-new"})),
            COMPANY_RULES,
            COMPANIES.updatable,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "validation: field not updatable: handle");

        let err = RequestValidator::validate_update(obj(json!({"username": "x"})), USER_RULES, USERS.updatable)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn update_allows_empty_body_through() {
        let payload = RequestValidator::validate_update(Map::new(), JOB_RULES, JOBS.updatable).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn update_checks_types() {
        let err = RequestValidator::validate_update(obj(json!({"salary": "lots"})), JOB_RULES, JOBS.updatable)
            .unwrap_err();
        assert_eq!(err.to_string(), "validation: salary must be an integer");

        let err = RequestValidator::validate_update(obj(json!({"title": null})), JOB_RULES, JOBS.updatable)
            .unwrap_err();
        assert_eq!(err.to_string(), "validation: title cannot be null");

        let ok = RequestValidator::validate_update(obj(json!({"logoUrl": null})), COMPANY_RULES, COMPANIES.updatable)
            .unwrap();
        assert_eq!(ok.get("logoUrl"), Some(&Value::Null));
    }

    #[test]
    fn query_coercion_types_known_keys() {
        let c = RequestValidator::coerce_filter_query(
            pairs(&[("minSalary", "800"), ("hasEquity", "TRUE"), ("title", "eng")]),
            JOB_QUERY_RULES,
        )
        .unwrap();
        let got: Vec<(&str, &Value)> = c.iter().collect();
        assert_eq!(
            got,
            vec![
                ("minSalary", &json!(800)),
                ("hasEquity", &json!(true)),
                ("title", &json!("eng")),
            ]
        );
    }

    #[test]
    fn query_coercion_passes_unknown_keys_through() {
        let c = RequestValidator::coerce_filter_query(
            pairs(&[("willBeFiltered", "YES"), ("minEmployees", "1")]),
            COMPANY_QUERY_RULES,
        )
        .unwrap();
        let got: Vec<(&str, &Value)> = c.iter().collect();
        assert_eq!(got, vec![("willBeFiltered", &json!("YES")), ("minEmployees", &json!(1))]);
    }

    #[test]
    fn query_coercion_rejects_bad_values() {
        assert!(RequestValidator::coerce_filter_query(pairs(&[("minEmployees", "ten")]), COMPANY_QUERY_RULES).is_err());
        assert!(RequestValidator::coerce_filter_query(pairs(&[("maxEmployees", "-1")]), COMPANY_QUERY_RULES).is_err());
        assert!(RequestValidator::coerce_filter_query(pairs(&[("hasEquity", "yes")]), JOB_QUERY_RULES).is_err());
        assert!(RequestValidator::coerce_filter_query(pairs(&[("name", "")]), COMPANY_QUERY_RULES).is_err());
    }

    #[test]
    fn query_allows_inverted_range() {
        let c = RequestValidator::coerce_filter_query(
            pairs(&[("minEmployees", "10"), ("maxEmployees", "1")]),
            COMPANY_QUERY_RULES,
        )
        .unwrap();
        assert_eq!(c.iter().count(), 2);
    }
}
