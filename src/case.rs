//! Case conversion for API responses: row keys snake_case (from DB) -> camelCase (for client).

use serde_json::{Map, Value};

/// Convert a single identifier from snake_case to camelCase.
/// e.g. "num_employees" -> "numEmployees", "company_handle" -> "companyHandle"
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Recursively camelCase all object keys (objects and arrays of objects), keeping key order.
pub fn value_keys_to_camel_case_recursive(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (k, v) in map {
                out.insert(to_camel_case(&k), value_keys_to_camel_case_recursive(v));
            }
            Value::Object(out)
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(value_keys_to_camel_case_recursive).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snake_to_camel() {
        assert_eq!(to_camel_case("num_employees"), "numEmployees");
        assert_eq!(to_camel_case("is_admin"), "isAdmin");
        assert_eq!(to_camel_case("title"), "title");
    }

    #[test]
    fn nested_rows_keep_order() {
        let row = json!({
            "handle": "c1",
            "num_employees": 3,
            "logo_url": null,
            "jobs": [{"id": 1, "company_handle": "c1"}]
        });
        let out = value_keys_to_camel_case_recursive(row);
        let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["handle", "numEmployees", "logoUrl", "jobs"]);
        assert_eq!(out["jobs"][0]["companyHandle"], json!("c1"));
    }
}
