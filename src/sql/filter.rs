//! `WHERE` clause for list searches: substring match plus numeric bounds.

use super::fragment::{FilterCriteria, SqlFragment};
use serde_json::Value;

/// Which query keys a search understands and the columns they target.
/// Column names are fixed by the entity definitions, never taken from a request.
#[derive(Clone, Copy, Debug)]
pub struct FilterSpec {
    /// Case-insensitive substring key and the text column it searches.
    pub text_key: &'static str,
    pub text_column: &'static str,
    /// Inclusive lower/upper bound keys on `numeric_column`.
    pub min_key: &'static str,
    pub max_key: &'static str,
    pub numeric_column: &'static str,
    /// Boolean keys that, when `true`, add a fixed predicate with no parameter.
    pub toggles: &'static [(&'static str, &'static str)],
}

impl FilterSpec {
    pub fn recognizes(&self, key: &str) -> bool {
        key == self.text_key
            || key == self.min_key
            || key == self.max_key
            || self.toggles.iter().any(|(k, _)| *k == key)
    }
}

/// Build one predicate per recognized key, in criteria order, joined by ` AND `.
/// Unrecognized keys are dropped. An empty clause means no filter; the caller omits `WHERE`.
pub fn filter(spec: &FilterSpec, criteria: &FilterCriteria) -> SqlFragment {
    let mut frag = SqlFragment::default();
    let mut preds = Vec::new();
    for (key, value) in criteria.iter().filter(|(k, _)| spec.recognizes(k)) {
        if key == spec.min_key {
            let n = frag.push_param(value.clone());
            preds.push(format!("{}>=${}", spec.numeric_column, n));
        } else if key == spec.max_key {
            let n = frag.push_param(value.clone());
            preds.push(format!("{}<=${}", spec.numeric_column, n));
        } else if key == spec.text_key {
            let n = frag.push_param(Value::String(contains_pattern(value)));
            preds.push(format!("{} ILIKE ${}", spec.text_column, n));
        } else if let Some((_, pred)) = spec.toggles.iter().find(|(k, _)| *k == key) {
            if value.as_bool() == Some(true) {
                preds.push((*pred).to_string());
            }
        }
    }
    frag.clause = preds.join(" AND ");
    frag
}

/// `%value%` with LIKE metacharacters escaped so the value matches literally.
fn contains_pattern(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('%');
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COMPANY: FilterSpec = FilterSpec {
        text_key: "name",
        text_column: "name",
        min_key: "minEmployees",
        max_key: "maxEmployees",
        numeric_column: "num_employees",
        toggles: &[],
    };

    const JOB: FilterSpec = FilterSpec {
        text_key: "title",
        text_column: "title",
        min_key: "minSalary",
        max_key: "maxSalary",
        numeric_column: "salary",
        toggles: &[("hasEquity", "equity>0")],
    };

    fn criteria(pairs: &[(&str, Value)]) -> FilterCriteria {
        pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
    }

    #[test]
    fn numeric_bounds() {
        let frag = filter(&JOB, &criteria(&[("minSalary", json!(800)), ("maxSalary", json!(900))]));
        assert_eq!(frag.clause, "salary>=$1 AND salary<=$2");
        assert_eq!(frag.params, vec![json!(800), json!(900)]);
    }

    #[test]
    fn unrecognized_keys_are_dropped() {
        let frag = filter(&JOB, &criteria(&[("minSalary", json!(800)), ("bogus", json!("x"))]));
        assert_eq!(frag.clause, "salary>=$1");
        assert_eq!(frag.params, vec![json!(800)]);

        let frag = filter(&COMPANY, &criteria(&[("bogus", json!("x")), ("maxEmployees", json!(5))]));
        assert_eq!(frag.clause, "num_employees<=$1");
        assert_eq!(frag.params, vec![json!(5)]);
    }

    #[test]
    fn substring_is_parameterized() {
        let frag = filter(&COMPANY, &criteria(&[("name", json!("llc"))]));
        assert_eq!(frag.clause, "name ILIKE $1");
        assert_eq!(frag.params, vec![json!("%llc%")]);
    }

    #[test]
    fn substring_value_never_reaches_clause() {
        let hostile = "x' OR '1'='1";
        let frag = filter(&COMPANY, &criteria(&[("name", json!(hostile))]));
        assert_eq!(frag.clause, "name ILIKE $1");
        assert!(!frag.clause.contains(hostile));
        assert_eq!(frag.params, vec![json!("%x' OR '1'='1%")]);
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        let frag = filter(&JOB, &criteria(&[("title", json!("100%_a\\b"))]));
        assert_eq!(frag.params, vec![json!("%100\\%\\_a\\\\b%")]);
    }

    #[test]
    fn placeholders_follow_criteria_order() {
        let frag = filter(
            &COMPANY,
            &criteria(&[
                ("maxEmployees", json!(900)),
                ("name", json!("llc")),
                ("minEmployees", json!(10)),
            ]),
        );
        assert_eq!(frag.clause, "num_employees<=$1 AND name ILIKE $2 AND num_employees>=$3");
        assert_eq!(frag.params, vec![json!(900), json!("%llc%"), json!(10)]);
    }

    #[test]
    fn no_recognized_keys_gives_empty_clause() {
        let frag = filter(&COMPANY, &criteria(&[("handle", json!("c1"))]));
        assert!(frag.is_empty());
        assert!(frag.params.is_empty());

        assert!(filter(&COMPANY, &FilterCriteria::new()).is_empty());
    }

    #[test]
    fn inverted_range_is_not_rejected() {
        let frag = filter(&COMPANY, &criteria(&[("minEmployees", json!(10)), ("maxEmployees", json!(1))]));
        assert_eq!(frag.clause, "num_employees>=$1 AND num_employees<=$2");
        assert_eq!(frag.params, vec![json!(10), json!(1)]);
    }

    #[test]
    fn toggle_adds_fixed_predicate_only_when_true() {
        let frag = filter(&JOB, &criteria(&[("hasEquity", json!(true)), ("minSalary", json!(5))]));
        assert_eq!(frag.clause, "equity>0 AND salary>=$1");
        assert_eq!(frag.params, vec![json!(5)]);

        let frag = filter(&JOB, &criteria(&[("hasEquity", json!(false))]));
        assert!(frag.is_empty());
    }

    #[test]
    fn same_input_same_output() {
        let c = criteria(&[("title", json!("eng")), ("maxSalary", json!(1))]);
        assert_eq!(filter(&JOB, &c), filter(&JOB, &c));
    }

    #[test]
    fn recognizes_only_spec_keys() {
        assert!(JOB.recognizes("hasEquity"));
        assert!(JOB.recognizes("title"));
        assert!(!JOB.recognizes("name"));
        assert!(!COMPANY.recognizes("hasEquity"));
    }
}
