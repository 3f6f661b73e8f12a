//! JSON field projection for `--json field,field` output
//!
//! Projection keeps the requested keys in the order they were requested.
//! Unknown names are dropped without error.

use serde_json::{Map, Value};
use tracing::debug;

/// Split a `--json` argument into field names, ignoring blanks
pub fn parse_fields(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(String::from)
        .collect()
}

/// Select `fields` from `obj`.
///
/// `None` or an empty list returns the object unchanged.
pub fn project(obj: &Map<String, Value>, fields: Option<&[String]>) -> Map<String, Value> {
    let fields = match fields {
        Some(fields) if !fields.is_empty() => fields,
        _ => return obj.clone(),
    };

    let mut projected = Map::new();
    for field in fields {
        if projected.contains_key(field) {
            continue;
        }
        match obj.get(field) {
            Some(value) => {
                projected.insert(field.clone(), value.clone());
            }
            None => debug!(field = %field, "dropping unknown field from projection"),
        }
    }
    projected
}

/// Apply [`project`] to an object, or to every object in an array.
///
/// Other JSON values pass through untouched.
pub fn project_value(value: Value, fields: Option<&[String]>) -> Value {
    match value {
        Value::Object(obj) => Value::Object(project(&obj, fields)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| project_value(item, fields))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Map<String, Value> {
        match json!({"number": 7, "title": "Fix", "state": "open"}) {
            Value::Object(obj) => obj,
            _ => unreachable!(),
        }
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_project_identity() {
        let obj = sample();
        assert_eq!(project(&obj, None), obj);
        assert_eq!(project(&obj, Some(&[])), obj);
    }

    #[test]
    fn test_project_unknown_field_yields_empty() {
        let obj = sample();
        assert!(project(&obj, Some(&fields(&["missing"]))).is_empty());
    }

    #[test]
    fn test_project_dedups() {
        let obj = sample();
        let projected = project(&obj, Some(&fields(&["title", "title"])));
        assert_eq!(projected.len(), 1);
        assert_eq!(projected["title"], json!("Fix"));
    }

    #[test]
    fn test_project_follows_requested_order() {
        let obj = sample();
        let projected = project(&obj, Some(&fields(&["state", "missing", "number"])));
        let keys: Vec<&String> = projected.keys().collect();
        assert_eq!(keys, vec!["state", "number"]);
    }

    #[test]
    fn test_project_value_array() {
        let value = json!([
            {"number": 1, "title": "a"},
            {"number": 2, "title": "b"}
        ]);
        let projected = project_value(value, Some(&fields(&["number"])));
        assert_eq!(projected, json!([{"number": 1}, {"number": 2}]));
    }

    #[test]
    fn test_project_value_scalar_passthrough() {
        assert_eq!(project_value(json!("diff"), Some(&fields(&["x"]))), json!("diff"));
    }

    #[test]
    fn test_parse_fields() {
        assert_eq!(parse_fields("a, b,,c "), fields(&["a", "b", "c"]));
        assert!(parse_fields("").is_empty());
    }
}
