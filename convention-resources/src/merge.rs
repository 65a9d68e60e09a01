//! Deep merge of resource mappings.
//!
//! Shared keys holding mappings on both sides are merged recursively. Every
//! other value (scalars, arrays, a mapping meeting a non-mapping) is replaced
//! wholesale by the incoming one; arrays are never concatenated.

use serde_json::{Map, Value};

/// A mapping of resource names to their definitions.
pub type Resources = Map<String, Value>;

/// Merge `addition` into `accumulator` in place and return the accumulator.
///
/// # Example
///
/// ```
/// use convention_resources::merge_into;
/// use serde_json::json;
///
/// let mut acc = json!({"fnA": {"handler": "a.main", "events": [1]}});
/// let addition = json!({"fnA": {"timeout": 6, "events": [2]}});
/// merge_into(
///     acc.as_object_mut().unwrap(),
///     addition.as_object().unwrap().clone(),
/// );
/// assert_eq!(
///     acc,
///     json!({"fnA": {"handler": "a.main", "events": [2], "timeout": 6}})
/// );
/// ```
pub fn merge_into(accumulator: &mut Resources, addition: Resources) -> &mut Resources {
    for (key, incoming) in addition {
        match accumulator.get_mut(&key) {
            Some(Value::Object(existing)) if incoming.is_object() => {
                if let Value::Object(incoming) = incoming {
                    merge_into(existing, incoming);
                }
            }
            _ => {
                accumulator.insert(key, incoming);
            }
        }
    }
    accumulator
}

/// The first top-level key of `addition` already present in `accumulator`.
pub fn first_duplicate_key<'a>(accumulator: &Resources, addition: &'a Resources) -> Option<&'a str> {
    addition
        .keys()
        .find(|key| accumulator.contains_key(key.as_str()))
        .map(String::as_str)
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Resources {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_disjoint_keys_are_combined() {
        let mut acc = map(json!({"fnA": {"handler": "a"}}));
        merge_into(&mut acc, map(json!({"fnB": {"handler": "b"}})));
        assert_eq!(
            Value::Object(acc),
            json!({"fnA": {"handler": "a"}, "fnB": {"handler": "b"}})
        );
    }

    #[test]
    fn test_nested_mappings_merge_recursively() {
        let mut acc = map(json!({"fnA": {"handler": "a", "env": {"X": "1"}}}));
        merge_into(&mut acc, map(json!({"fnA": {"timeout": 3, "env": {"Y": "2"}}})));
        assert_eq!(
            Value::Object(acc),
            json!({"fnA": {"handler": "a", "env": {"X": "1", "Y": "2"}, "timeout": 3}})
        );
    }

    #[test]
    fn test_arrays_and_scalars_are_replaced() {
        let mut acc = map(json!({"a": [1, 2, 3], "b": "old", "c": {"x": 1}}));
        merge_into(&mut acc, map(json!({"a": [9], "b": "new", "c": "flat"})));
        assert_eq!(Value::Object(acc), json!({"a": [9], "b": "new", "c": "flat"}));
    }

    #[test]
    fn test_scalar_replaced_by_mapping() {
        let mut acc = map(json!({"a": 1}));
        merge_into(&mut acc, map(json!({"a": {"nested": true}})));
        assert_eq!(Value::Object(acc), json!({"a": {"nested": true}}));
    }

    #[test]
    fn test_null_overwrites() {
        let mut acc = map(json!({"a": {"x": 1}}));
        merge_into(&mut acc, map(json!({"a": null})));
        assert_eq!(Value::Object(acc), json!({"a": null}));
    }

    #[test]
    fn test_merge_twice_converges() {
        let addition = map(json!({"fnA": {"handler": "a", "events": [{"http": "GET /"}]}}));
        let mut acc = Resources::new();
        merge_into(&mut acc, addition.clone());
        let once = acc.clone();

        assert_eq!(first_duplicate_key(&acc, &addition), Some("fnA"));
        merge_into(&mut acc, addition);
        assert_eq!(acc, once);
    }

    #[test]
    fn test_returns_same_accumulator() {
        let mut acc = map(json!({"a": 1}));
        let returned = merge_into(&mut acc, map(json!({"b": 2})));
        returned.insert("c".to_string(), json!(3));
        assert_eq!(acc.len(), 3);
    }

    #[test]
    fn test_duplicate_key_detection() {
        let acc = map(json!({"fnA": {}, "fnB": {}}));
        let addition = map(json!({"fnC": {}, "fnB": {}, "fnA": {}}));
        assert_eq!(first_duplicate_key(&acc, &addition), Some("fnB"));

        let fresh = map(json!({"fnZ": {}}));
        assert_eq!(first_duplicate_key(&acc, &fresh), None);
    }
}
