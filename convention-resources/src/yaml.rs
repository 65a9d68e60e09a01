//! YAML documents as JSON values.
//!
//! Service descriptions commonly use CloudFormation short-form tags such as
//! `!Ref` or `!GetAtt`. These are rewritten to their long JSON form so the
//! rest of the pipeline only deals with plain `serde_json::Value`s.

use serde_json::{Map, Number, Value};
use serde_yaml_ng::value::TaggedValue;
use serde_yaml_ng::Value as YamlValue;

/// Parse a YAML document into a JSON value.
///
/// An empty document parses to `Value::Null`.
pub fn parse_yaml(content: &str) -> Result<Value, String> {
    let blank = content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    });
    if blank {
        return Ok(Value::Null);
    }

    let document: YamlValue = serde_yaml_ng::from_str(content).map_err(|e| e.to_string())?;
    yaml_to_json(document)
}

/// Convert a YAML value into a JSON value.
///
/// Scalar mapping keys are rendered as strings. Sequence or mapping keys and
/// non-finite floats have no JSON equivalent and are rejected.
pub fn yaml_to_json(value: YamlValue) -> Result<Value, String> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => convert_number(&n)?,
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(key_to_string(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => expand_intrinsic(*tagged)?,
    })
}

fn convert_number(n: &serde_yaml_ng::Number) -> Result<Value, String> {
    if let Some(i) = n.as_i64() {
        Ok(Value::Number(i.into()))
    } else if let Some(u) = n.as_u64() {
        Ok(Value::Number(u.into()))
    } else {
        let f = n.as_f64().unwrap_or(f64::NAN);
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| format!("number {} cannot be represented", n))
    }
}

fn key_to_string(key: YamlValue) -> Result<String, String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Tagged(tagged) => key_to_string(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => {
            Err("mapping keys must be scalars".to_string())
        }
    }
}

/// Rewrite a tagged value into its CloudFormation long form.
fn expand_intrinsic(tagged: TaggedValue) -> Result<Value, String> {
    let tag = tagged.tag.to_string();
    let name = tag.trim_start_matches('!');
    let inner = yaml_to_json(tagged.value)?;

    let (key, value) = match name {
        "Ref" | "Condition" => (name.to_string(), inner),
        "GetAtt" => {
            let value = match inner {
                Value::String(s) => match s.split_once('.') {
                    Some((resource, attribute)) => Value::Array(vec![
                        Value::String(resource.to_string()),
                        Value::String(attribute.to_string()),
                    ]),
                    None => Value::String(s),
                },
                other => other,
            };
            ("Fn::GetAtt".to_string(), value)
        }
        other => (format!("Fn::{}", other), inner),
    };

    let mut map = Map::new();
    map.insert(key, value);
    Ok(Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_document() {
        let value = parse_yaml("fnA:\n  handler: a.main\n  timeout: 6\n  events:\n    - http: GET /\n")
            .unwrap();
        assert_eq!(
            value,
            json!({"fnA": {"handler": "a.main", "timeout": 6, "events": [{"http": "GET /"}]}})
        );
    }

    #[test]
    fn test_empty_document_is_null() {
        assert_eq!(parse_yaml("").unwrap(), Value::Null);
        assert_eq!(parse_yaml("# only a comment\n").unwrap(), Value::Null);
    }

    #[test]
    fn test_scalar_keys_become_strings() {
        let value = parse_yaml("1: one\ntrue: yes\n").unwrap();
        assert_eq!(value, json!({"1": "one", "true": "yes"}));
    }

    #[test]
    fn test_short_form_intrinsics() {
        let value = parse_yaml(
            "a: !Ref MyBucket\nb: !GetAtt MyQueue.Arn\nc: !Sub 'arn:${AWS::Region}'\nd: !Join [':', [x, y]]\ne: !Condition IsProd\n",
        )
        .unwrap();
        assert_eq!(
            value,
            json!({
                "a": {"Ref": "MyBucket"},
                "b": {"Fn::GetAtt": ["MyQueue", "Arn"]},
                "c": {"Fn::Sub": "arn:${AWS::Region}"},
                "d": {"Fn::Join": [":", ["x", "y"]]},
                "e": {"Condition": "IsProd"}
            })
        );
    }

    #[test]
    fn test_get_att_sequence_form_kept() {
        let value = parse_yaml("b: !GetAtt [MyQueue, Arn]\n").unwrap();
        assert_eq!(value, json!({"b": {"Fn::GetAtt": ["MyQueue", "Arn"]}}));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(parse_yaml("a: [unterminated\n").is_err());
    }

    #[test]
    fn test_complex_key_is_error() {
        assert!(parse_yaml("? [a, b]\n: value\n").is_err());
    }
}
