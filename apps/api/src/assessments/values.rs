//! Coercion between submitted JSON field values and stored hash strings.
//!
//! | submitted       | stored                                |
//! |-----------------|---------------------------------------|
//! | string          | as-is                                 |
//! | number          | decimal text (`5`, `1.5`)             |
//! | boolean         | `True` / `False`                      |
//! | object or array | compact JSON, keys in submitted order |
//! | null            | empty string                          |

use serde_json::{Map, Number, Value};

use crate::store::FieldMap;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Number),
    Boolean(bool),
    Structured(Value),
    Null,
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => FieldValue::Text(s),
            Value::Number(n) => FieldValue::Number(n),
            Value::Bool(b) => FieldValue::Boolean(b),
            Value::Null => FieldValue::Null,
            structured @ (Value::Object(_) | Value::Array(_)) => FieldValue::Structured(structured),
        }
    }
}

impl FieldValue {
    /// Stored string form of this value.
    pub fn normalize(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Boolean(true) => "True".to_string(),
            FieldValue::Boolean(false) => "False".to_string(),
            FieldValue::Structured(v) => v.to_string(),
            FieldValue::Null => String::new(),
        }
    }
}

/// Normalizes every field of a submitted payload.
pub fn normalize_payload(payload: Map<String, Value>) -> FieldMap {
    payload
        .into_iter()
        .map(|(field, value)| (field, FieldValue::from(value).normalize()))
        .collect()
}

/// Best-effort reverse of `normalize`: text that parses as JSON comes back as
/// JSON, anything else stays a plain string.
pub fn decode_stored(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn decode_fields(fields: FieldMap) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(field, raw)| (field, decode_stored(&raw)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_scalars() {
        assert_eq!(FieldValue::from(json!("walks unaided")).normalize(), "walks unaided");
        assert_eq!(FieldValue::from(json!(15)).normalize(), "15");
        assert_eq!(FieldValue::from(json!(2.5)).normalize(), "2.5");
        assert_eq!(FieldValue::from(json!(true)).normalize(), "True");
        assert_eq!(FieldValue::from(json!(false)).normalize(), "False");
        assert_eq!(FieldValue::from(Value::Null).normalize(), "");
    }

    #[test]
    fn test_normalize_structured_to_json_text() {
        let nested = FieldValue::from(json!({"feeding": 10, "bathing": 5}));
        assert!(matches!(nested, FieldValue::Structured(_)));
        assert_eq!(nested.normalize(), r#"{"feeding":10,"bathing":5}"#);
        assert_eq!(FieldValue::from(json!([1, "two"])).normalize(), r#"[1,"two"]"#);
    }

    #[test]
    fn test_normalize_payload_keeps_every_field() {
        let payload = json!({"total": 85, "notes": null, "items": {"stairs": 5}});
        let Value::Object(map) = payload else {
            unreachable!()
        };
        let fields = normalize_payload(map);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["total"], "85");
        assert_eq!(fields["notes"], "");
        assert_eq!(fields["items"], r#"{"stairs":5}"#);
    }

    #[test]
    fn test_decode_structured_round_trip() {
        assert_eq!(decode_stored(r#"{"stairs":5}"#), json!({"stairs": 5}));
        assert_eq!(decode_stored("[1,2]"), json!([1, 2]));
    }

    #[test]
    fn test_decode_scalars_become_json() {
        assert_eq!(decode_stored("85"), json!(85));
        assert_eq!(decode_stored("true"), json!(true));
    }

    #[test]
    fn test_nested_keys_keep_submitted_order() {
        let nested: Value = serde_json::from_str(r#"{"z":1,"a":{"y":2,"b":3}}"#).unwrap();
        assert_eq!(
            FieldValue::from(nested).normalize(),
            r#"{"z":1,"a":{"y":2,"b":3}}"#
        );
    }

    #[test]
    fn test_stored_booleans_stay_text_when_decoded() {
        let stored = FieldValue::from(json!(true)).normalize();
        assert_eq!(decode_stored(&stored), json!("True"));
    }

    #[test]
    fn test_decode_falls_back_to_raw_string() {
        assert_eq!(decode_stored("walks unaided"), json!("walks unaided"));
        assert_eq!(decode_stored(""), json!(""));
        assert_eq!(decode_stored("2023-11-14 22:13:20"), json!("2023-11-14 22:13:20"));
    }
}
