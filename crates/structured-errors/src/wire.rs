//! Typed field access over decoded JSON objects.

use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Borrow `value` as an object or report which shape was expected.
pub(crate) fn object<'a>(
    value: &'a Value,
    expected: &'static str,
) -> Result<&'a Map<String, Value>, DecodeError> {
    value
        .as_object()
        .ok_or(DecodeError::NotAnObject { expected })
}

/// Read a required string key. Absent and `null` are both missing.
pub(crate) fn required_string(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<String, DecodeError> {
    optional_string(object, field)?.ok_or(DecodeError::MissingField { field })
}

/// Read an optional string key. Absent and `null` both decode as `None`.
pub(crate) fn optional_string(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, DecodeError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(DecodeError::InvalidType {
            field,
            expected: "a string",
        }),
    }
}

/// Read an optional key of any JSON type. `null` decodes as `None`.
pub(crate) fn optional_value(object: &Map<String, Value>, field: &'static str) -> Option<Value> {
    object.get(field).filter(|value| !value.is_null()).cloned()
}

/// Read a required array key.
pub(crate) fn required_array<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a [Value], DecodeError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(DecodeError::MissingField { field }),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(DecodeError::InvalidType {
            field,
            expected: "an array",
        }),
    }
}

/// Parse a JSON document, mapping syntax errors into [`DecodeError::Json`].
pub(crate) fn parse(json: &str) -> Result<Value, DecodeError> {
    serde_json::from_str(json).map_err(|e| DecodeError::Json {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn as_map(value: &Value) -> &Map<String, Value> {
        match value.as_object() {
            Some(map) => map,
            None => panic!("fixture is an object"),
        }
    }

    #[rstest]
    #[case::absent(json!({}))]
    #[case::null(json!({"human": null}))]
    fn optional_string_treats_absent_and_null_alike(#[case] payload: Value) {
        assert_eq!(optional_string(as_map(&payload), "human"), Ok(None));
    }

    #[test]
    fn optional_string_rejects_numbers() {
        let payload = json!({"human": 3});
        assert_eq!(
            optional_string(as_map(&payload), "human"),
            Err(DecodeError::InvalidType {
                field: "human",
                expected: "a string"
            })
        );
    }

    #[test]
    fn required_string_reports_missing_keys() {
        let payload = json!({"code": null});
        assert_eq!(
            required_string(as_map(&payload), "code"),
            Err(DecodeError::MissingField { field: "code" })
        );
    }

    #[test]
    fn required_array_rejects_objects() {
        let payload = json!({"errors": {}});
        assert_eq!(
            required_array(as_map(&payload), "errors"),
            Err(DecodeError::InvalidType {
                field: "errors",
                expected: "an array"
            })
        );
    }

    #[test]
    fn object_rejects_arrays() {
        assert_eq!(
            object(&json!([]), "error").map(|_| ()),
            Err(DecodeError::NotAnObject { expected: "error" })
        );
    }

    #[test]
    fn parse_reports_syntax_errors() {
        assert!(matches!(parse("not json"), Err(DecodeError::Json { .. })));
    }
}
