//! Decoding of raw JSON payloads as a receiving service sees them.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use rstest::rstest;
use serde::Deserialize;
use structured_errors::{ClientFailure, DecodeError, StructuredError, StructuredErrorList};

const LIST_JSON: &str = r#"{
    "errors": [
        {
            "id": "0f3e5b52-3bb4-4c55-9d0e-5a8f1f0c2d11@1700000000123",
            "code": "invalid_field",
            "message": "city must not be empty",
            "human": "Please enter a city",
            "field": "city"
        },
        {
            "id": "7a1c0d8e-2f4b-4e6a-9c3d-1b2a3c4d5e6f@1700000000124",
            "code": "rate_limited",
            "message": "too many attempts",
            "meta": {"retryAfter": 30}
        }
    ]
}"#;

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RetryMeta {
    retry_after: u32,
}

#[test]
fn decodes_a_list_payload() {
    let list = StructuredErrorList::from_json(LIST_JSON).expect("valid payload");

    assert_eq!(list.len(), 2);
    assert!(list.has_code("rate_limited"));
    assert_eq!(list.human_text(), "Please enter a city");
    assert_eq!(list.effective_status_code(), None);
}

#[test]
fn decoded_meta_can_be_read_by_shape() {
    let list = StructuredErrorList::from_json(LIST_JSON).expect("valid payload");
    let limited = list.find_by_code("rate_limited").expect("code present");

    assert_eq!(
        limited.decode_meta::<RetryMeta>(),
        Ok(RetryMeta { retry_after: 30 })
    );
}

#[test]
fn nested_responses_can_be_namespaced_after_decoding() {
    let mut failure = ClientFailure::from_json(LIST_JSON).expect("valid payload");
    failure.add_namespace("shipping");

    let fields: Vec<_> = failure.errors().iter().map(StructuredError::field).collect();
    assert_eq!(fields, [Some("shipping.city"), Some("shipping")]);
}

#[test]
fn serde_and_decode_agree() {
    let via_serde: StructuredErrorList = serde_json::from_str(LIST_JSON).expect("valid payload");
    let via_decode = StructuredErrorList::from_json(LIST_JSON).expect("valid payload");
    assert_eq!(via_serde, via_decode);
}

#[rstest]
#[case::malformed_json("not valid json")]
#[case::truncated(r#"{"errors": ["#)]
fn rejects_json_with_parse_error(#[case] json: &str) {
    let result = StructuredErrorList::from_json(json);
    assert!(matches!(result, Err(DecodeError::Json { .. })));
}

#[rstest]
#[case::missing_errors(r#"{}"#, DecodeError::MissingField { field: "errors" })]
#[case::errors_not_array(
    r#"{"errors": {"id": "1"}}"#,
    DecodeError::InvalidType { field: "errors", expected: "an array" }
)]
#[case::element_missing_message(
    r#"{"errors": [{"id": "1", "code": "c"}]}"#,
    DecodeError::Element {
        index: 0,
        source: Box::new(DecodeError::MissingField { field: "message" }),
    }
)]
#[case::element_with_numeric_human(
    r#"{"errors": [{"id": "1", "code": "c", "message": "m", "human": 7}]}"#,
    DecodeError::Element {
        index: 0,
        source: Box::new(DecodeError::InvalidType { field: "human", expected: "a string" }),
    }
)]
fn rejects_invalid_list_payloads(#[case] json: &str, #[case] expected: DecodeError) {
    assert_eq!(StructuredErrorList::from_json(json), Err(expected));
}
