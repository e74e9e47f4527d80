//! Error types for the structured-errors crate.
//!
//! These cover constructor validation and wire decoding. They describe
//! problems with *building* or *reading* an error payload; the payloads
//! themselves are [`crate::StructuredError`] and
//! [`crate::StructuredErrorList`].

use thiserror::Error;

/// Validation failures raised when constructing a [`crate::StructuredError`]
/// or collapsing a list into a [`crate::ClientFailure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The machine-readable code is empty or whitespace.
    #[error("error code must not be empty")]
    EmptyCode,
    /// The technical message is empty or whitespace.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// An explicitly supplied identifier is empty or whitespace.
    #[error("error identifier must not be empty")]
    EmptyId,
    /// A failure was requested from a list holding no errors.
    #[error("error list must not be empty")]
    EmptyList,
}

/// Errors raised while decoding a wire payload.
///
/// Decoding never yields a partially constructed value: any of these
/// variants means nothing was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The payload root is not a JSON object.
    #[error("expected {expected} object")]
    NotAnObject {
        /// Name of the shape that was expected.
        expected: &'static str,
    },

    /// A required key is absent or `null`.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Key that was looked up.
        field: &'static str,
    },

    /// A key is present but holds the wrong JSON type.
    #[error("field '{field}' must be {expected}")]
    InvalidType {
        /// Key that was looked up.
        field: &'static str,
        /// Description of the accepted JSON type.
        expected: &'static str,
    },

    /// Required strings were present but failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// An element of an `errors` array failed to decode.
    #[error("errors[{index}]: {source}")]
    Element {
        /// Position of the failing element.
        index: usize,
        /// Failure reported for that element.
        source: Box<DecodeError>,
    },

    /// A string payload is not valid JSON.
    #[error("invalid error JSON: {message}")]
    Json {
        /// Description of the parse error.
        message: String,
    },

    /// The `meta` payload does not match the requested shape.
    #[error("meta does not match the requested shape: {message}")]
    Meta {
        /// Description of the mismatch.
        message: String,
    },
}
