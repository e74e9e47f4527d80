//! A single client-facing failure.
//!
//! [`StructuredError`] pairs a stable machine-readable `code` with a
//! technical `message`, and optionally a pre-localized `human` text, a
//! dot-separated `field` path, a transport `status_code` hint, and an opaque
//! `meta` payload. It is transport agnostic: adapters read
//! [`StructuredError::status_code`] and [`StructuredError::human_text`] to
//! shape their responses.

use std::fmt;

use mockable::{Clock, DefaultClock};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::{DecodeError, ValidationError};
use crate::id::generate_id_with;
use crate::wire;

/// A classified, serializable failure reported to a client.
///
/// ## Invariants
/// - `code` and `message` are non-empty once trimmed of whitespace.
/// - `status_code` never crosses the wire; it is a hint for the local
///   transport only.
///
/// # Examples
/// ```
/// use structured_errors::StructuredError;
///
/// let err = StructuredError::new("invalid_field", "city is required")
///     .with_field("city")
///     .with_status_code(400);
/// assert_eq!(err.code(), "invalid_field");
/// assert_eq!(err.human_text(), "city is required");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(try_from = "Value", into = "StructuredErrorDto")]
pub struct StructuredError {
    #[cfg_attr(
        feature = "openapi",
        schema(example = "0f3e5b52-3bb4-4c55-9d0e-5a8f1f0c2d11@1700000000123")
    )]
    id: String,
    #[cfg_attr(feature = "openapi", schema(example = "invalid_field"))]
    code: String,
    #[cfg_attr(feature = "openapi", schema(example = "city must not be empty"))]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "Please enter a city"))]
    human: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "address.city"))]
    field: Option<String>,
    #[serde(skip)]
    status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Value>,
}

impl StructuredError {
    /// Create a new error, panicking if validation fails.
    ///
    /// # Panics
    ///
    /// Panics when `code` or `message` is empty. Use
    /// [`StructuredError::try_new`] for untrusted input.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("structured errors must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the code and message.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCode`] or
    /// [`ValidationError::EmptyMessage`] for blank input.
    pub fn try_new(
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::try_new_with_clock(code, message, &DefaultClock)
    }

    /// Fallible constructor that stamps the generated id with `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a blank code or message.
    pub fn try_new_with_clock(
        code: impl Into<String>,
        message: impl Into<String>,
        clock: &dyn Clock,
    ) -> Result<Self, ValidationError> {
        let code = code.into();
        let message = message.into();
        validate(&code, &message)?;
        Ok(Self {
            id: generate_id_with(clock),
            code,
            message,
            human: None,
            field: None,
            status_code: None,
            meta: None,
        })
    }

    /// Attach an end-user facing description.
    #[must_use]
    pub fn with_human(mut self, human: impl Into<String>) -> Self {
        self.human = Some(human.into());
        self
    }

    /// Locate the error at a dot-separated input path.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Attach a status hint for the transport layer.
    #[must_use]
    pub const fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Attach an out-of-band payload for callers that know its shape.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use structured_errors::StructuredError;
    ///
    /// let err = StructuredError::new("rate_limited", "too many requests")
    ///     .with_meta(json!({ "retryAfter": 30 }));
    /// assert!(err.meta().is_some());
    /// ```
    #[must_use]
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Replace the generated identifier, panicking if it is blank.
    ///
    /// # Panics
    ///
    /// Panics when `id` is empty. Use [`StructuredError::try_with_id`] for
    /// untrusted input.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        match self.try_with_id(id) {
            Ok(value) => value,
            Err(err) => panic!("error identifiers must satisfy validation: {err}"),
        }
    }

    /// Replace the generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyId`] when `id` is blank.
    pub fn try_with_id(mut self, id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        self.id = id;
        Ok(self)
    }

    /// Opaque identifier used for tracing and deduplication.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    /// Technical, developer-facing description.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// End-user facing description, if one was supplied.
    #[must_use]
    pub fn human(&self) -> Option<&str> {
        self.human.as_deref()
    }

    /// Dot-separated path of the input this error concerns.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Status hint for the transport layer.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Out-of-band payload.
    #[must_use]
    pub const fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    /// Text suitable for end users: `human` when set and non-empty,
    /// otherwise `message`. Never empty.
    #[must_use]
    pub fn human_text(&self) -> &str {
        self.human
            .as_deref()
            .filter(|human| !human.is_empty())
            .unwrap_or(self.message.as_str())
    }

    /// Exact comparison against the error code.
    #[must_use]
    pub fn matches_code(&self, code: &str) -> bool {
        self.code == code
    }

    /// Return `self` when the code matches.
    #[must_use]
    pub fn get_code(&self, code: &str) -> Option<&Self> {
        self.matches_code(code).then_some(self)
    }

    /// Raw string-prefix test on the field path.
    ///
    /// This is not segment aware: a field of `addressLine1` starts with
    /// `address`. Errors without a field never match.
    #[must_use]
    pub fn field_starts_with(&self, prefix: &str) -> bool {
        self.field
            .as_deref()
            .is_some_and(|field| field.starts_with(prefix))
    }

    /// True when the field starts with any of `prefixes`.
    #[must_use]
    pub fn matches_any_field<S: AsRef<str>>(&self, prefixes: &[S]) -> bool {
        prefixes
            .iter()
            .any(|prefix| self.field_starts_with(prefix.as_ref()))
    }

    /// Re-root the field path under `prefix`.
    ///
    /// Each call adds one nesting level, so applying the same prefix twice
    /// nests it twice.
    ///
    /// # Examples
    /// ```
    /// use structured_errors::StructuredError;
    ///
    /// let mut err = StructuredError::new("invalid_field", "bad city").with_field("city");
    /// err.add_namespace("address");
    /// assert_eq!(err.field(), Some("address.city"));
    /// ```
    pub fn add_namespace(&mut self, prefix: &str) {
        let namespaced = match self.field.take() {
            Some(field) => format!("{prefix}.{field}"),
            None => prefix.to_owned(),
        };
        trace!(id = %self.id, field = %namespaced, "namespaced error field");
        self.field = Some(namespaced);
    }

    /// Decode `meta` into a caller-chosen shape.
    ///
    /// Absent meta decodes as JSON `null`, so `Option<T>` targets yield
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Meta`] when the payload does not fit `T`.
    pub fn decode_meta<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        let meta = self.meta.clone().unwrap_or(Value::Null);
        serde_json::from_value(meta).map_err(|e| DecodeError::Meta {
            message: e.to_string(),
        })
    }

    /// Wire representation. `status_code` is intentionally left out.
    #[must_use]
    pub fn encode(&self) -> Value {
        // Strings and JSON values always convert; the default is unreachable.
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Rebuild an error from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when `id`, `code`, or `message` is missing,
    /// blank, or not a string, or when `human`/`field` is not a string.
    /// Blank includes whitespace-only strings, which are rejected with
    /// [`DecodeError::Invalid`] exactly as the constructors reject them.
    pub fn decode(data: &Value) -> Result<Self, DecodeError> {
        Self::decode_object(data)
            .inspect_err(|err| debug!(error = %err, "rejected structured error payload"))
    }

    /// Parse and decode a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] for malformed JSON, otherwise the same
    /// failures as [`StructuredError::decode`].
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        Self::decode(&wire::parse(json)?)
    }

    /// Serialize the wire representation to a JSON string.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.encode().to_string()
    }

    pub(crate) fn decode_object(data: &Value) -> Result<Self, DecodeError> {
        let object = wire::object(data, "error")?;
        let id = wire::required_string(object, "id")?;
        let code = wire::required_string(object, "code")?;
        let message = wire::required_string(object, "message")?;
        let human = wire::optional_string(object, "human")?;
        let field = wire::optional_string(object, "field")?;
        let meta = wire::optional_value(object, "meta");

        validate(&code, &message)?;
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyId.into());
        }

        Ok(Self {
            id,
            code,
            message,
            human,
            field,
            status_code: None,
            meta,
        })
    }
}

fn validate(code: &str, message: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(ValidationError::EmptyCode);
    }
    if message.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }
    Ok(())
}

impl fmt::Display for StructuredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(field) = &self.field {
            write!(f, " at {field}")?;
        }
        write!(f, " ({})", self.id)
    }
}

impl std::error::Error for StructuredError {}

impl TryFrom<Value> for StructuredError {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::decode(&value)
    }
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
struct StructuredErrorDto {
    id: String,
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    human: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Value>,
}

impl From<StructuredError> for StructuredErrorDto {
    fn from(value: StructuredError) -> Self {
        let StructuredError {
            id,
            code,
            message,
            human,
            field,
            meta,
            ..
        } = value;

        Self {
            id,
            code,
            message,
            human,
            field,
            meta,
        }
    }
}
