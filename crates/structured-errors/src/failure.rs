//! Either a single structured error or a list of them.
//!
//! [`ClientFailure`] is what callers propagate once they decide to stop
//! collecting: [`StructuredErrorList::raise_if_non_empty`] flattens a
//! one-element list to [`ClientFailure::Single`], so a lone failure looks
//! the same as one raised directly. Converting or decoding a list applies
//! the same collapse and refuses an empty one.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::{DecodeError, ValidationError};
use crate::list::StructuredErrorList;
use crate::structured_error::StructuredError;
use crate::wire;

/// A propagated client failure.
///
/// # Examples
/// ```
/// use structured_errors::{ClientFailure, StructuredError, StructuredErrorList};
///
/// fn validate(name: &str) -> Result<(), ClientFailure> {
///     let mut errors = StructuredErrorList::new();
///     if name.is_empty() {
///         errors.add_error(StructuredError::new("missing_name", "name is empty").with_field("name"));
///     }
///     errors.raise_if_non_empty()
/// }
///
/// let failure = validate("").unwrap_err();
/// assert!(matches!(failure, ClientFailure::Single(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(untagged)]
#[serde(try_from = "Value")]
pub enum ClientFailure {
    /// Exactly one error.
    #[error(transparent)]
    Single(#[from] StructuredError),
    /// Two or more errors reported together.
    ///
    /// Build it through `TryFrom<StructuredErrorList>` or
    /// [`StructuredErrorList::raise_if_non_empty`] to keep that guarantee.
    #[error(transparent)]
    List(StructuredErrorList),
}

impl ClientFailure {
    /// Status hint: the unit's own, or the list's first one set.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Single(error) => error.status_code(),
            Self::List(list) => list.effective_status_code(),
        }
    }

    /// Status hint with a caller-chosen fallback.
    #[must_use]
    pub fn status_code_or(&self, default: u16) -> u16 {
        self.status_code().unwrap_or(default)
    }

    /// User-facing text.
    ///
    /// A single error falls back to its message; a list joins the `human`
    /// strings it has and may therefore be empty.
    #[must_use]
    pub fn human_text(&self) -> String {
        match self {
            Self::Single(error) => error.human_text().to_owned(),
            Self::List(list) => list.human_text(),
        }
    }

    /// The contained errors, in reporting order.
    #[must_use]
    pub fn errors(&self) -> &[StructuredError] {
        match self {
            Self::Single(error) => std::slice::from_ref(error),
            Self::List(list) => list.errors(),
        }
    }

    /// True when any contained error has `code`.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.errors().iter().any(|error| error.matches_code(code))
    }

    /// First contained error with `code`.
    #[must_use]
    pub fn find_by_code(&self, code: &str) -> Option<&StructuredError> {
        self.errors().iter().find(|error| error.matches_code(code))
    }

    /// Re-root every contained field path under `prefix`.
    pub fn add_namespace(&mut self, prefix: &str) {
        match self {
            Self::Single(error) => error.add_namespace(prefix),
            Self::List(list) => list.add_namespace(prefix),
        }
    }

    /// Consume into the owned errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<StructuredError> {
        match self {
            Self::Single(error) => vec![error],
            Self::List(list) => list.into_iter().collect(),
        }
    }

    /// Consume into a list, wrapping a single error.
    #[must_use]
    pub fn into_list(self) -> StructuredErrorList {
        match self {
            Self::Single(error) => StructuredErrorList::from(error),
            Self::List(list) => list,
        }
    }

    /// Wire representation of the contained variant.
    #[must_use]
    pub fn encode(&self) -> Value {
        match self {
            Self::Single(error) => error.encode(),
            Self::List(list) => list.encode(),
        }
    }

    /// Decode either wire shape.
    ///
    /// Objects carrying an `errors` key decode as a list; any other object
    /// decodes as a single error. A one-element list decodes as
    /// [`ClientFailure::Single`].
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the chosen shape fails to decode, or
    /// [`ValidationError::EmptyList`] for an empty `errors` array.
    pub fn decode(data: &Value) -> Result<Self, DecodeError> {
        let object = wire::object(data, "error or error list")?;
        if object.contains_key("errors") {
            Self::try_from(StructuredErrorList::decode(data)?).map_err(DecodeError::from)
        } else {
            StructuredError::decode(data).map(Self::Single)
        }
    }

    /// Parse and decode a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] for malformed JSON, otherwise the same
    /// failures as [`ClientFailure::decode`].
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        Self::decode(&wire::parse(json)?)
    }
}

impl TryFrom<StructuredErrorList> for ClientFailure {
    type Error = ValidationError;

    /// Collapse a list the way [`StructuredErrorList::raise_if_non_empty`]
    /// does: one error becomes [`ClientFailure::Single`].
    fn try_from(list: StructuredErrorList) -> Result<Self, Self::Error> {
        list.into_failure().ok_or(ValidationError::EmptyList)
    }
}

impl TryFrom<Value> for ClientFailure {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::decode(&value)
    }
}
