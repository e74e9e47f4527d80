//! Ordered aggregate of structured errors.
//!
//! A [`StructuredErrorList`] collects failures silently while a request is
//! validated, then hands them to the caller in one go through
//! [`StructuredErrorList::raise_if_non_empty`]. List order is reporting order
//! and decides both "first status code wins" and "first matching code wins".

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::error::DecodeError;
use crate::failure::ClientFailure;
use crate::structured_error::StructuredError;
use crate::wire;

/// An ordered, possibly empty, collection of [`StructuredError`].
///
/// # Examples
/// ```
/// use structured_errors::{StructuredError, StructuredErrorList};
///
/// let mut errors = StructuredErrorList::new();
/// errors.add_error(StructuredError::new("invalid_field", "bad city").with_field("city"));
/// errors.add_namespace("address");
///
/// assert!(errors.has_field_prefix("address."));
/// assert!(errors.raise_if_non_empty().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(try_from = "Value")]
pub struct StructuredErrorList {
    errors: Vec<StructuredError>,
}

impl StructuredErrorList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Append a single error, or every error of another list or raised
    /// [`ClientFailure`] in order.
    ///
    /// Passing a list by reference copies its errors and leaves it intact.
    pub fn add_error(&mut self, error: impl Into<Self>) {
        self.errors.extend(error.into().errors);
    }

    /// Prepend a single error, or every error of another list.
    ///
    /// The prepended group keeps its own relative order.
    pub fn unshift_error(&mut self, error: impl Into<Self>) {
        let mut merged = error.into().errors;
        merged.append(&mut self.errors);
        self.errors = merged;
    }

    /// Remove and return the error at `index`.
    ///
    /// An out-of-range index leaves the list untouched and returns `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<StructuredError> {
        if index >= self.errors.len() {
            trace!(index, len = self.errors.len(), "remove_at index out of range");
            return None;
        }
        Some(self.errors.remove(index))
    }

    /// Keep only the errors for which `keep` returns true.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&StructuredError) -> bool,
    {
        self.errors.retain(keep);
    }

    /// Status of the first error that sets one.
    ///
    /// ```
    /// use structured_errors::{StructuredError, StructuredErrorList};
    ///
    /// let errors = StructuredErrorList::from(vec![
    ///     StructuredError::new("a", "no status"),
    ///     StructuredError::new("b", "missing").with_status_code(404),
    ///     StructuredError::new("c", "boom").with_status_code(500),
    /// ]);
    /// assert_eq!(errors.effective_status_code(), Some(404));
    /// ```
    #[must_use]
    pub fn effective_status_code(&self) -> Option<u16> {
        self.errors.iter().find_map(StructuredError::status_code)
    }

    /// [`Self::effective_status_code`] with a caller-chosen fallback.
    #[must_use]
    pub fn status_code_or(&self, default: u16) -> u16 {
        self.effective_status_code().unwrap_or(default)
    }

    /// Re-root every field path under `prefix`, in order.
    pub fn add_namespace(&mut self, prefix: &str) {
        for error in &mut self.errors {
            error.add_namespace(prefix);
        }
    }

    /// True when any error has exactly `code`.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|error| error.matches_code(code))
    }

    /// First error with exactly `code`.
    #[must_use]
    pub fn find_by_code(&self, code: &str) -> Option<&StructuredError> {
        self.errors.iter().find(|error| error.matches_code(code))
    }

    /// True when any error's field starts with `prefix` (raw string prefix).
    #[must_use]
    pub fn has_field_prefix(&self, prefix: &str) -> bool {
        self.errors
            .iter()
            .any(|error| error.field_starts_with(prefix))
    }

    /// True when the list holds no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The errors in reporting order.
    #[must_use]
    pub fn errors(&self) -> &[StructuredError] {
        &self.errors
    }

    /// Iterate over the errors in reporting order.
    pub fn iter(&self) -> std::slice::Iter<'_, StructuredError> {
        self.errors.iter()
    }

    /// Stop collecting and hand the errors to the caller.
    ///
    /// - empty: `Ok(())`
    /// - one error: `Err(ClientFailure::Single(error))`, not a one-element list
    /// - two or more: `Err(ClientFailure::List(self))`
    ///
    /// # Errors
    ///
    /// Returns the collected failure whenever the list is non-empty.
    pub fn raise_if_non_empty(self) -> Result<(), ClientFailure> {
        match self.into_failure() {
            Some(failure) => {
                debug!(
                    count = failure.errors().len(),
                    status = ?failure.status_code(),
                    "raising structured errors"
                );
                Err(failure)
            }
            None => Ok(()),
        }
    }

    /// Collapse into a failure: `None` when empty, a single error when alone.
    pub(crate) fn into_failure(mut self) -> Option<ClientFailure> {
        if self.errors.len() > 1 {
            return Some(ClientFailure::List(self));
        }
        self.errors.pop().map(ClientFailure::Single)
    }

    /// Newline-joined `human` texts of the errors that have one.
    ///
    /// Errors without a human text are skipped, so a non-empty list can
    /// yield an empty string.
    #[must_use]
    pub fn human_text(&self) -> String {
        self.errors
            .iter()
            .filter_map(StructuredError::human)
            .filter(|human| !human.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Wire representation: `{ "errors": [...] }`.
    #[must_use]
    pub fn encode(&self) -> Value {
        // Strings and JSON values always convert; the default is unreachable.
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Rebuild a list from its wire representation.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when `errors` is missing or not an array, or
    /// [`DecodeError::Element`] naming the first element that fails.
    pub fn decode(data: &Value) -> Result<Self, DecodeError> {
        Self::decode_object(data)
            .inspect_err(|err| debug!(error = %err, "rejected structured error list payload"))
    }

    /// Parse and decode a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] for malformed JSON, otherwise the same
    /// failures as [`StructuredErrorList::decode`].
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        Self::decode(&wire::parse(json)?)
    }

    /// Serialize the wire representation to a JSON string.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.encode().to_string()
    }

    fn decode_object(data: &Value) -> Result<Self, DecodeError> {
        let object = wire::object(data, "error list")?;
        let errors = wire::required_array(object, "errors")?
            .iter()
            .enumerate()
            .map(|(index, item)| {
                StructuredError::decode_object(item).map_err(|source| DecodeError::Element {
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { errors })
    }
}

impl fmt::Display for StructuredErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, error) in self.errors.iter().enumerate() {
            if position > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for StructuredErrorList {}

impl From<Vec<StructuredError>> for StructuredErrorList {
    fn from(errors: Vec<StructuredError>) -> Self {
        Self { errors }
    }
}

impl From<StructuredError> for StructuredErrorList {
    fn from(error: StructuredError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<&StructuredError> for StructuredErrorList {
    fn from(error: &StructuredError) -> Self {
        Self::from(error.clone())
    }
}

impl From<&StructuredErrorList> for StructuredErrorList {
    fn from(list: &StructuredErrorList) -> Self {
        list.clone()
    }
}

impl From<ClientFailure> for StructuredErrorList {
    fn from(failure: ClientFailure) -> Self {
        failure.into_list()
    }
}

impl FromIterator<StructuredError> for StructuredErrorList {
    fn from_iter<I: IntoIterator<Item = StructuredError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl Extend<StructuredError> for StructuredErrorList {
    fn extend<I: IntoIterator<Item = StructuredError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for StructuredErrorList {
    type Item = StructuredError;
    type IntoIter = std::vec::IntoIter<StructuredError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a StructuredErrorList {
    type Item = &'a StructuredError;
    type IntoIter = std::slice::Iter<'a, StructuredError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl TryFrom<Value> for StructuredErrorList {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::decode(&value)
    }
}
