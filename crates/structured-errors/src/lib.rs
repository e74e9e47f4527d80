//! Serializable client-facing error payloads.
//!
//! A server reports failures that the client should see as
//! [`StructuredError`] values: a stable machine-readable code, a technical
//! message, and optionally a pre-localized human text, the dot-separated path
//! of the offending input, a status hint for the transport, and an opaque
//! metadata payload. Several failures travel together as a
//! [`StructuredErrorList`].
//!
//! # Overview
//!
//! - Collect failures while validating, without disrupting control flow.
//! - Re-root field paths with `add_namespace` as errors bubble out of nested
//!   structures.
//! - Decide once with [`StructuredErrorList::raise_if_non_empty`], which
//!   flattens a lone failure to [`ClientFailure::Single`].
//! - Exchange payloads as `{ id, code, message, human?, field?, meta? }` and
//!   `{ errors: [...] }`. Status codes never leave the process.
//!
//! # Example
//!
//! ```
//! use structured_errors::{ClientFailure, StructuredError, StructuredErrorList};
//!
//! fn validate_address(city: &str, zip: &str) -> StructuredErrorList {
//!     let mut errors = StructuredErrorList::new();
//!     if city.is_empty() {
//!         errors.add_error(
//!             StructuredError::new("invalid_field", "city is empty")
//!                 .with_human("Enter a city")
//!                 .with_field("city")
//!                 .with_status_code(400),
//!         );
//!     }
//!     if zip.len() != 5 {
//!         errors.add_error(StructuredError::new("invalid_field", "zip must be 5 digits").with_field("zip"));
//!     }
//!     errors
//! }
//!
//! let mut errors = validate_address("", "123");
//! errors.add_namespace("address");
//!
//! let failure = errors.raise_if_non_empty().unwrap_err();
//! assert!(matches!(failure, ClientFailure::List(_)));
//! assert_eq!(failure.status_code_or(500), 400);
//! assert_eq!(failure.human_text(), "Enter a city");
//!
//! let decoded = ClientFailure::decode(&failure.encode()).expect("round-trips");
//! assert_eq!(decoded.errors()[1].field(), Some("address.zip"));
//! ```

mod error;
mod failure;
mod id;
mod list;
mod structured_error;
mod wire;

pub use error::{DecodeError, ValidationError};
pub use failure::ClientFailure;
pub use id::{generate_id, generate_id_with};
pub use list::StructuredErrorList;
pub use structured_error::StructuredError;
