//! Identifier generation for structured errors.
//!
//! Generated identifiers take the form `<uuid-v4>@<unix-millis>`. The
//! timestamp suffix makes it easy to eyeball when an error was raised while
//! reading logs; the UUID carries the uniqueness.

use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use uuid::Uuid;

/// Generate a fresh identifier using the system clock.
#[must_use]
pub fn generate_id() -> String {
    generate_id_with(&DefaultClock)
}

/// Generate a fresh identifier stamped with the supplied clock's time.
///
/// # Examples
/// ```
/// use mockable::DefaultClock;
/// use structured_errors::generate_id_with;
///
/// let id = generate_id_with(&DefaultClock);
/// assert!(id.contains('@'));
/// ```
#[must_use]
pub fn generate_id_with(clock: &dyn Clock) -> String {
    id_at(clock.utc())
}

fn id_at(now: DateTime<Utc>) -> String {
    format!("{}@{}", Uuid::new_v4(), now.timestamp_millis())
}
