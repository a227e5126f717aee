//! ULID-backed note identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;
use thiserror::Error;
use ulid::{DecodeError, Ulid};

/// Opaque, immutable identifier assigned to a note when it is created.
///
/// Backed by a ULID, so identifiers are 26 Crockford Base32 characters and
/// sort in creation order.
///
/// # Examples
///
/// ```
/// use notekeep::domain::NoteId;
///
/// let id = NoteId::new();
/// assert_eq!(id.to_string().len(), 26);
/// assert!(id.to_string().starts_with(&id.prefix()));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(Ulid);

impl NoteId {
    /// Generates a fresh identifier.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Generates an identifier whose timestamp part is `datetime`.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        let system_time: SystemTime = datetime.into();
        Self(Ulid::from_datetime(system_time))
    }

    /// Short form shown in listings: the first 10 characters, which encode
    /// the millisecond timestamp.
    pub fn prefix(&self) -> String {
        self.0.to_string()[..10].to_string()
    }

    /// Returns true if the textual form starts with `prefix` (case-insensitive).
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.0
            .to_string()
            .starts_with(&prefix.to_ascii_uppercase())
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId(\"{}\")", self.0)
    }
}

/// Error returned when a string is not a valid note identifier.
#[derive(Debug, Clone, Error)]
#[error("invalid note id '{value}': {source}")]
pub struct ParseNoteIdError {
    value: String,
    source: DecodeError,
}

impl ParseNoteIdError {
    /// Returns the rejected input.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s.trim())
            .map(NoteId)
            .map_err(|source| ParseNoteIdError {
                value: s.to_string(),
                source,
            })
    }
}

impl Serialize for NoteId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
