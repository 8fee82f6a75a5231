//! Snapshot codec for sharing a rating collection.
//!
//! # Responsibility
//! - Serialize the full ordered collection into a JSON blob.
//! - Decode blobs back into a validated collection, or fail as a whole.
//!
//! # Invariants
//! - `decode(&encode(c)) == Ok(c)` for every valid collection.
//! - Decode never yields partial data: one bad record rejects the blob.
//! - Bare JSON arrays (legacy blobs) decode like version-1 envelopes.

use crate::model::collection::{CollectionError, RatingCollection};
use crate::model::rating::RatingRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot format version written by `encode`.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Snapshot decode failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Not JSON, wrong shape, missing fields, wrong types or invalid values.
    Malformed(String),
    UnsupportedVersion(u32),
    DuplicateId(String),
    Empty,
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(details) => write!(f, "malformed snapshot: {details}"),
            Self::UnsupportedVersion(version) if *version > SNAPSHOT_VERSION => write!(
                f,
                "snapshot version {version} is newer than supported {SNAPSHOT_VERSION}"
            ),
            Self::UnsupportedVersion(version) => write!(
                f,
                "snapshot version {version} is invalid; versions start at 1"
            ),
            Self::DuplicateId(id) => write!(f, "snapshot contains duplicate rating id: {id}"),
            Self::Empty => write!(f, "snapshot contains no ratings"),
        }
    }
}

impl Error for DecodeError {}

impl DecodeError {
    /// Content-free failure class, safe for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed",
            Self::UnsupportedVersion(_) => "unsupported_version",
            Self::DuplicateId(_) => "duplicate_id",
            Self::Empty => "empty",
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value.to_string())
    }
}

impl From<CollectionError> for DecodeError {
    fn from(value: CollectionError) -> Self {
        match value {
            CollectionError::Empty => Self::Empty,
            CollectionError::DuplicateId(id) => Self::DuplicateId(id),
        }
    }
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    records: &'a [RatingRecord],
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotIn {
    version: u32,
    records: Vec<RatingRecord>,
}

/// Encodes the full collection as a versioned JSON blob.
pub fn encode(collection: &RatingCollection) -> String {
    let snapshot = SnapshotOut {
        version: SNAPSHOT_VERSION,
        records: collection.records(),
    };
    match serde_json::to_string(&snapshot) {
        Ok(blob) => blob,
        // Plain strings and integers cannot fail to serialize.
        Err(err) => unreachable!("snapshot serialization failed: {err}"),
    }
}

/// Decodes a blob into a collection.
///
/// # Errors
/// - `Malformed` for structural problems and out-of-range or blank fields.
/// - `UnsupportedVersion` for envelopes written by a newer format.
/// - `DuplicateId` / `Empty` for collection-level violations.
pub fn decode(blob: &str) -> Result<RatingCollection, DecodeError> {
    let value: Value = serde_json::from_str(blob)?;
    let records = match value {
        Value::Array(_) => serde_json::from_value::<Vec<RatingRecord>>(value)?,
        Value::Object(_) => {
            let snapshot = serde_json::from_value::<SnapshotIn>(value)?;
            if snapshot.version > SNAPSHOT_VERSION || snapshot.version == 0 {
                return Err(DecodeError::UnsupportedVersion(snapshot.version));
            }
            snapshot.records
        }
        other => {
            return Err(DecodeError::Malformed(format!(
                "expected object or array, found {}",
                json_kind(&other)
            )));
        }
    };

    Ok(RatingCollection::new(records)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
