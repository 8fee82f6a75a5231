//! Ordered rating collection and its mutation API.
//!
//! # Responsibility
//! - Hold the session's life-area ratings in display order.
//! - Apply single-field edits as pure revisions.
//!
//! # Invariants
//! - Record ids are pairwise distinct; a collection is never empty.
//! - Order is insertion order; edits never reorder or add/remove records.
//! - Editing an unknown id is a silent no-op.

use crate::model::rating::{RatingEdit, RatingRecord};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors raised when assembling a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    Empty,
    DuplicateId(String),
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "rating collection must contain at least one record"),
            Self::DuplicateId(id) => write!(f, "duplicate rating id: {id}"),
        }
    }
}

impl Error for CollectionError {}

/// Ordered, id-unique sequence of rating records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingCollection {
    records: Vec<RatingRecord>,
}

impl RatingCollection {
    /// Builds a collection, rejecting empty input and id collisions.
    ///
    /// Records are expected to be individually valid already (constructed via
    /// `RatingRecord::new` or deserialization).
    pub fn new(records: Vec<RatingRecord>) -> Result<Self, CollectionError> {
        if records.is_empty() {
            return Err(CollectionError::Empty);
        }
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(CollectionError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[RatingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RatingRecord> {
        self.records.iter()
    }

    /// Looks up one record by id.
    pub fn get(&self, id: &str) -> Option<&RatingRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Returns a new revision with one field of one record replaced.
    ///
    /// # Contract
    /// - Only the record whose `id` matches changes, and only `edit.field()`.
    /// - Unknown `id` returns a value-equal copy.
    pub fn apply_edit(&self, id: &str, edit: RatingEdit) -> Self {
        let records = self
            .records
            .iter()
            .map(|record| {
                if record.id == id {
                    record.with_edit(edit)
                } else {
                    record.clone()
                }
            })
            .collect();
        Self { records }
    }

    pub fn into_records(self) -> Vec<RatingRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a RatingCollection {
    type Item = &'a RatingRecord;
    type IntoIter = std::slice::Iter<'a, RatingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
