//! Rating record domain model.
//!
//! # Responsibility
//! - Define one life-area rating and its three mutable numeric axes.
//! - Provide the input-boundary edit type that enforces field ranges.
//!
//! # Invariants
//! - `id` and `label` are non-blank and never reassigned after creation.
//! - Fields are crate-private; outside the crate a record changes only
//!   through `RatingCollection::apply_edit`.
//! - `importance` and `satisfaction` stay in `1..=10`.
//! - `time_spent` stays in `1..=40` (weekly hours).
//! - Deserialization runs `validate()`; invalid records never materialize.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// Stable identifier of one life area inside a collection.
pub type RatingId = String;

/// Valid range for `importance` and `satisfaction`.
pub const SCORE_RANGE: RangeInclusive<u8> = 1..=10;
/// Valid range for weekly `time_spent` hours.
pub const HOURS_RANGE: RangeInclusive<u8> = 1..=40;

/// Mutable numeric axis of a rating record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingField {
    Importance,
    Satisfaction,
    TimeSpent,
}

impl RatingField {
    /// All mutable fields in form order.
    pub const ALL: [RatingField; 3] = [
        RatingField::Importance,
        RatingField::Satisfaction,
        RatingField::TimeSpent,
    ];

    /// Stable field name, matching snapshot wire naming.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Importance => "importance",
            Self::Satisfaction => "satisfaction",
            Self::TimeSpent => "timeSpent",
        }
    }

    /// Parses a field name. Accepts wire and snake_case spellings.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "importance" => Some(Self::Importance),
            "satisfaction" => Some(Self::Satisfaction),
            "timeSpent" | "time_spent" | "weight" => Some(Self::TimeSpent),
            _ => None,
        }
    }

    /// Inclusive range of valid values for this field.
    pub fn range(self) -> RangeInclusive<u8> {
        match self {
            Self::Importance | Self::Satisfaction => SCORE_RANGE,
            Self::TimeSpent => HOURS_RANGE,
        }
    }
}

impl Display for RatingField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for rating records and edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    BlankId,
    BlankLabel { id: RatingId },
    OutOfRange {
        field: RatingField,
        value: i64,
        min: u8,
        max: u8,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "rating id must not be blank"),
            Self::BlankLabel { id } => write!(f, "rating `{id}` has a blank label"),
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} ({value}) must be within {min}..={max}"),
        }
    }
}

impl Error for ValidationError {}

/// One life-area rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RatingRecordWire", rename_all = "camelCase")]
pub struct RatingRecord {
    pub(crate) id: RatingId,
    pub(crate) label: String,
    pub(crate) description: String,
    pub(crate) importance: u8,
    pub(crate) satisfaction: u8,
    pub(crate) time_spent: u8,
}

impl RatingRecord {
    /// Creates a record with neutral scores and the minimum weekly hours.
    ///
    /// # Errors
    /// - Returns `ValidationError` when `id` or `label` is blank.
    pub fn new(
        id: impl Into<RatingId>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let record = Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            importance: 5,
            satisfaction: 5,
            time_spent: *HOURS_RANGE.start(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Creates a record with explicit ratings.
    ///
    /// # Errors
    /// - Returns `ValidationError` for blank identity or out-of-range values.
    pub fn with_ratings(
        id: impl Into<RatingId>,
        label: impl Into<String>,
        description: impl Into<String>,
        importance: i64,
        satisfaction: i64,
        time_spent: i64,
    ) -> Result<Self, ValidationError> {
        let record = Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            importance: check_range(RatingField::Importance, importance)?,
            satisfaction: check_range(RatingField::Satisfaction, satisfaction)?,
            time_spent: check_range(RatingField::TimeSpent, time_spent)?,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn importance(&self) -> u8 {
        self.importance
    }

    pub fn satisfaction(&self) -> u8 {
        self.satisfaction
    }

    /// Weekly hours.
    pub fn time_spent(&self) -> u8 {
        self.time_spent
    }

    /// Checks identity and range invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::BlankId);
        }
        if self.label.trim().is_empty() {
            return Err(ValidationError::BlankLabel {
                id: self.id.clone(),
            });
        }
        for field in RatingField::ALL {
            check_range(field, i64::from(self.value(field)))?;
        }
        Ok(())
    }

    /// Reads one numeric axis.
    pub fn value(&self, field: RatingField) -> u8 {
        match field {
            RatingField::Importance => self.importance,
            RatingField::Satisfaction => self.satisfaction,
            RatingField::TimeSpent => self.time_spent,
        }
    }

    /// Returns a copy with one axis replaced.
    pub(crate) fn with_edit(&self, edit: RatingEdit) -> Self {
        let mut next = self.clone();
        match edit.field {
            RatingField::Importance => next.importance = edit.value,
            RatingField::Satisfaction => next.satisfaction = edit.value,
            RatingField::TimeSpent => next.time_spent = edit.value,
        }
        next
    }
}

/// Range-checked single-field edit produced at the input boundary.
///
/// The only constructors are `new` (rejects) and `clamped` (slider-style
/// clamp), so an edit reaching the store is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingEdit {
    field: RatingField,
    value: u8,
}

impl RatingEdit {
    /// Builds an edit, rejecting out-of-range values.
    pub fn new(field: RatingField, value: i64) -> Result<Self, ValidationError> {
        let value = check_range(field, value)?;
        Ok(Self { field, value })
    }

    /// Builds an edit, clamping `value` into the field range.
    pub fn clamped(field: RatingField, value: i64) -> Self {
        let range = field.range();
        let clamped = value.clamp(i64::from(*range.start()), i64::from(*range.end()));
        Self {
            field,
            value: clamped as u8,
        }
    }

    pub fn field(self) -> RatingField {
        self.field
    }

    pub fn value(self) -> u8 {
        self.value
    }
}

fn check_range(field: RatingField, value: i64) -> Result<u8, ValidationError> {
    let range = field.range();
    if value < i64::from(*range.start()) || value > i64::from(*range.end()) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(value as u8)
}

// Wire shape before validation. Aliases accept snapshots written with the
// older `question`/`weight` field names.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatingRecordWire {
    id: RatingId,
    #[serde(alias = "question")]
    label: String,
    description: String,
    importance: i64,
    satisfaction: i64,
    #[serde(alias = "weight", alias = "time_spent")]
    time_spent: i64,
}

impl TryFrom<RatingRecordWire> for RatingRecord {
    type Error = ValidationError;

    fn try_from(wire: RatingRecordWire) -> Result<Self, Self::Error> {
        Self::with_ratings(
            wire.id,
            wire.label,
            wire.description,
            wire.importance,
            wire.satisfaction,
            wire.time_spent,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{RatingEdit, RatingField, RatingRecord, ValidationError};

    #[test]
    fn clamped_edit_pins_to_field_bounds() {
        assert_eq!(RatingEdit::clamped(RatingField::Importance, 0).value(), 1);
        assert_eq!(RatingEdit::clamped(RatingField::Satisfaction, 99).value(), 10);
        assert_eq!(RatingEdit::clamped(RatingField::TimeSpent, 99).value(), 40);
        assert_eq!(RatingEdit::clamped(RatingField::TimeSpent, 12).value(), 12);
    }

    #[test]
    fn checked_edit_rejects_out_of_range() {
        let err = RatingEdit::new(RatingField::TimeSpent, 41).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: RatingField::TimeSpent,
                value: 41,
                min: 1,
                max: 40,
            }
        );
    }

    #[test]
    fn with_ratings_checks_every_axis() {
        let record = RatingRecord::with_ratings("7", "Spirituality", "", 9, 2, 40).unwrap();
        assert_eq!(
            (record.importance(), record.satisfaction(), record.time_spent()),
            (9, 2, 40)
        );

        let err = RatingRecord::with_ratings("7", "Spirituality", "", 9, 11, 4).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::OutOfRange {
                field: RatingField::Satisfaction,
                value: 11,
                ..
            }
        ));
        assert_eq!(
            RatingRecord::with_ratings("7", " ", "", 5, 5, 1).unwrap_err(),
            ValidationError::BlankLabel {
                id: "7".to_string()
            }
        );
    }

    #[test]
    fn field_parse_accepts_legacy_spelling() {
        assert_eq!(RatingField::parse("weight"), Some(RatingField::TimeSpent));
        assert_eq!(RatingField::parse(" importance "), Some(RatingField::Importance));
        assert_eq!(RatingField::parse("label"), None);
    }
}
