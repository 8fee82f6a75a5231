//! Sortable table projection of a rating collection.
//!
//! # Responsibility
//! - Track the three-state header sort toggle.
//! - Produce rows in collection order or sorted by one column.
//!
//! # Invariants
//! - Projection never mutates the collection.
//! - Sorting is stable in both directions; equal keys keep collection order.
//! - Toggling the same field three times returns to unsorted.

use crate::model::collection::RatingCollection;
use crate::model::rating::{RatingField, RatingRecord};
use std::cmp::Ordering;

/// Sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Label,
    Importance,
    Satisfaction,
    TimeSpent,
}

impl SortField {
    /// Columns in display order.
    pub const ALL: [SortField; 4] = [
        SortField::Label,
        SortField::Importance,
        SortField::Satisfaction,
        SortField::TimeSpent,
    ];

    /// Column header text.
    pub fn title(self) -> &'static str {
        match self {
            Self::Label => "Life Area",
            Self::Importance => "Importance",
            Self::Satisfaction => "Satisfaction",
            Self::TimeSpent => "Time Spent (hrs)",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Importance => "importance",
            Self::Satisfaction => "satisfaction",
            Self::TimeSpent => "timeSpent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "label" | "question" => Some(Self::Label),
            other => RatingField::parse(other).map(Self::from),
        }
    }

    fn compare(self, a: &RatingRecord, b: &RatingRecord) -> Ordering {
        match self {
            Self::Label => compare_labels(&a.label, &b.label),
            Self::Importance => a.importance.cmp(&b.importance),
            Self::Satisfaction => a.satisfaction.cmp(&b.satisfaction),
            Self::TimeSpent => a.time_spent.cmp(&b.time_spent),
        }
    }
}

impl From<RatingField> for SortField {
    fn from(value: RatingField) -> Self {
        match value {
            RatingField::Importance => Self::Importance,
            RatingField::Satisfaction => Self::Satisfaction,
            RatingField::TimeSpent => Self::TimeSpent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Header icon state for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

/// Current table sort: unsorted, or one field in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    active: Option<(SortField, SortDirection)>,
}

impl SortState {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(field: SortField, direction: SortDirection) -> Self {
        Self {
            active: Some((field, direction)),
        }
    }

    pub fn active(self) -> Option<(SortField, SortDirection)> {
        self.active
    }

    /// Applies one header click.
    ///
    /// Same field cycles unsorted -> ascending -> descending -> unsorted;
    /// a different field jumps straight to ascending.
    pub fn toggle(self, field: SortField) -> Self {
        let active = match self.active {
            Some((current, SortDirection::Ascending)) if current == field => {
                Some((field, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == field => None,
            _ => Some((field, SortDirection::Ascending)),
        };
        Self { active }
    }

    pub fn indicator(self, field: SortField) -> SortIndicator {
        match self.active {
            Some((current, SortDirection::Ascending)) if current == field => {
                SortIndicator::Ascending
            }
            Some((current, SortDirection::Descending)) if current == field => {
                SortIndicator::Descending
            }
            _ => SortIndicator::Unsorted,
        }
    }
}

/// Column header with its sort icon state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableColumn {
    pub field: SortField,
    pub title: &'static str,
    pub indicator: SortIndicator,
}

/// Table projection borrowing rows from the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableProjection<'a> {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<&'a RatingRecord>,
}

/// Projects a collection into table rows ordered by `sort`.
pub fn project_table(collection: &RatingCollection, sort: SortState) -> TableProjection<'_> {
    let columns = SortField::ALL
        .iter()
        .map(|&field| TableColumn {
            field,
            title: field.title(),
            indicator: sort.indicator(field),
        })
        .collect();

    TableProjection {
        columns,
        rows: sorted_rows(collection, sort),
    }
}

/// Returns collection rows ordered by `sort`, stably.
pub fn sorted_rows(collection: &RatingCollection, sort: SortState) -> Vec<&RatingRecord> {
    let mut rows: Vec<&RatingRecord> = collection.iter().collect();
    if let Some((field, direction)) = sort.active() {
        // `sort_by` is stable; reversing the comparator keeps ties in order.
        rows.sort_by(|a, b| match direction {
            SortDirection::Ascending => field.compare(a, b),
            SortDirection::Descending => field.compare(b, a),
        });
    }
    rows
}

fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
