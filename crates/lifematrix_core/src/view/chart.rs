//! Bubble-chart projection of a rating collection.
//!
//! # Responsibility
//! - Map each record to a scatter point (`x = satisfaction`, `y = importance`).
//! - Size bubbles by weekly time spent, with visibility floors.
//! - Describe axes and midline guides for the renderer.
//!
//! # Invariants
//! - One point per record, in collection order.
//! - Resting radius is monotonic non-decreasing in `time_spent`.

use crate::model::collection::RatingCollection;
use crate::model::rating::{RatingId, RatingRecord};

/// Lower bound drawn on both axes.
pub const AXIS_MIN: u8 = 0;
/// Upper bound drawn on both axes.
pub const AXIS_MAX: u8 = 10;
/// Position of the dashed quadrant guide on both axes.
pub const MIDLINE: u8 = 5;
/// Dataset label shown in the chart legend.
pub const DATASET_LABEL: &str = "Life Areas";

const RESTING_RADIUS_FLOOR: f64 = 4.0;
const RESTING_RADIUS_SCALE: f64 = 2.0;
const HOVER_RADIUS_FLOOR: f64 = 5.0;
const HOVER_RADIUS_SCALE: f64 = 2.5;

/// Quadrant of a point relative to the midline guides.
///
/// Values strictly above `MIDLINE` count as high; a value on the line is low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// High importance, high satisfaction.
    Strengths,
    /// High importance, low satisfaction.
    FocusAreas,
    /// Low importance, high satisfaction.
    Surplus,
    /// Low importance, low satisfaction.
    LowPriority,
}

impl Quadrant {
    pub fn classify(importance: u8, satisfaction: u8) -> Self {
        match (importance > MIDLINE, satisfaction > MIDLINE) {
            (true, true) => Self::Strengths,
            (true, false) => Self::FocusAreas,
            (false, true) => Self::Surplus,
            (false, false) => Self::LowPriority,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Strengths => "strengths",
            Self::FocusAreas => "focus areas",
            Self::Surplus => "surplus",
            Self::LowPriority => "low priority",
        }
    }
}

/// One axis of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartAxis {
    pub title: &'static str,
    pub min: u8,
    pub max: u8,
    pub midline: u8,
}

impl ChartAxis {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            min: AXIS_MIN,
            max: AXIS_MAX,
            midline: MIDLINE,
        }
    }

    /// Tick text: `Low` at the minimum, `High` at the maximum, else the number.
    pub fn tick_label(&self, value: u8) -> String {
        if value == self.min {
            "Low".to_string()
        } else if value == self.max {
            "High".to_string()
        } else {
            value.to_string()
        }
    }
}

/// Chart-ready representation of one rating record.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub id: RatingId,
    /// Satisfaction.
    pub x: u8,
    /// Importance.
    pub y: u8,
    pub radius: f64,
    pub hover_radius: f64,
    pub tooltip: String,
    pub quadrant: Quadrant,
}

impl ChartPoint {
    fn from_record(record: &RatingRecord) -> Self {
        Self {
            id: record.id.clone(),
            x: record.satisfaction,
            y: record.importance,
            radius: resting_radius(record.time_spent),
            hover_radius: hover_radius(record.time_spent),
            tooltip: tooltip(record),
            quadrant: Quadrant::classify(record.importance, record.satisfaction),
        }
    }
}

/// Full chart projection: axes plus points.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartProjection {
    pub dataset_label: &'static str,
    pub x_axis: ChartAxis,
    pub y_axis: ChartAxis,
    pub points: Vec<ChartPoint>,
}

/// Projects a collection into bubble-chart points.
pub fn project_chart(collection: &RatingCollection) -> ChartProjection {
    ChartProjection {
        dataset_label: DATASET_LABEL,
        x_axis: ChartAxis::new("Satisfaction"),
        y_axis: ChartAxis::new("Importance"),
        points: collection.iter().map(ChartPoint::from_record).collect(),
    }
}

/// Bubble radius at rest: `max(4, hours / 2 * 2)`.
pub fn resting_radius(time_spent: u8) -> f64 {
    (f64::from(time_spent) / 2.0 * RESTING_RADIUS_SCALE).max(RESTING_RADIUS_FLOOR)
}

/// Bubble radius when hovered: `max(5, hours / 2 * 2.5)`.
pub fn hover_radius(time_spent: u8) -> f64 {
    (f64::from(time_spent) / 2.0 * HOVER_RADIUS_SCALE).max(HOVER_RADIUS_FLOOR)
}

/// Tooltip text naming the area and its weekly hours.
pub fn tooltip(record: &RatingRecord) -> String {
    format!(
        "{} (Time Spent: {} hours)",
        record.label, record.time_spent
    )
}
