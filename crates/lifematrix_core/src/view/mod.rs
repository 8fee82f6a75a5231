//! Read-only projections of the rating collection.
//!
//! # Responsibility
//! - Build chart points and sorted table rows for the rendering layer.
//!
//! # Invariants
//! - Projections are pure functions of the collection (and sort state).

pub mod chart;
pub mod table;
