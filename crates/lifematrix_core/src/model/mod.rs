//! Rating domain model for the life strategy matrix.
//!
//! # Responsibility
//! - Define life-area ratings and the ordered collection that owns them.
//! - Provide the seed set used when no shared snapshot is loaded.
//!
//! # Invariants
//! - Collections are replaced per revision, never mutated in place.
//! - Numeric axes are range-checked at the input boundary (`RatingEdit`).

pub mod collection;
pub mod rating;
pub mod seed;
