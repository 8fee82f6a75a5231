//! Flutter-facing bindings for `lifematrix_core`.

pub mod api;
