//! Transport encodings for shared rating snapshots.

pub mod snapshot;
