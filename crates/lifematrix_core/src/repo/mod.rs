//! Persistence contracts for shared snapshots.
//!
//! # Responsibility
//! - Define the share gateway contract consumed by the session.
//! - Isolate SQLite query details from share orchestration.
//!
//! # Invariants
//! - Gateway APIs return semantic errors (`NotFound`, `DuplicateKey`) in
//!   addition to storage failures.

pub mod share_repo;
