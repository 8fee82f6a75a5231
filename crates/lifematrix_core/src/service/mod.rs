//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model, views, codec and gateway into session-level APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod session;
