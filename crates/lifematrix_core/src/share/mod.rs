//! Share-link primitives used by the share flow.

pub mod link;
