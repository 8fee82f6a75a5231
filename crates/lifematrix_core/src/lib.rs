//! Core domain logic for the Life Strategy Matrix.
//! This crate is the single source of truth for rating invariants, derived
//! views and the share flow.

pub mod codec;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod share;
pub mod view;

pub use codec::snapshot::{decode, encode, DecodeError, SNAPSHOT_VERSION};
pub use config::{ConfigError, MatrixConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::collection::{CollectionError, RatingCollection};
pub use model::rating::{RatingEdit, RatingField, RatingId, RatingRecord, ValidationError};
pub use model::seed::seed_collection;
pub use repo::share_repo::{GatewayError, GatewayResult, ShareGateway, SqliteShareGateway};
pub use service::session::{
    Clipboard, CommandOutcome, MatrixSession, NoClipboard, Notice, NoticeLevel, SessionCommand,
    SessionStart, ShareError, ShareOutcome,
};
pub use share::link::{share_key_from_url, share_url, ShareKey, ShareKeyError};
pub use view::chart::{project_chart, ChartPoint, ChartProjection, Quadrant};
pub use view::table::{
    project_table, SortDirection, SortField, SortIndicator, SortState, TableProjection,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
