//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose rating edits, chart/table projections and the share flow to Dart
//!   via FRB.
//! - Keep the rating collection on the Dart side; every call receives the
//!   current items and returns the next revision.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Slider values are clamped here, at the input boundary.
//! - Failures are reported in envelopes (`ok=false`, `message`).

use lifematrix_core::db::open_db;
use lifematrix_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    project_chart, project_table, seed_collection, GatewayError, GatewayResult, MatrixConfig,
    MatrixSession, NoClipboard, NoticeLevel, RatingCollection, RatingEdit, RatingField,
    RatingRecord, SessionStart, ShareGateway, ShareKey, ShareOutcome, SortDirection, SortField,
    SortIndicator, SortState, SqliteShareGateway,
};
use log::warn;
use std::sync::OnceLock;

static MATRIX_CONFIG: OnceLock<MatrixConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One life-area rating as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixItem {
    pub id: String,
    pub label: String,
    pub description: String,
    pub importance: u8,
    pub satisfaction: u8,
    /// Weekly hours.
    pub time_spent: u8,
}

/// Collection envelope returned by seed/edit/load calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixItemsResponse {
    pub ok: bool,
    /// Next collection revision; the input items when `ok=false`.
    pub items: Vec<MatrixItem>,
    pub message: String,
}

/// One bubble of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPointItem {
    pub id: String,
    pub x: u8,
    pub y: u8,
    pub radius: f64,
    pub hover_radius: f64,
    pub tooltip: String,
    pub quadrant: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartResponse {
    pub ok: bool,
    pub points: Vec<ChartPointItem>,
    pub message: String,
}

/// Table sort selection; both fields are `None` when unsorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortSelection {
    /// `label|importance|satisfaction|timeSpent`.
    pub field: Option<String>,
    /// `asc|desc`.
    pub direction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumnItem {
    pub field: String,
    pub title: String,
    /// `none|asc|desc`, for the header icon.
    pub indicator: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableResponse {
    pub ok: bool,
    pub columns: Vec<TableColumnItem>,
    pub rows: Vec<MatrixItem>,
    pub message: String,
}

/// Share envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareResponse {
    /// Whether the snapshot was stored.
    pub ok: bool,
    /// Shareable URL; present even when storing failed.
    pub url: Option<String>,
    /// Whether `message` should be rendered as a warning.
    pub warning: bool,
    pub message: String,
}

impl MatrixItemsResponse {
    fn success(items: Vec<MatrixItem>, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            items,
            message: message.into(),
        }
    }

    fn failure(items: Vec<MatrixItem>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items,
            message: message.into(),
        }
    }
}

/// Returns the default life areas.
#[flutter_rust_bridge::frb(sync)]
pub fn matrix_seed() -> Vec<MatrixItem> {
    to_items(&seed_collection())
}

/// Applies one slider change.
///
/// # FFI contract
/// - `field`: `importance|satisfaction|timeSpent`.
/// - `value` is clamped into the field range.
/// - Unknown `id` returns the items unchanged with `ok=true`.
#[flutter_rust_bridge::frb(sync)]
pub fn matrix_apply_edit(
    items: Vec<MatrixItem>,
    id: String,
    field: String,
    value: i64,
) -> MatrixItemsResponse {
    let Some(field) = RatingField::parse(&field) else {
        return MatrixItemsResponse::failure(
            items,
            format!("matrix_apply_edit failed: unknown field `{field}`"),
        );
    };
    let collection = match to_collection(&items) {
        Ok(collection) => collection,
        Err(err) => {
            return MatrixItemsResponse::failure(items, format!("matrix_apply_edit failed: {err}"))
        }
    };

    let next = collection.apply_edit(id.trim(), RatingEdit::clamped(field, value));
    MatrixItemsResponse::success(to_items(&next), "")
}

/// Projects items into chart points.
#[flutter_rust_bridge::frb(sync)]
pub fn matrix_chart(items: Vec<MatrixItem>) -> ChartResponse {
    match to_collection(&items) {
        Ok(collection) => {
            let chart = project_chart(&collection);
            ChartResponse {
                ok: true,
                points: chart
                    .points
                    .into_iter()
                    .map(|point| ChartPointItem {
                        id: point.id,
                        x: point.x,
                        y: point.y,
                        radius: point.radius,
                        hover_radius: point.hover_radius,
                        tooltip: point.tooltip,
                        quadrant: point.quadrant.label().to_string(),
                    })
                    .collect(),
                message: String::new(),
            }
        }
        Err(err) => ChartResponse {
            ok: false,
            points: Vec::new(),
            message: format!("matrix_chart failed: {err}"),
        },
    }
}

/// Applies one table header click to the current sort selection.
///
/// Unrecognized `current` values are treated as unsorted.
#[flutter_rust_bridge::frb(sync)]
pub fn matrix_toggle_sort(current: SortSelection, clicked: String) -> SortSelection {
    let Some(clicked) = SortField::parse(&clicked) else {
        return current;
    };
    from_sort_state(to_sort_state(&current).toggle(clicked))
}

/// Projects items into table rows under `sort`.
#[flutter_rust_bridge::frb(sync)]
pub fn matrix_table(items: Vec<MatrixItem>, sort: SortSelection) -> TableResponse {
    let collection = match to_collection(&items) {
        Ok(collection) => collection,
        Err(err) => {
            return TableResponse {
                ok: false,
                columns: Vec::new(),
                rows: Vec::new(),
                message: format!("matrix_table failed: {err}"),
            }
        }
    };

    let table = project_table(&collection, to_sort_state(&sort));
    TableResponse {
        ok: true,
        columns: table
            .columns
            .iter()
            .map(|column| TableColumnItem {
                field: column.field.as_str().to_string(),
                title: column.title.to_string(),
                indicator: indicator_label(column.indicator).to_string(),
            })
            .collect(),
        rows: table.rows.into_iter().map(to_item).collect(),
        message: String::new(),
    }
}

/// Stores a snapshot of `items` and returns its shareable URL.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - The URL is returned even when storing fails (`ok=false`, `warning=true`).
/// - Rust never touches the clipboard; `message` makes no copy claim and the
///   Dart host copies `url` itself.
#[flutter_rust_bridge::frb(sync)]
pub fn matrix_share(items: Vec<MatrixItem>) -> ShareResponse {
    let collection = match to_collection(&items) {
        Ok(collection) => collection,
        Err(err) => {
            return ShareResponse {
                ok: false,
                url: None,
                warning: true,
                message: format!("matrix_share failed: {err}"),
            }
        }
    };
    let config = resolve_config();
    let conn = match open_db(&config.db_path) {
        Ok(conn) => Some(conn),
        Err(err) => {
            warn!("event=ffi_share module=ffi status=error error_code=db_open_failed error={err}");
            None
        }
    };

    let outcome = match conn.as_ref() {
        Some(conn) => share_collection(SqliteShareGateway::new(conn), config, collection),
        None => share_collection(UnavailableGateway, config, collection),
    };

    ShareResponse {
        ok: outcome.persisted,
        url: Some(outcome.url),
        warning: outcome.notice.level == NoticeLevel::Warning,
        message: outcome.notice.message,
    }
}

/// Loads the snapshot referenced by `page_url`'s `share` parameter.
///
/// # FFI contract
/// - No `share` parameter: returns the seed with `ok=true`.
/// - Any failure: returns the seed with `ok=false` and a warning message.
#[flutter_rust_bridge::frb(sync)]
pub fn matrix_load_share(page_url: String) -> MatrixItemsResponse {
    let config = resolve_config();
    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            warn!("event=ffi_load module=ffi status=error error_code=db_open_failed error={err}");
            return MatrixItemsResponse::failure(
                matrix_seed(),
                "Failed to load shared data. The link might be invalid.",
            );
        }
    };

    let SessionStart { session, notice } = MatrixSession::start(
        SqliteShareGateway::new(&conn),
        config.origin.clone(),
        Box::new(NoClipboard),
        Some(page_url.as_str()),
    );
    let items = to_items(session.collection());
    match notice {
        Some(notice) => MatrixItemsResponse::failure(items, notice.message),
        None => MatrixItemsResponse::success(items, ""),
    }
}

struct UnavailableGateway;

impl ShareGateway for UnavailableGateway {
    fn put(&self, _key: &ShareKey, _blob: &str) -> GatewayResult<()> {
        Err(GatewayError::Failure("share database unavailable".to_string()))
    }

    fn get(&self, key: &ShareKey) -> GatewayResult<String> {
        Err(GatewayError::NotFound(key.clone()))
    }
}

fn share_collection<G: ShareGateway>(
    gateway: G,
    config: &MatrixConfig,
    collection: RatingCollection,
) -> ShareOutcome {
    MatrixSession::resume(
        gateway,
        config.origin.clone(),
        Box::new(NoClipboard),
        collection,
    )
    .share()
}

fn resolve_config() -> &'static MatrixConfig {
    MATRIX_CONFIG.get_or_init(|| match MatrixConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            warn!("event=ffi_config module=ffi status=error error={err}");
            MatrixConfig::default()
        }
    })
}

fn to_collection(items: &[MatrixItem]) -> Result<RatingCollection, String> {
    let records = items
        .iter()
        .map(|item| {
            RatingRecord::with_ratings(
                item.id.as_str(),
                item.label.as_str(),
                item.description.as_str(),
                i64::from(item.importance),
                i64::from(item.satisfaction),
                i64::from(item.time_spent),
            )
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| err.to_string())?;
    RatingCollection::new(records).map_err(|err| err.to_string())
}

fn to_items(collection: &RatingCollection) -> Vec<MatrixItem> {
    collection.iter().map(to_item).collect()
}

fn to_item(record: &RatingRecord) -> MatrixItem {
    MatrixItem {
        id: record.id().to_string(),
        label: record.label().to_string(),
        description: record.description().to_string(),
        importance: record.importance(),
        satisfaction: record.satisfaction(),
        time_spent: record.time_spent(),
    }
}

fn to_sort_state(selection: &SortSelection) -> SortState {
    let field = selection.field.as_deref().and_then(SortField::parse);
    let direction = match selection.direction.as_deref() {
        Some("asc") => Some(SortDirection::Ascending),
        Some("desc") => Some(SortDirection::Descending),
        _ => None,
    };
    match (field, direction) {
        (Some(field), Some(direction)) => SortState::by(field, direction),
        _ => SortState::unsorted(),
    }
}

fn from_sort_state(state: SortState) -> SortSelection {
    match state.active() {
        Some((field, direction)) => SortSelection {
            field: Some(field.as_str().to_string()),
            direction: Some(
                match direction {
                    SortDirection::Ascending => "asc",
                    SortDirection::Descending => "desc",
                }
                .to_string(),
            ),
        },
        None => SortSelection::default(),
    }
}

fn indicator_label(indicator: SortIndicator) -> &'static str {
    match indicator {
        SortIndicator::Unsorted => "none",
        SortIndicator::Ascending => "asc",
        SortIndicator::Descending => "desc",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, matrix_apply_edit, matrix_chart, matrix_load_share,
        matrix_seed, matrix_share, matrix_table, matrix_toggle_sort, ping, MatrixItem,
        SortSelection,
    };

    fn selection(field: &str, direction: &str) -> SortSelection {
        SortSelection {
            field: Some(field.to_string()),
            direction: Some(direction.to_string()),
        }
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn seed_has_sixteen_mid_scale_items() {
        let items = matrix_seed();
        assert_eq!(items.len(), 16);
        assert!(items
            .iter()
            .all(|item| (item.importance, item.satisfaction, item.time_spent) == (5, 5, 1)));
    }

    #[test]
    fn apply_edit_clamps_slider_values() {
        let response = matrix_apply_edit(matrix_seed(), "2".to_string(), "timeSpent".into(), 99);
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.items[1].time_spent, 40);

        let response = matrix_apply_edit(response.items, "2".to_string(), "importance".into(), -3);
        assert_eq!(response.items[1].importance, 1);
    }

    #[test]
    fn apply_edit_rejects_unknown_field_and_invalid_items() {
        let response = matrix_apply_edit(matrix_seed(), "2".to_string(), "mood".into(), 3);
        assert!(!response.ok);
        assert!(response.message.contains("mood"));
        assert_eq!(response.items, matrix_seed());

        let mut items = matrix_seed();
        items[0].satisfaction = 0;
        let response = matrix_apply_edit(items, "2".to_string(), "importance".into(), 3);
        assert!(!response.ok);
        assert!(response.message.contains("satisfaction"), "{}", response.message);
    }

    #[test]
    fn chart_points_follow_items() {
        let mut items = matrix_seed();
        items[0].importance = 9;
        items[0].satisfaction = 2;
        items[0].time_spent = 20;

        let response = matrix_chart(items);

        assert!(response.ok);
        let point = &response.points[0];
        assert_eq!((point.x, point.y), (2, 9));
        assert_eq!(point.radius, 20.0);
        assert_eq!(point.quadrant, "focus areas");
    }

    #[test]
    fn toggle_sort_cycles_through_three_states() {
        let first = matrix_toggle_sort(SortSelection::default(), "importance".to_string());
        assert_eq!(first, selection("importance", "asc"));

        let second = matrix_toggle_sort(first, "importance".to_string());
        assert_eq!(second, selection("importance", "desc"));

        let third = matrix_toggle_sort(second, "importance".to_string());
        assert_eq!(third, SortSelection::default());

        let switched = matrix_toggle_sort(selection("label", "desc"), "timeSpent".to_string());
        assert_eq!(switched, selection("timeSpent", "asc"));
    }

    #[test]
    fn table_sorts_rows_and_marks_active_column() {
        let items: Vec<MatrixItem> = matrix_seed()
            .into_iter()
            .enumerate()
            .map(|(index, mut item)| {
                item.time_spent = 16 - index as u8;
                item
            })
            .collect();

        let response = matrix_table(items, selection("timeSpent", "asc"));

        assert!(response.ok);
        assert_eq!(response.rows[0].id, "16");
        assert_eq!(response.rows[15].id, "1");
        let indicators = response
            .columns
            .iter()
            .map(|column| column.indicator.as_str())
            .collect::<Vec<_>>();
        assert_eq!(indicators, vec!["none", "none", "none", "asc"]);
    }

    #[test]
    fn share_then_load_restores_items() {
        let mut items = matrix_seed();
        items[4].satisfaction = 8;
        items[9].time_spent = 33;

        let shared = matrix_share(items.clone());
        assert!(shared.ok, "{}", shared.message);
        assert!(!shared.warning);
        assert!(!shared.message.contains("copied"), "{}", shared.message);
        let url = shared.url.expect("share should return url");
        assert!(url.contains("?share="));

        let loaded = matrix_load_share(url);
        assert!(loaded.ok, "{}", loaded.message);
        assert_eq!(loaded.items, items);
    }

    #[test]
    fn load_without_share_param_returns_seed() {
        let loaded = matrix_load_share("http://localhost:5173/".to_string());
        assert!(loaded.ok);
        assert_eq!(loaded.items, matrix_seed());
    }

    #[test]
    fn load_of_unknown_share_falls_back_to_seed_with_warning() {
        let loaded = matrix_load_share("http://localhost:5173/?share=missing-key".to_string());
        assert!(!loaded.ok);
        assert!(loaded.message.contains("might be invalid"));
        assert_eq!(loaded.items, matrix_seed());
    }
}
