//! Subcommand runners.
//!
//! # Invariants
//! - Each run opens its own connection and session; nothing is kept between
//!   invocations except the shared snapshots in the database.
//! - Notices go to stderr, projections and share URLs to stdout.
//! - A failed share `put` is a warning: the URL is printed and the exit code
//!   stays 0.

use crate::cli::{EditArg, SessionArgs};
use lifematrix_core::db::{open_db, DbError};
use lifematrix_core::{
    ChartProjection, MatrixConfig, MatrixSession, NoClipboard, SessionCommand, ShareGateway,
    SortField, SortIndicator, SqliteShareGateway, TableProjection,
};
use log::info;
use std::fmt::Write as _;

pub fn run_table(
    config: &MatrixConfig,
    args: &SessionArgs,
    sort: &[SortField],
) -> Result<i32, DbError> {
    with_session(config, args, |session| {
        for field in sort {
            session.dispatch(SessionCommand::Sort(*field));
        }
        print!("{}", render_table(&session.table()));
        0
    })
}

pub fn run_chart(config: &MatrixConfig, args: &SessionArgs) -> Result<i32, DbError> {
    with_session(config, args, |session| {
        print!("{}", render_chart(&session.chart()));
        0
    })
}

pub fn run_share(config: &MatrixConfig, args: &SessionArgs) -> Result<i32, DbError> {
    with_session(config, args, |session| {
        let report = report_share(session);
        eprintln!("{}", report.notice);
        println!("{}", report.url);
        report.exit_code
    })
}

/// Console rendering of one share request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareReport {
    pub url: String,
    pub notice: String,
    pub exit_code: i32,
}

pub fn report_share<G: ShareGateway>(session: &mut MatrixSession<G>) -> ShareReport {
    let outcome = session.share();
    let notice = if outcome.notice.is_warning() {
        format!("warning: {}", outcome.notice.message)
    } else {
        outcome.notice.message
    };
    ShareReport {
        url: outcome.url,
        notice,
        exit_code: 0,
    }
}

fn with_session(
    config: &MatrixConfig,
    args: &SessionArgs,
    run: impl FnOnce(&mut MatrixSession<SqliteShareGateway<'_>>) -> i32,
) -> Result<i32, DbError> {
    let conn = open_db(&config.db_path)?;
    let start = MatrixSession::start(
        SqliteShareGateway::new(&conn),
        config.origin.clone(),
        Box::new(NoClipboard),
        args.load.as_deref(),
    );
    if let Some(notice) = &start.notice {
        eprintln!("warning: {}", notice.message);
    }

    let mut session = start.session;
    apply_edits(&mut session, &args.set);
    info!(
        "event=cli_session module=cli status=ok edits={} revision={}",
        args.set.len(),
        session.revision()
    );
    Ok(run(&mut session))
}

fn apply_edits<G: ShareGateway>(session: &mut MatrixSession<G>, edits: &[EditArg]) {
    for EditArg { id, edit } in edits {
        let outcome = session.dispatch(SessionCommand::Edit {
            id: id.clone(),
            edit: *edit,
        });
        if !outcome.changed && session.collection().get(id).is_none() {
            eprintln!("warning: no life area with id `{id}`");
        }
    }
}

pub fn render_table(table: &TableProjection<'_>) -> String {
    let label_width = table
        .rows
        .iter()
        .map(|row| row.label().chars().count())
        .chain(table.columns.first().map(|column| column.title.len() + 2))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let headers = table
        .columns
        .iter()
        .map(|column| format!("{}{}", column.title, indicator_suffix(column.indicator)))
        .collect::<Vec<_>>();
    if let Some((first, rest)) = headers.split_first() {
        let _ = write!(out, "{first:<label_width$}");
        for header in rest {
            let _ = write!(out, "  {header:>18}");
        }
        out.push('\n');
    }
    for row in &table.rows {
        let _ = writeln!(
            out,
            "{:<label_width$}  {:>18}  {:>18}  {:>18}",
            row.label(),
            row.importance(),
            row.satisfaction(),
            row.time_spent()
        );
    }
    out
}

pub fn render_chart(chart: &ChartProjection) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} (x: {} {}..{}, y: {} {}..{})",
        chart.dataset_label,
        chart.x_axis.title,
        chart.x_axis.min,
        chart.x_axis.max,
        chart.y_axis.title,
        chart.y_axis.min,
        chart.y_axis.max
    );
    for point in &chart.points {
        let _ = writeln!(
            out,
            "{:>3}  x={:<2} y={:<2} r={:<4} {:<12} {}",
            point.id,
            point.x,
            point.y,
            point.radius,
            point.quadrant.label(),
            point.tooltip
        );
    }
    out
}

fn indicator_suffix(indicator: SortIndicator) -> &'static str {
    match indicator {
        SortIndicator::Unsorted => "",
        SortIndicator::Ascending => " ↑",
        SortIndicator::Descending => " ↓",
    }
}
