//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lifematrix_core::{RatingEdit, RatingField, SortField};

#[derive(Parser)]
#[command(
    name = "lifematrix",
    version,
    about = "Life Strategy Matrix - rate life areas, view the matrix, share a snapshot"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Share database path (overrides LIFEMATRIX_DB_PATH).
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print core linkage info.
    Ping,

    /// Print the ratings table.
    Table(TableArgs),

    /// Print the chart bubbles.
    Chart(SessionArgs),

    /// Store a snapshot and print its share URL.
    Share(SessionArgs),
}

#[derive(Args)]
pub struct SessionArgs {
    /// Page URL carrying a `share` parameter to load first.
    #[arg(long = "load", value_name = "URL")]
    pub load: Option<String>,

    /// Slider edit `<id>.<field>=<value>`; values are clamped into range.
    #[arg(long = "set", value_name = "EDIT", value_parser = parse_edit)]
    pub set: Vec<EditArg>,
}

#[derive(Args)]
pub struct TableArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Header click on `label|importance|satisfaction|timeSpent`; repeat to cycle.
    #[arg(long = "sort", value_name = "FIELD", value_parser = parse_sort_field)]
    pub sort: Vec<SortField>,
}

/// One parsed `--set` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditArg {
    pub id: String,
    pub edit: RatingEdit,
}

pub fn parse_edit(raw: &str) -> Result<EditArg, String> {
    let (target, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <id>.<field>=<value>, got `{raw}`"))?;
    let (id, field) = target
        .rsplit_once('.')
        .ok_or_else(|| format!("expected <id>.<field>, got `{target}`"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing rating id in `{raw}`"));
    }
    let field = RatingField::parse(field).ok_or_else(|| format!("unknown field `{field}`"))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("invalid value `{value}`: {err}"))?;

    Ok(EditArg {
        id: id.to_string(),
        edit: RatingEdit::clamped(field, value),
    })
}

pub fn parse_sort_field(raw: &str) -> Result<SortField, String> {
    SortField::parse(raw).ok_or_else(|| format!("unknown sort field `{raw}`"))
}
