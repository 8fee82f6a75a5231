//! Rating session: the owner of the current collection.
//!
//! # Responsibility
//! - Apply UI commands (edit, sort, share, load) to the session state.
//! - Drive the share flow: encode -> key -> URL -> clipboard -> gateway.
//! - Turn every failure into a user-visible `Notice`.
//!
//! # Invariants
//! - The collection is replaced per revision, never patched in place.
//! - A failed load keeps the current collection untouched.
//! - A failed `put` still yields a usable share URL plus a warning.
//! - `start` resolves any startup share load before the session is returned,
//!   so edits can never race the initial load.

use crate::codec::snapshot::{decode, encode, DecodeError};
use crate::model::collection::RatingCollection;
use crate::model::rating::{RatingEdit, RatingId};
use crate::model::seed::seed_collection;
use crate::repo::share_repo::{GatewayError, ShareGateway};
use crate::share::link::{share_key_from_url, share_url, ShareKey, ShareKeyError};
use crate::view::chart::{project_chart, ChartProjection};
use crate::view::table::{project_table, SortField, SortState, TableProjection};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const LOAD_FAILED_MESSAGE: &str = "Failed to load shared data. The link might be invalid.";

/// OS clipboard collaborator.
pub trait Clipboard {
    /// Writes `text` to the clipboard, or returns a human-readable error.
    fn write_text(&self, text: &str) -> Result<(), String>;
}

/// Clipboard stand-in for hosts without clipboard access.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<(), String> {
        Err("clipboard unavailable".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// Non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.level == NoticeLevel::Warning
    }
}

/// Errors from loading a shared snapshot.
#[derive(Debug)]
pub enum ShareError {
    InvalidKey(ShareKeyError),
    Gateway(GatewayError),
    Decode(DecodeError),
}

impl Display for ShareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(err) => write!(f, "{err}"),
            Self::Gateway(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShareError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidKey(err) => Some(err),
            Self::Gateway(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<ShareKeyError> for ShareError {
    fn from(value: ShareKeyError) -> Self {
        Self::InvalidKey(value)
    }
}

impl From<GatewayError> for ShareError {
    fn from(value: GatewayError) -> Self {
        Self::Gateway(value)
    }
}

impl From<DecodeError> for ShareError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl ShareError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidKey(_) => "invalid_key",
            Self::Gateway(GatewayError::NotFound(_)) => "not_found",
            Self::Gateway(_) => "gateway_failure",
            Self::Decode(_) => "decode_failed",
        }
    }

    fn error_kind(&self) -> &'static str {
        match self {
            Self::InvalidKey(ShareKeyError::Empty) => "empty_key",
            Self::InvalidKey(ShareKeyError::InvalidFormat(_)) => "invalid_format",
            Self::Gateway(GatewayError::NotFound(_)) => "not_found",
            Self::Gateway(GatewayError::DuplicateKey(_)) => "duplicate_key",
            Self::Gateway(GatewayError::Failure(_)) => "storage_failure",
            Self::Decode(err) => err.kind(),
        }
    }

    // Display may quote blob or URL text; logs get only the classification.
    fn log_fields(&self) -> String {
        format!(
            "error_code={} error_kind={}",
            self.error_code(),
            self.error_kind()
        )
    }
}

/// Result of one share request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOutcome {
    pub key: ShareKey,
    pub url: String,
    /// Whether the gateway stored the snapshot.
    pub persisted: bool,
    /// Whether the URL reached the clipboard.
    pub copied: bool,
    pub notice: Notice,
}

/// One UI event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Edit { id: RatingId, edit: RatingEdit },
    Sort(SortField),
    Share,
    LoadShare(String),
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    /// Whether the collection moved to a new revision.
    pub changed: bool,
    pub share: Option<ShareOutcome>,
    pub notice: Option<Notice>,
}

/// Session returned by `MatrixSession::start`.
pub struct SessionStart<G: ShareGateway> {
    pub session: MatrixSession<G>,
    /// Warning when a startup share link could not be loaded.
    pub notice: Option<Notice>,
}

/// Owner of the current rating collection and table sort.
pub struct MatrixSession<G: ShareGateway> {
    gateway: G,
    origin: String,
    clipboard: Box<dyn Clipboard>,
    collection: RatingCollection,
    sort: SortState,
    revision: u64,
}

impl<G: ShareGateway> MatrixSession<G> {
    /// Starts a session from the seed set, then loads `page_url`'s share link
    /// if it carries one.
    pub fn start(
        gateway: G,
        origin: impl Into<String>,
        clipboard: Box<dyn Clipboard>,
        page_url: Option<&str>,
    ) -> SessionStart<G> {
        let mut session = Self {
            gateway,
            origin: origin.into(),
            clipboard,
            collection: seed_collection(),
            sort: SortState::unsorted(),
            revision: 0,
        };

        let notice = page_url
            .and_then(share_key_from_url)
            .map(str::to_string)
            .and_then(|raw_key| session.load_share_notice(&raw_key));

        SessionStart { session, notice }
    }

    /// Resumes a session over a collection held by the host.
    pub fn resume(
        gateway: G,
        origin: impl Into<String>,
        clipboard: Box<dyn Clipboard>,
        collection: RatingCollection,
    ) -> Self {
        Self {
            gateway,
            origin: origin.into(),
            clipboard,
            collection,
            sort: SortState::unsorted(),
            revision: 0,
        }
    }

    pub fn collection(&self) -> &RatingCollection {
        &self.collection
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    /// Collection revision; bumps on every change to the collection.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn chart(&self) -> ChartProjection {
        project_chart(&self.collection)
    }

    pub fn table(&self) -> TableProjection<'_> {
        project_table(&self.collection, self.sort)
    }

    /// Applies one command.
    pub fn dispatch(&mut self, command: SessionCommand) -> CommandOutcome {
        match command {
            SessionCommand::Edit { id, edit } => CommandOutcome {
                changed: self.edit(&id, edit),
                ..CommandOutcome::default()
            },
            SessionCommand::Sort(field) => {
                self.toggle_sort(field);
                CommandOutcome::default()
            }
            SessionCommand::Share => {
                let outcome = self.share();
                CommandOutcome {
                    changed: false,
                    notice: Some(outcome.notice.clone()),
                    share: Some(outcome),
                }
            }
            SessionCommand::LoadShare(raw_key) => {
                let before = self.revision;
                let notice = self.load_share_notice(&raw_key);
                CommandOutcome {
                    changed: self.revision != before,
                    share: None,
                    notice: notice.or_else(|| Some(Notice::info("Loaded shared ratings."))),
                }
            }
        }
    }

    /// Applies one edit. Returns whether the collection changed.
    pub fn edit(&mut self, id: &str, edit: RatingEdit) -> bool {
        let next = self.collection.apply_edit(id, edit);
        if next == self.collection {
            debug!(
                "event=session_edit module=service status=noop field={}",
                edit.field()
            );
            return false;
        }
        self.replace(next);
        debug!(
            "event=session_edit module=service status=ok field={} revision={}",
            edit.field(),
            self.revision
        );
        true
    }

    /// Applies one table header click.
    pub fn toggle_sort(&mut self, field: SortField) -> SortState {
        self.sort = self.sort.toggle(field);
        self.sort
    }

    /// Shares the current collection.
    ///
    /// The URL is produced and handed to the clipboard before the gateway is
    /// called, so a gateway failure still leaves the user a link.
    pub fn share(&mut self) -> ShareOutcome {
        let key = ShareKey::generate();
        let url = share_url(&self.origin, &key);
        let blob = encode(&self.collection);

        let copied = match self.clipboard.write_text(&url) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=share_clipboard module=service status=error error={}",
                    err
                );
                false
            }
        };

        let persisted = match self.gateway.put(&key, &blob) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=share_create module=service status=error error_code=gateway_failure error={}",
                    err
                );
                false
            }
        };

        if persisted {
            info!(
                "event=share_create module=service status=ok records={} copied={}",
                self.collection.len(),
                copied
            );
        }

        ShareOutcome {
            key,
            url,
            persisted,
            copied,
            notice: share_notice(persisted, copied),
        }
    }

    /// Loads a shared snapshot and replaces the collection on success.
    ///
    /// # Errors
    /// - Returns `ShareError` for invalid keys, gateway failures and
    ///   undecodable blobs; the collection is left untouched.
    pub fn load_share(&mut self, raw_key: &str) -> Result<(), ShareError> {
        let key = ShareKey::parse(raw_key)?;
        let blob = self.gateway.get(&key)?;
        let collection = decode(&blob)?;
        self.replace(collection);
        Ok(())
    }

    fn load_share_notice(&mut self, raw_key: &str) -> Option<Notice> {
        match self.load_share(raw_key) {
            Ok(()) => {
                info!(
                    "event=share_load module=service status=ok records={} revision={}",
                    self.collection.len(),
                    self.revision
                );
                None
            }
            Err(err) => {
                warn!(
                    "event=share_load module=service status=error {}",
                    err.log_fields()
                );
                Some(Notice::warning(LOAD_FAILED_MESSAGE))
            }
        }
    }

    fn replace(&mut self, collection: RatingCollection) {
        self.collection = collection;
        self.revision += 1;
    }
}

fn share_notice(persisted: bool, copied: bool) -> Notice {
    match (persisted, copied) {
        (true, true) => Notice::info("Link copied to clipboard!"),
        (true, false) => Notice::info("Share link created. Copy it from below."),
        (false, true) => Notice::warning(
            "Failed to save chart data. The URL was copied to your clipboard.",
        ),
        (false, false) => Notice::warning(
            "Failed to save chart data. The link below may not open the shared ratings.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{MatrixSession, NoClipboard, ShareError};
    use crate::db::open_db_in_memory;
    use crate::model::seed::seed_collection;
    use crate::repo::share_repo::{ShareGateway, SqliteShareGateway};
    use crate::share::link::ShareKey;

    #[test]
    fn load_failure_log_fields_omit_snapshot_text() {
        let conn = open_db_in_memory().unwrap();
        let gateway = SqliteShareGateway::new(&conn);
        let key = ShareKey::parse("privatenote").unwrap();
        let blob = r#"{"version":1,"records":[{"id":"1","label":"Secret diary","description":"","importance":"my private note","satisfaction":5,"timeSpent":1}]}"#;
        gateway.put(&key, blob).unwrap();

        let mut session = MatrixSession::resume(
            &gateway,
            "https://matrix.example",
            Box::new(NoClipboard),
            seed_collection(),
        );
        let err = session.load_share("privatenote").unwrap_err();

        assert!(matches!(err, ShareError::Decode(_)), "{err}");
        assert!(err.to_string().contains("my private note"));
        let logged = err.log_fields();
        assert_eq!(logged, "error_code=decode_failed error_kind=malformed");
        assert!(!logged.contains("private"));
        assert!(!logged.contains("Secret"));
    }

    #[test]
    fn invalid_key_log_fields_omit_url_text() {
        let conn = open_db_in_memory().unwrap();
        let mut session = MatrixSession::resume(
            SqliteShareGateway::new(&conn),
            "https://matrix.example",
            Box::new(NoClipboard),
            seed_collection(),
        );

        let err = session.load_share("my secret key!").unwrap_err();

        assert_eq!(
            err.log_fields(),
            "error_code=invalid_key error_kind=invalid_format"
        );
    }
}
