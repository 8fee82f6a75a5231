use lifematrix_core::db::open_db_in_memory;
use lifematrix_core::{
    decode, encode, seed_collection, Clipboard, GatewayError, GatewayResult, MatrixSession,
    NoClipboard, NoticeLevel, RatingEdit, RatingField, SessionCommand, ShareError, ShareGateway,
    ShareKey, SortDirection, SortField, SqliteShareGateway,
};
use std::cell::RefCell;
use std::rc::Rc;

const ORIGIN: &str = "https://matrix.example";

#[derive(Clone, Default)]
struct RecordingClipboard {
    copied: Rc<RefCell<Vec<String>>>,
}

impl Clipboard for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<(), String> {
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}

struct OfflineGateway;

impl ShareGateway for OfflineGateway {
    fn put(&self, _key: &ShareKey, _blob: &str) -> GatewayResult<()> {
        Err(GatewayError::Failure("connection refused".to_string()))
    }

    fn get(&self, _key: &ShareKey) -> GatewayResult<String> {
        Err(GatewayError::Failure("connection refused".to_string()))
    }
}

#[test]
fn start_without_share_link_uses_seed() {
    let conn = open_db_in_memory().unwrap();
    let start = MatrixSession::start(
        SqliteShareGateway::new(&conn),
        ORIGIN,
        Box::new(NoClipboard),
        Some("https://matrix.example/"),
    );

    assert!(start.notice.is_none());
    assert_eq!(start.session.collection(), &seed_collection());
    assert_eq!(start.session.revision(), 0);
}

#[test]
fn start_with_unknown_share_keeps_seed_and_warns() {
    let conn = open_db_in_memory().unwrap();
    let start = MatrixSession::start(
        SqliteShareGateway::new(&conn),
        ORIGIN,
        Box::new(NoClipboard),
        Some("https://matrix.example/?share=nonexistent-id"),
    );

    let notice = start.notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert!(notice.message.contains("Failed to load shared data"));
    assert_eq!(start.session.collection(), &seed_collection());
}

#[test]
fn start_with_stored_share_replaces_seed() {
    let conn = open_db_in_memory().unwrap();
    let gateway = SqliteShareGateway::new(&conn);
    let shared =
        seed_collection().apply_edit("3", RatingEdit::new(RatingField::Importance, 9).unwrap());
    let key = ShareKey::parse("V1StGXR8_Z").unwrap();
    gateway.put(&key, &encode(&shared)).unwrap();

    let start = MatrixSession::start(
        &gateway,
        ORIGIN,
        Box::new(NoClipboard),
        Some("https://matrix.example?share=V1StGXR8_Z"),
    );

    assert!(start.notice.is_none());
    assert_eq!(start.session.collection(), &shared);
    assert_eq!(start.session.revision(), 1);
}

#[test]
fn edit_command_changes_one_record_and_bumps_revision() {
    let conn = open_db_in_memory().unwrap();
    let mut session = MatrixSession::start(
        SqliteShareGateway::new(&conn),
        ORIGIN,
        Box::new(NoClipboard),
        None,
    )
    .session;

    let outcome = session.dispatch(SessionCommand::Edit {
        id: "3".to_string(),
        edit: RatingEdit::new(RatingField::Importance, 9).unwrap(),
    });

    assert!(outcome.changed);
    assert_eq!(session.revision(), 1);
    assert_eq!(session.collection().get("3").unwrap().importance(), 9);
    let unchanged = session
        .collection()
        .iter()
        .filter(|record| record.id() != "3")
        .zip(seed_collection().iter().filter(|record| record.id() != "3"))
        .all(|(a, b)| a == b);
    assert!(unchanged);

    let noop = session.dispatch(SessionCommand::Edit {
        id: "missing".to_string(),
        edit: RatingEdit::new(RatingField::Importance, 2).unwrap(),
    });
    assert!(!noop.changed);
    assert_eq!(session.revision(), 1);
}

#[test]
fn sort_command_reorders_table_without_touching_collection() {
    let conn = open_db_in_memory().unwrap();
    let mut session = MatrixSession::start(
        SqliteShareGateway::new(&conn),
        ORIGIN,
        Box::new(NoClipboard),
        None,
    )
    .session;

    session.dispatch(SessionCommand::Sort(SortField::Label));
    assert_eq!(
        session.sort().active(),
        Some((SortField::Label, SortDirection::Ascending))
    );
    assert_eq!(session.table().rows[0].label(), "Career & Work");
    assert_eq!(session.collection(), &seed_collection());
    assert_eq!(session.revision(), 0);

    session.dispatch(SessionCommand::Sort(SortField::Label));
    assert_eq!(session.table().rows[0].label(), "Travel & Adventure");

    session.dispatch(SessionCommand::Sort(SortField::Label));
    assert_eq!(session.table().rows[0].id(), "1");
    assert_eq!(session.table().rows[15].id(), "16");
}

#[test]
fn share_persists_snapshot_and_copies_url() {
    let conn = open_db_in_memory().unwrap();
    let clipboard = RecordingClipboard::default();
    let mut session = MatrixSession::start(
        SqliteShareGateway::new(&conn),
        ORIGIN,
        Box::new(clipboard.clone()),
        None,
    )
    .session;
    session.edit("8", RatingEdit::new(RatingField::TimeSpent, 14).unwrap());

    let outcome = session.share();

    assert!(outcome.persisted);
    assert!(outcome.copied);
    assert_eq!(outcome.notice.level, NoticeLevel::Info);
    assert_eq!(
        outcome.url,
        format!("https://matrix.example?share={}", outcome.key)
    );
    assert_eq!(*clipboard.copied.borrow(), vec![outcome.url.clone()]);

    let stored = SqliteShareGateway::new(&conn).get(&outcome.key).unwrap();
    assert_eq!(&decode(&stored).unwrap(), session.collection());
}

#[test]
fn share_with_failing_gateway_still_returns_url_and_warns() {
    let clipboard = RecordingClipboard::default();
    let mut session =
        MatrixSession::start(OfflineGateway, ORIGIN, Box::new(clipboard.clone()), None).session;

    let outcome = session
        .dispatch(SessionCommand::Share)
        .share
        .unwrap();

    assert!(!outcome.persisted);
    assert!(outcome.copied);
    assert!(outcome.notice.is_warning());
    assert!(outcome.notice.message.contains("copied to your clipboard"));
    assert!(outcome.url.starts_with("https://matrix.example?share="));
    assert_eq!(clipboard.copied.borrow().len(), 1);
}

#[test]
fn share_without_clipboard_still_persists() {
    let conn = open_db_in_memory().unwrap();
    let mut session = MatrixSession::start(
        SqliteShareGateway::new(&conn),
        ORIGIN,
        Box::new(NoClipboard),
        None,
    )
    .session;

    let outcome = session.share();

    assert!(outcome.persisted);
    assert!(!outcome.copied);
    assert_eq!(outcome.notice.level, NoticeLevel::Info);
}

#[test]
fn load_of_invalid_snapshot_keeps_current_collection() {
    let conn = open_db_in_memory().unwrap();
    let gateway = SqliteShareGateway::new(&conn);
    let key = ShareKey::parse("badsnapshot").unwrap();
    gateway
        .put(
            &key,
            r#"[{"id":"1","label":"A","description":"","importance":15,"satisfaction":5,"timeSpent":1}]"#,
        )
        .unwrap();

    let mut session = MatrixSession::start(&gateway, ORIGIN, Box::new(NoClipboard), None).session;
    session.edit("2", RatingEdit::new(RatingField::Satisfaction, 8).unwrap());
    let before = session.collection().clone();

    let err = session.load_share("badsnapshot").unwrap_err();
    assert!(matches!(err, ShareError::Decode(_)), "{err}");
    assert_eq!(session.collection(), &before);

    let outcome = session.dispatch(SessionCommand::LoadShare("badsnapshot".to_string()));
    assert!(!outcome.changed);
    assert!(outcome.notice.unwrap().is_warning());
    assert_eq!(session.collection(), &before);
}

#[test]
fn load_failure_modes_map_to_share_errors() {
    let mut offline =
        MatrixSession::start(OfflineGateway, ORIGIN, Box::new(NoClipboard), None).session;
    assert!(matches!(
        offline.load_share("abcdefghij").unwrap_err(),
        ShareError::Gateway(GatewayError::Failure(_))
    ));
    assert!(matches!(
        offline.load_share("not a key").unwrap_err(),
        ShareError::InvalidKey(_)
    ));
    assert_eq!(offline.collection(), &seed_collection());
}

#[test]
fn shared_link_round_trips_between_sessions() {
    let conn = open_db_in_memory().unwrap();
    let gateway = SqliteShareGateway::new(&conn);

    let mut author = MatrixSession::start(&gateway, ORIGIN, Box::new(NoClipboard), None).session;
    author.edit("1", RatingEdit::new(RatingField::Importance, 10).unwrap());
    author.edit("16", RatingEdit::new(RatingField::TimeSpent, 25).unwrap());
    let shared = author.share();

    let viewer = MatrixSession::start(
        &gateway,
        ORIGIN,
        Box::new(NoClipboard),
        Some(shared.url.as_str()),
    );

    assert!(viewer.notice.is_none());
    assert_eq!(viewer.session.collection(), author.collection());
}

#[test]
fn resumed_session_shares_host_collection() {
    let conn = open_db_in_memory().unwrap();
    let gateway = SqliteShareGateway::new(&conn);
    let held =
        seed_collection().apply_edit("5", RatingEdit::new(RatingField::Satisfaction, 2).unwrap());

    let mut session =
        MatrixSession::resume(&gateway, ORIGIN, Box::new(NoClipboard), held.clone());
    assert_eq!(session.revision(), 0);
    let outcome = session.share();

    assert!(outcome.persisted);
    assert_eq!(decode(&gateway.get(&outcome.key).unwrap()).unwrap(), held);
}
