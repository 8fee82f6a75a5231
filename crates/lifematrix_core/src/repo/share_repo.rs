//! Share gateway contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the key/blob store the share flow depends on.
//! - Persist snapshots write-once in the `shares` table.
//!
//! # Invariants
//! - A key is written at most once; a second `put` reports `DuplicateKey`.
//! - Blobs are stored and returned verbatim; the gateway never inspects them.
//! - Missing keys are reported as `NotFound`, never as an empty blob.

use crate::db::DbError;
use crate::share::link::ShareKey;
use log::{info, warn};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Share gateway failures.
#[derive(Debug)]
pub enum GatewayError {
    NotFound(ShareKey),
    DuplicateKey(ShareKey),
    /// Storage or transport failure.
    Failure(String),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(key) => write!(f, "share not found: {key}"),
            Self::DuplicateKey(key) => write!(f, "share key already exists: {key}"),
            Self::Failure(message) => write!(f, "share storage failure: {message}"),
        }
    }
}

impl Error for GatewayError {}

impl From<DbError> for GatewayError {
    fn from(value: DbError) -> Self {
        Self::Failure(value.to_string())
    }
}

impl From<rusqlite::Error> for GatewayError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Failure(value.to_string())
    }
}

/// Key/blob persistence used for snapshot sharing.
pub trait ShareGateway {
    /// Stores `blob` under a caller-generated `key`.
    fn put(&self, key: &ShareKey, blob: &str) -> GatewayResult<()>;
    /// Returns the blob stored under `key`.
    fn get(&self, key: &ShareKey) -> GatewayResult<String>;
}

impl<G: ShareGateway + ?Sized> ShareGateway for &G {
    fn put(&self, key: &ShareKey, blob: &str) -> GatewayResult<()> {
        (**self).put(key, blob)
    }

    fn get(&self, key: &ShareKey) -> GatewayResult<String> {
        (**self).get(key)
    }
}

/// SQLite-backed share gateway.
pub struct SqliteShareGateway<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteShareGateway<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ShareGateway for SqliteShareGateway<'_> {
    fn put(&self, key: &ShareKey, blob: &str) -> GatewayResult<()> {
        let result = self.conn.execute(
            "INSERT INTO shares (id, data) VALUES (?1, ?2);",
            params![key.as_str(), blob],
        );

        match result {
            Ok(_) => {
                info!(
                    "event=share_put module=repo status=ok blob_bytes={}",
                    blob.len()
                );
                Ok(())
            }
            Err(err) if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
                warn!("event=share_put module=repo status=error error_code=duplicate_key");
                Err(GatewayError::DuplicateKey(key.clone()))
            }
            Err(err) => {
                warn!(
                    "event=share_put module=repo status=error error_code=db_write_failed error={}",
                    err
                );
                Err(err.into())
            }
        }
    }

    fn get(&self, key: &ShareKey) -> GatewayResult<String> {
        let data = self
            .conn
            .query_row(
                "SELECT data FROM shares WHERE id = ?1;",
                [key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match data {
            Some(blob) => Ok(blob),
            None => Err(GatewayError::NotFound(key.clone())),
        }
    }
}
