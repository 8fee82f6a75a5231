//! Share keys and shareable URLs.
//!
//! # Responsibility
//! - Generate short random share keys.
//! - Build `<origin>?share=<key>` URLs and extract keys from page URLs.
//!
//! # Invariants
//! - Keys only use the URL-safe alphabet `A-Za-z0-9_-`, so they never need
//!   percent-encoding.
//! - Generated keys are `SHARE_KEY_LEN` characters long.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Length of generated share keys.
pub const SHARE_KEY_LEN: usize = 10;
/// Query parameter carrying the share key.
pub const SHARE_QUERY_PARAM: &str = "share";

const SHARE_KEY_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

static SHARE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid share key regex"));

/// Share key parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareKeyError {
    Empty,
    InvalidFormat(String),
}

impl Display for ShareKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "share key must not be empty"),
            Self::InvalidFormat(value) => write!(f, "share key is invalid: `{value}`"),
        }
    }
}

impl Error for ShareKeyError {}

/// Identifier under which one snapshot is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShareKey(String);

impl ShareKey {
    /// Generates a fresh random key.
    ///
    /// Randomness comes from a v4 UUID. Byte 6 holds the version nibble,
    /// which overlaps its low six bits, so it is skipped; every other byte
    /// contributes its low six bits.
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4();
        let key = uuid
            .as_bytes()
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != 6)
            .take(SHARE_KEY_LEN)
            .map(|(_, byte)| char::from(SHARE_KEY_ALPHABET[usize::from(byte & 0x3f)]))
            .collect();
        Self(key)
    }

    /// Parses a caller-supplied key.
    pub fn parse(value: &str) -> Result<Self, ShareKeyError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ShareKeyError::Empty);
        }
        if !SHARE_KEY_RE.is_match(trimmed) {
            return Err(ShareKeyError::InvalidFormat(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ShareKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the shareable URL for `key` under the page `origin`.
pub fn share_url(origin: &str, key: &ShareKey) -> String {
    format!(
        "{}?{SHARE_QUERY_PARAM}={}",
        origin.trim().trim_end_matches('/'),
        key
    )
}

/// Extracts the raw `share` query value from a page URL.
///
/// Returns `None` when the URL has no query, no `share` parameter, or an
/// empty value. The fragment is ignored. The value is not validated here;
/// pass it through `ShareKey::parse`.
pub fn share_key_from_url(url: &str) -> Option<&str> {
    let without_fragment = url.split('#').next().unwrap_or_default();
    let (_, query) = without_fragment.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == SHARE_QUERY_PARAM)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
