//! Offline cache controller for the application shell.
//!
//! # Responsibility
//! - Pre-cache the core asset manifest on install.
//! - Evict buckets left behind by older versions on activate.
//! - Answer fetches cache-first, with a shell fallback for navigations.
//!
//! # Invariants
//! - The bucket name is the only version knob; bumping it invalidates every
//!   older bucket on the next activation.
//! - Nothing retries. A failed network fetch falls back to cache or yields
//!   no response.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod controller;
mod origin;
mod storage;

pub use controller::CacheController;
pub use origin::{DirectoryOrigin, OfflineNetwork};
pub use storage::SqliteCacheStorage;

pub type CacheResult<T> = Result<T, CacheError>;

/// How the page issued the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// Full-page document load.
    Navigate,
    /// Asset, script or API request.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub mode: RequestMode,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mode: RequestMode::Other,
        }
    }

    pub fn navigate(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mode: RequestMode::Navigate,
        }
    }

    pub fn is_navigation(&self) -> bool {
        self.mode == RequestMode::Navigate
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, content_type: Option<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type,
            body,
        }
    }

    /// `200 OK` response.
    pub fn ok(content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, content_type.map(str::to_string), body.into())
    }

    pub fn not_found() -> Self {
        Self::new(404, None, Vec::new())
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure: no response at all.
#[derive(Debug)]
pub enum NetworkError {
    Unreachable,
    Io(std::io::Error),
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreachable => write!(f, "network unreachable"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NetworkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unreachable => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for NetworkError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug)]
pub enum CacheError {
    Storage(rusqlite::Error),
    /// One manifest entry could not be fetched; nothing was stored.
    Install { url: String, reason: String },
}

impl Display for CacheError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "cache storage: {err}"),
            Self::Install { url, reason } => write!(f, "install failed at `{url}`: {reason}"),
        }
    }
}

impl Error for CacheError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Install { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for CacheError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(value)
    }
}

/// Source of live responses.
pub trait Network {
    fn fetch(&self, request: &Request) -> Result<Response, NetworkError>;
}

/// Named buckets of cached responses keyed by request URL.
pub trait CacheStorage {
    /// Creates the bucket if missing.
    fn open(&self, bucket: &str) -> CacheResult<()>;
    /// Bucket names in creation order.
    fn keys(&self) -> CacheResult<Vec<String>>;
    /// Returns whether a bucket was deleted.
    fn delete(&self, bucket: &str) -> CacheResult<bool>;
    /// First match for `url` across all buckets, oldest bucket first.
    fn match_any(&self, url: &str) -> CacheResult<Option<Response>>;
    /// Stores one response, creating the bucket if needed.
    fn put(&self, bucket: &str, url: &str, response: &Response) -> CacheResult<()>;
    /// Stores every entry or none.
    fn put_all(&self, bucket: &str, entries: &[(String, Response)]) -> CacheResult<()>;
    /// URLs stored in one bucket.
    fn entries(&self, bucket: &str) -> CacheResult<Vec<String>>;
}
