//! Request and response model for intercepted traffic
//!
//! Requests are identified by method + URL; identities are hashed into
//! stable hex keys for storage addressing. Responses carry a
//! classification (basic vs opaque) that gates whether they may be
//! snapshotted into the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// HTTP request method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Options,
    Patch,
}

impl Method {
    /// Whether this method is eligible for interception
    ///
    /// Only GET requests are intercepted; everything else passes through
    /// to default handling.
    pub fn is_get(&self) -> bool {
        matches!(self, Self::Get)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An intercepted outgoing request
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl Request {
    /// Create a GET request with no headers
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Create a request with an explicit method
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Attach a header (builder style)
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether this request negotiates for an HTML document
    ///
    /// Substring match on the `Accept` header. A missing header means no
    /// document negotiation and therefore no shell fallback.
    pub fn accepts_html(&self) -> bool {
        self.header("accept")
            .map(|v| v.to_ascii_lowercase().contains("text/html"))
            .unwrap_or(false)
    }

    /// The cache identity of this request
    pub fn key(&self) -> RequestKey {
        RequestKey::new(self.method, &self.url)
    }
}

/// Cache identity of a request: method + URL
///
/// The human-readable identity is kept for logging; storage backends
/// address entries by the content-hashed [`digest`](RequestKey::digest).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    identity: String,
}

impl RequestKey {
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            identity: format!("{} {}", method, url),
        }
    }

    /// Stable hex digest of the identity, used as the storage key
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.identity.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn as_str(&self) -> &str {
        &self.identity
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity)
    }
}

/// Response classification
///
/// Opaque responses (cross-origin without readable metadata) must never
/// be written into the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Basic,
    Opaque,
}

impl ResponseKind {
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque)
    }
}

/// A response produced by the network or reconstructed from the cache
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub kind: ResponseKind,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    /// Create a 200 response with a body
    pub fn ok(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            kind: ResponseKind::Basic,
            url: url.into(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Create a response with an explicit status
    pub fn with_status(url: impl Into<String>, status: u16) -> Self {
        Self {
            status,
            kind: ResponseKind::Basic,
            url: url.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Mark this response opaque (builder style)
    pub fn opaque(mut self) -> Self {
        self.kind = ResponseKind::Opaque;
        self
    }

    /// Attach a header (builder style)
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Whether this response may be snapshotted into the cache
    ///
    /// Only successful (200), non-opaque responses are stored.
    pub fn should_cache(&self) -> bool {
        self.is_success() && !self.kind.is_opaque()
    }

    /// Capture an immutable snapshot of this response for storage
    pub fn snapshot(&self) -> ResponseSnapshot {
        ResponseSnapshot {
            status: self.status,
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            stored_at: Utc::now(),
        }
    }
}

/// A stored copy of a response: status, headers, body, capture time
///
/// Snapshots are idempotent whole-entry values; an overwrite replaces the
/// previous snapshot entirely (last write wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    pub status: u16,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub stored_at: DateTime<Utc>,
}

impl ResponseSnapshot {
    /// Reconstruct a servable response from this snapshot
    ///
    /// Cached entries are always basic: opaque responses are never
    /// written, so nothing opaque can be read back.
    pub fn into_response(self) -> Response {
        Response {
            status: self.status,
            kind: ResponseKind::Basic,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}
