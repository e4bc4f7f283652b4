//! Network capability
//!
//! The transport itself lives in the host; this trait is the seam the
//! lifecycle manager and interception policy fetch through. Backends
//! return a [`Response`] or a [`JanusError::Network`] failure.
//!
//! [`JanusError::Network`]: crate::error::JanusError::Network

use crate::error::JanusResult;
use crate::http::{Request, Response};
use async_trait::async_trait;

/// Abstract network transport
///
/// No timeout or retry is imposed here; whatever the backend's fetch
/// primitive does is the behavior the proxy observes.
#[async_trait]
pub trait NetworkBackend: Send + Sync {
    /// Issue one request and resolve to its response or failure
    async fn fetch(&self, request: &Request) -> JanusResult<Response>;
}
