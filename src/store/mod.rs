//! Versioned cache generations of stored response snapshots
//!
//! A generation is a named key→snapshot mapping. Exactly one generation
//! is current at any time; the lifecycle manager creates the current one
//! at install and purges the rest at activate. Entry writes replace the
//! whole snapshot (last write wins), never part of it.

pub mod memory;

pub use memory::MemoryStorage;

use crate::error::JanusResult;
use crate::http::{RequestKey, ResponseSnapshot};
use async_trait::async_trait;
use std::sync::Arc;

/// Abstract cache storage engine
///
/// The durable engine lives in the host; this trait is the capability
/// boundary. `open` creates the generation if it does not exist yet.
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Open the named generation, creating it if absent
    async fn open(&self, name: &str) -> JanusResult<Arc<dyn CacheHandle>>;

    /// Names of all existing generations
    async fn list(&self) -> JanusResult<Vec<String>>;

    /// Delete the named generation. Deleting an absent generation is Ok.
    async fn delete(&self, name: &str) -> JanusResult<()>;
}

/// Entry access to one open generation
///
/// `put` is atomic per key; concurrent writes for the same identity
/// resolve last-write-wins.
#[async_trait]
pub trait CacheHandle: Send + Sync {
    /// Look up the snapshot stored under this identity
    async fn get(&self, key: &RequestKey) -> JanusResult<Option<ResponseSnapshot>>;

    /// Store a snapshot under this identity, replacing any previous entry
    async fn put(&self, key: &RequestKey, snapshot: ResponseSnapshot) -> JanusResult<()>;
}
