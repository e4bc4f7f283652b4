//! In-memory cache storage
//!
//! The default capability when the host supplies no durable engine, and
//! the double used throughout the test suite. Generations are RwLock'd
//! maps keyed by the request identity digest.

use crate::error::JanusResult;
use crate::http::{RequestKey, ResponseSnapshot};
use crate::store::{CacheHandle, CacheStorage};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory implementation of [`CacheStorage`]
#[derive(Default)]
pub struct MemoryStorage {
    generations: RwLock<HashMap<String, Arc<MemoryGeneration>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryStorage {
    async fn open(&self, name: &str) -> JanusResult<Arc<dyn CacheHandle>> {
        let mut generations = self.generations.write().await;
        let generation = generations
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("Created cache generation: {}", name);
                Arc::new(MemoryGeneration::default())
            })
            .clone();
        Ok(generation)
    }

    async fn list(&self) -> JanusResult<Vec<String>> {
        Ok(self.generations.read().await.keys().cloned().collect())
    }

    async fn delete(&self, name: &str) -> JanusResult<()> {
        if self.generations.write().await.remove(name).is_some() {
            debug!("Deleted cache generation: {}", name);
        }
        Ok(())
    }
}

#[derive(Default)]
struct MemoryGeneration {
    entries: RwLock<HashMap<String, ResponseSnapshot>>,
}

#[async_trait]
impl CacheHandle for MemoryGeneration {
    async fn get(&self, key: &RequestKey) -> JanusResult<Option<ResponseSnapshot>> {
        Ok(self.entries.read().await.get(&key.digest()).cloned())
    }

    async fn put(&self, key: &RequestKey, snapshot: ResponseSnapshot) -> JanusResult<()> {
        self.entries.write().await.insert(key.digest(), snapshot);
        Ok(())
    }
}
