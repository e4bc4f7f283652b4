//! Cache generation lifecycle
//!
//! Install opens the generation named by the current version tag and
//! seeds it with the configured asset list; activate purges every other
//! generation and claims open clients. Both transitions resolve only
//! after all of their sub-operations resolve.

use crate::config::ProxyConfig;
use crate::error::{JanusError, JanusResult};
use crate::http::Request;
use crate::network::NetworkBackend;
use crate::store::{CacheHandle, CacheStorage};
use async_trait::async_trait;
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Host runtime control surface for lifecycle transitions
#[async_trait]
pub trait RuntimeController: Send + Sync {
    /// Promote the installing version immediately instead of waiting for
    /// existing clients to release control
    async fn skip_waiting(&self) -> JanusResult<()>;

    /// Take control of all currently-open clients, not just ones loaded
    /// after this point
    async fn claim_clients(&self) -> JanusResult<()>;
}

/// A runtime controller for hosts without lifecycle registration
/// mechanics; both signals succeed without side effects.
#[derive(Debug, Default, Clone)]
pub struct PassiveRuntime;

#[async_trait]
impl RuntimeController for PassiveRuntime {
    async fn skip_waiting(&self) -> JanusResult<()> {
        debug!("skip_waiting: no runtime to signal");
        Ok(())
    }

    async fn claim_clients(&self) -> JanusResult<()> {
        debug!("claim_clients: no runtime to signal");
        Ok(())
    }
}

/// Owns creation and retirement of cache generations
pub struct LifecycleManager {
    config: Arc<ProxyConfig>,
    storage: Arc<dyn CacheStorage>,
    network: Arc<dyn NetworkBackend>,
    runtime: Arc<dyn RuntimeController>,
}

impl LifecycleManager {
    pub fn new(
        config: Arc<ProxyConfig>,
        storage: Arc<dyn CacheStorage>,
        network: Arc<dyn NetworkBackend>,
        runtime: Arc<dyn RuntimeController>,
    ) -> Self {
        Self {
            config,
            storage,
            network,
            runtime,
        }
    }

    /// Install transition: open the current generation and seed it
    ///
    /// Signals skip-waiting first, then fetches every seed asset
    /// concurrently. Seeds are independent: a failed fetch or store is
    /// logged and swallowed, and install still succeeds. Returns the
    /// opened handle once every attempt has settled.
    pub async fn install(&self) -> JanusResult<Arc<dyn CacheHandle>> {
        self.runtime.skip_waiting().await?;

        let cache = self.storage.open(&self.config.cache_version).await?;
        info!("Installing cache generation: {}", self.config.cache_version);

        let attempts = self.config.seed_assets.iter().map(|path| {
            let cache = cache.clone();
            async move {
                if let Err(e) = self.seed_asset(cache.as_ref(), path).await {
                    warn!("Failed to seed {}: {}", path, e);
                }
            }
        });
        join_all(attempts).await;

        info!(
            "Install complete: {} seed assets attempted",
            self.config.seed_assets.len()
        );
        Ok(cache)
    }

    async fn seed_asset(&self, cache: &dyn CacheHandle, path: &str) -> JanusResult<()> {
        let request = Request::get(path);
        let response = self.network.fetch(&request).await?;

        if response.kind.is_opaque() {
            return Err(JanusError::network(path, "seed fetch returned an opaque response"));
        }
        if !response.is_success() {
            return Err(JanusError::network(
                path,
                format!("seed fetch returned status {}", response.status),
            ));
        }

        cache.put(&request.key(), response.snapshot()).await?;
        debug!("Seeded {}", path);
        Ok(())
    }

    /// Activate transition: purge stale generations, then claim clients
    ///
    /// Every generation whose name differs from the current version tag
    /// is deleted. Enumeration or deletion failures are fatal to the
    /// transition and propagate unrecovered.
    pub async fn activate(&self) -> JanusResult<()> {
        let current = &self.config.cache_version;
        let stale: Vec<String> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|name| name != current)
            .collect();

        let deletions = stale.iter().map(|name| async move {
            self.storage.delete(name).await?;
            debug!("Purged stale cache generation: {}", name);
            Ok::<(), JanusError>(())
        });
        join_all(deletions)
            .await
            .into_iter()
            .collect::<JanusResult<Vec<()>>>()?;

        self.runtime.claim_clients().await?;
        info!("Activated cache generation: {}", current);
        Ok(())
    }
}
