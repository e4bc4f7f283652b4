//! Embedding surface
//!
//! `OfflineProxy` wires the configuration and the capability traits into
//! a lifecycle manager and an interception policy, exposing the three
//! operations a host runtime drives: install, activate, handle.

use crate::config::ProxyConfig;
use crate::connectivity::ConnectivityOracle;
use crate::error::JanusResult;
use crate::http::Request;
use crate::lifecycle::{LifecycleManager, RuntimeController};
use crate::network::NetworkBackend;
use crate::policy::{FetchDecision, InterceptPolicy};
use crate::store::CacheStorage;
use std::sync::Arc;

/// An assembled proxy: lifecycle manager + interception policy
pub struct OfflineProxy {
    lifecycle: LifecycleManager,
    policy: InterceptPolicy,
}

impl OfflineProxy {
    /// Wire a proxy from config and capabilities
    ///
    /// Resolves the current generation handle by name up front. The
    /// policy holds that handle as a non-owning reference; the lifecycle
    /// manager keeps ownership of generation creation and retirement.
    pub async fn new(
        config: ProxyConfig,
        storage: Arc<dyn CacheStorage>,
        network: Arc<dyn NetworkBackend>,
        oracle: Arc<dyn ConnectivityOracle>,
        runtime: Arc<dyn RuntimeController>,
    ) -> JanusResult<Self> {
        let config = Arc::new(config);
        let cache = storage.open(&config.cache_version).await?;
        let policy = InterceptPolicy::new(cache, network.clone(), oracle, &config.shell_document);
        let lifecycle = LifecycleManager::new(config, storage, network, runtime);
        Ok(Self { lifecycle, policy })
    }

    /// Run the install transition (seed the current generation)
    pub async fn install(&self) -> JanusResult<()> {
        self.lifecycle.install().await.map(|_| ())
    }

    /// Run the activate transition (purge stale generations, claim clients)
    pub async fn activate(&self) -> JanusResult<()> {
        self.lifecycle.activate().await
    }

    /// Intercept one outgoing request
    pub async fn handle(&self, request: &Request) -> JanusResult<FetchDecision> {
        self.policy.handle(request).await
    }
}
