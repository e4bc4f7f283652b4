//! Request interception policy
//!
//! The decision engine. Each GET request branches once on the
//! connectivity oracle: network-first while online, cache-first while
//! offline. Either branch degrades through the cache and then the shell
//! document before a failure is allowed to reach the caller. Storable
//! network responses are snapshotted into the cache from a detached
//! background task that never blocks the response path.

use crate::connectivity::ConnectivityOracle;
use crate::error::JanusResult;
use crate::http::{Method, Request, RequestKey, Response, ResponseSnapshot};
use crate::network::NetworkBackend;
use crate::store::CacheHandle;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Outcome of intercepting one request
#[derive(Debug)]
pub enum FetchDecision {
    /// The policy produced a response
    Respond(Response),
    /// Not intercepted; the host's default handling applies
    PassThrough,
}

impl FetchDecision {
    pub fn into_response(self) -> Option<Response> {
        match self {
            Self::Respond(response) => Some(response),
            Self::PassThrough => None,
        }
    }
}

/// Per-request decision engine over the cache, network, and oracle
///
/// Holds a non-owning handle to the current cache generation; the
/// lifecycle manager owns generation creation and retirement.
pub struct InterceptPolicy {
    cache: Arc<dyn CacheHandle>,
    network: Arc<dyn NetworkBackend>,
    oracle: Arc<dyn ConnectivityOracle>,
    shell_key: RequestKey,
}

impl InterceptPolicy {
    pub fn new(
        cache: Arc<dyn CacheHandle>,
        network: Arc<dyn NetworkBackend>,
        oracle: Arc<dyn ConnectivityOracle>,
        shell_document: &str,
    ) -> Self {
        Self {
            cache,
            network,
            oracle,
            shell_key: RequestKey::new(Method::Get, shell_document),
        }
    }

    /// Handle one intercepted request, producing exactly one decision
    ///
    /// Non-GET methods are never intercepted. For GET, the oracle is
    /// sampled once and the matching strategy runs to completion.
    pub async fn handle(&self, request: &Request) -> JanusResult<FetchDecision> {
        if !request.method.is_get() {
            return Ok(FetchDecision::PassThrough);
        }

        let response = if self.oracle.is_online() {
            self.network_first(request).await?
        } else {
            self.cache_first(request).await?
        };
        Ok(FetchDecision::Respond(response))
    }

    /// Online strategy: freshest content wins, cache is the fallback
    async fn network_first(&self, request: &Request) -> JanusResult<Response> {
        match self.network.fetch(request).await {
            Ok(response) => {
                self.store_in_background(request.key(), &response);
                Ok(response)
            }
            Err(net_err) => {
                debug!("Network failed for {}, trying cache: {}", request.url, net_err);
                if let Some(snapshot) = self.lookup(&request.key()).await {
                    return Ok(snapshot.into_response());
                }
                if request.accepts_html() {
                    if let Some(shell) = self.lookup(&self.shell_key).await {
                        debug!("Serving shell document for {}", request.url);
                        return Ok(shell.into_response());
                    }
                }
                Err(net_err)
            }
        }
    }

    /// Offline strategy: availability wins, network is the fallback
    ///
    /// The oracle is only an estimate, so a cache miss still gets one
    /// network attempt before the shell fallback.
    async fn cache_first(&self, request: &Request) -> JanusResult<Response> {
        if let Some(snapshot) = self.lookup(&request.key()).await {
            return Ok(snapshot.into_response());
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                self.store_in_background(request.key(), &response);
                Ok(response)
            }
            Err(net_err) => {
                if request.accepts_html() {
                    if let Some(shell) = self.lookup(&self.shell_key).await {
                        debug!("Serving shell document for {}", request.url);
                        return Ok(shell.into_response());
                    }
                }
                Err(net_err)
            }
        }
    }

    /// Cache read with storage errors degraded to a miss
    ///
    /// A read failure must not terminate a request the network or the
    /// shell fallback could still satisfy.
    async fn lookup(&self, key: &RequestKey) -> Option<ResponseSnapshot> {
        match self.cache.get(key).await {
            Ok(found) => found,
            Err(e) => {
                warn!("Cache read failed for {}, treating as miss: {}", key, e);
                None
            }
        }
    }

    /// Spawn a detached write of a storable response's snapshot
    ///
    /// Returns without waiting: cache population is a best-effort side
    /// effect, and a write failure is logged, never observed by the
    /// caller. Non-storable responses (status != 200, opaque) spawn
    /// nothing.
    fn store_in_background(&self, key: RequestKey, response: &Response) -> Option<JoinHandle<()>> {
        if !response.should_cache() {
            return None;
        }

        let snapshot = response.snapshot();
        let cache = self.cache.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = cache.put(&key, snapshot).await {
                warn!("Background cache write failed for {}: {}", key, e);
            }
        }))
    }
}
