//! Connectivity signal consulted once per intercepted request
//!
//! The oracle reflects the runtime's best local estimate, not a confirmed
//! probe. The interception policy must still handle "online but the fetch
//! fails" and "offline but the fetch succeeds".

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Ambient online/offline signal
///
/// Sampled synchronously at the start of each request's handling; the
/// value may change between calls and no component re-polls it.
pub trait ConnectivityOracle: Send + Sync {
    fn is_online(&self) -> bool;
}

/// Shared connectivity flag the host runtime flips
///
/// Cheap to clone; every clone observes the same flag.
#[derive(Debug, Clone)]
pub struct SharedConnectivity {
    online: Arc<AtomicBool>,
}

impl SharedConnectivity {
    pub fn new(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    /// Update the ambient estimate
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Relaxed);
    }
}

impl ConnectivityOracle for SharedConnectivity {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}
