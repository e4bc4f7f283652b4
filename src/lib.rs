//! Janus - Offline-First Request Interception
//!
//! An intercepting proxy a client runtime embeds between an application's
//! outgoing requests and the network: network-first while online,
//! cache-first while offline, with versioned cache generations and SPA
//! shell fallback for unmatched HTML navigations.

pub mod config;
pub mod connectivity;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod network;
pub mod policy;
pub mod proxy;
pub mod store;

pub use error::{JanusError, JanusResult};
pub use proxy::OfflineProxy;
