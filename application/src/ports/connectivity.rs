//! Connectivity probe port

use async_trait::async_trait;

/// Cheap reachability check gating every remote operation.
///
/// Implementations must answer within a few seconds and never error:
/// any failure to reach the probe target means "offline".
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn is_reachable(&self) -> bool;
}
