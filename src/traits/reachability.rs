//! Network reachability probe trait.

use async_trait::async_trait;

/// Answers "can the deck service be reached right now?".
///
/// Implementations must be thread-safe (Send + Sync) to work with the
/// polling monitor task.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Check current connectivity.
    async fn is_reachable(&self) -> bool;
}
