//! Mock reachability probe for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::traits::ReachabilityProbe;

/// Reachability probe whose answer is set by the test.
#[derive(Debug, Clone)]
pub struct MockReachability {
    reachable: Arc<AtomicBool>,
    probes: Arc<AtomicUsize>,
}

impl MockReachability {
    /// Create a probe reporting `reachable`.
    pub fn new(reachable: bool) -> Self {
        Self {
            reachable: Arc::new(AtomicBool::new(reachable)),
            probes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Change the reported connectivity.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// How many times the probe was asked.
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

impl Default for MockReachability {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl ReachabilityProbe for MockReachability {
    async fn is_reachable(&self) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.reachable.load(Ordering::SeqCst)
    }
}
