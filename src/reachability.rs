//! Connectivity change detection via polling.
//!
//! Polls a [`ReachabilityProbe`] and tells the session when the answer
//! changes. The session starts out assuming it is connected, so nothing is
//! sent until the first probe disagrees.
//!
//! # Dependency Injection
//!
//! - Use `spawn_reachability_monitor()` in production (probes the API root)
//! - Use `spawn_reachability_monitor_with_probe()` in tests (with MockReachability)

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::adapters::{HttpReachabilityProbe, ReqwestHttpClient};
use crate::session::SessionMessage;
use crate::traits::ReachabilityProbe;

/// Default polling interval (5 seconds).
pub const POLL_INTERVAL_SECS: u64 = 5;

/// Spawn the monitor with an injected probe.
///
/// Returns a JoinHandle that can be used to abort the task on shutdown.
/// The task also stops on its own once the session is gone.
pub fn spawn_reachability_monitor_with_probe(
    message_tx: mpsc::UnboundedSender<SessionMessage>,
    probe: Arc<dyn ReachabilityProbe>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!("Reachability monitor started (interval: {:?})", period);

        let mut connected = true;
        let mut interval = tokio::time::interval(period);

        loop {
            interval.tick().await;

            if message_tx.is_closed() {
                break;
            }

            let reachable = probe.is_reachable().await;
            if reachable == connected {
                tracing::trace!("Reachability unchanged ({})", reachable);
                continue;
            }

            if reachable {
                tracing::info!("Network reachable");
            } else {
                tracing::warn!("Network unreachable");
            }
            connected = reachable;

            if message_tx
                .send(SessionMessage::Connectivity(reachable))
                .is_err()
            {
                break;
            }
        }

        tracing::debug!("Reachability monitor stopped");
    })
}

/// Spawn the monitor probing `url` over HTTP.
pub fn spawn_reachability_monitor(
    message_tx: mpsc::UnboundedSender<SessionMessage>,
    url: &str,
    period: Duration,
    request_timeout: Duration,
) -> JoinHandle<()> {
    let probe = HttpReachabilityProbe::new(ReqwestHttpClient::with_timeout(request_timeout), url);
    spawn_reachability_monitor_with_probe(message_tx, Arc::new(probe), period)
}
