//! Tick timer task.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::messages::SessionMessage;

/// Spawn a task sending `Tick(epoch)` every `period`, first one `period`
/// from now.
///
/// Stops when the session side of the channel is gone. Abort the handle to
/// stop it sooner.
pub fn spawn_tick_timer(
    message_tx: mpsc::UnboundedSender<SessionMessage>,
    period: Duration,
    epoch: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if message_tx.send(SessionMessage::Tick(epoch)).is_err() {
                tracing::debug!("Session channel closed, stopping tick timer");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_tick_timer(tx, Duration::from_secs(1), 7);

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(matches!(rx.try_recv(), Ok(SessionMessage::Tick(7))));

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_repeat() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_tick_timer(tx, Duration::from_secs(1), 1);

        tokio::time::sleep(Duration::from_millis(3500)).await;
        let mut ticks = 0;
        while rx.try_recv().is_ok() {
            ticks += 1;
        }
        assert_eq!(ticks, 3);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_tick_timer(tx, Duration::from_secs(1), 1);
        drop(rx);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(handle.is_finished());
    }
}
