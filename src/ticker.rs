//! Periodic tick signal with explicit teardown.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// A scheduled task emitting one signal per period until stopped.
///
/// The render loop owns one of these and consumes [`Ticker::tick`];
/// [`Ticker::stop`] aborts the underlying task so teardown is explicit
/// rather than a side effect of process exit.
pub struct Ticker {
    ticks: mpsc::Receiver<Instant>,
    task: JoinHandle<()>,
}

impl Ticker {
    pub fn start(period: Duration) -> Self {
        let (tx, ticks) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // A tokio interval fires immediately on the first tick; swallow
            // it so the signal stream starts one period from now.
            interval.tick().await;
            loop {
                let at = interval.tick().await;
                if tx.send(at).await.is_err() {
                    break;
                }
            }
        });
        Self { ticks, task }
    }

    /// Waits for the next tick. `None` once the ticker has been stopped.
    pub async fn tick(&mut self) -> Option<Instant> {
        self.ticks.recv().await
    }

    /// Stops the periodic task; pending signals still drain, then the
    /// stream ends.
    pub fn stop(&mut self) {
        self.task.abort();
        self.ticks.close();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn emits_periodic_signals() {
        let mut ticker = Ticker::start(Duration::from_millis(5));
        assert!(ticker.tick().await.is_some());
        assert!(ticker.tick().await.is_some());
    }

    #[tokio::test]
    async fn stream_ends_after_stop() {
        let mut ticker = Ticker::start(Duration::from_millis(5));
        assert!(ticker.tick().await.is_some());
        ticker.stop();
        let drained = time::timeout(Duration::from_millis(200), async {
            while ticker.tick().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok(), "stream must end after stop");
    }
}
