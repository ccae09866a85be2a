//! Background tick task driving a [`Player`] on the tokio timer.
//!
//! DESIGN
//! ======
//! The task wakes every `TICK_INTERVAL_MS`, locks the player, ticks it and
//! forwards the resulting [`Tick`] over a channel. Clock check and render
//! happen under the same lock, so once a pause has taken the lock no later
//! tick can draw. Dropping the [`Ticker`] aborts the task.

#[cfg(test)]
#[path = "ticker_test.rs"]
mod ticker_test;

use std::sync::Arc;
use std::time::Duration;

use court::clock::Tick;
use court::consts::TICK_INTERVAL_MS;
use court::player::Player;
use court::surface::CourtSurface;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::warn;

const TICK_CHANNEL_CAPACITY: usize = 64;

/// Milliseconds since `epoch` on the tokio clock.
#[must_use]
pub fn now_ms(epoch: Instant) -> f64 {
    epoch.elapsed().as_secs_f64() * 1000.0
}

/// Handle to a running tick task.
pub struct Ticker {
    handle: JoinHandle<()>,
    ticks: mpsc::Receiver<Tick>,
}

impl Ticker {
    /// Spawn the tick task for `player`. Timestamps are measured from `epoch`.
    pub fn spawn<S>(player: Arc<Mutex<Player<S>>>, epoch: Instant) -> Self
    where
        S: CourtSurface + Send + 'static,
    {
        let (tx, ticks) = mpsc::channel(TICK_CHANNEL_CAPACITY);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(u64::from(TICK_INTERVAL_MS)));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let result = player.lock().await.tick(now_ms(epoch));
                match result {
                    Ok(Some(tick)) => {
                        if tx.send(tick).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => warn!(%err, "playback frame dropped"),
                }
            }
        });
        Self { handle, ticks }
    }

    /// Wait for the next rendered tick. `None` once the task has ended.
    pub async fn next_tick(&mut self) -> Option<Tick> {
        self.ticks.recv().await
    }

    /// Stop the task. Idempotent.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
