//! Native playback controls for one surface: a shared [`Player`] plus the
//! [`Ticker`] that runs while playing.

#[cfg(test)]
#[path = "playback_test.rs"]
mod playback_test;

use std::sync::Arc;

use court::clock::{ClockState, Tick};
use court::error::SurfaceError;
use court::player::Player;
use court::surface::CourtSurface;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::ticker::{Ticker, now_ms};

pub struct Playback<S> {
    player: Arc<Mutex<Player<S>>>,
    ticker: Option<Ticker>,
    epoch: Instant,
}

impl<S: CourtSurface + Send + 'static> Playback<S> {
    #[must_use]
    pub fn new(player: Player<S>) -> Self {
        Self { player: Arc::new(Mutex::new(player)), ticker: None, epoch: Instant::now() }
    }

    pub async fn state(&self) -> ClockState {
        self.player.lock().await.state()
    }

    /// Read the player under its lock.
    pub async fn inspect<R>(&self, f: impl FnOnce(&Player<S>) -> R) -> R {
        f(&*self.player.lock().await)
    }

    /// Start or resume and spawn the ticker. Returns `false` when already
    /// playing.
    pub async fn play(&mut self) -> bool {
        if !self.player.lock().await.play(now_ms(self.epoch)) {
            return false;
        }
        self.ticker = Some(Ticker::spawn(Arc::clone(&self.player), self.epoch));
        true
    }

    /// Cancel the ticker, then pause the clock.
    pub async fn pause(&mut self) -> bool {
        self.stop_ticker();
        self.player.lock().await.pause()
    }

    /// Jump to `to_ms` and draw that frame.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the surface rejects the frame.
    pub async fn seek(&mut self, to_ms: f64) -> Result<f64, SurfaceError> {
        let now = now_ms(self.epoch);
        self.player.lock().await.seek(to_ms, now)
    }

    /// Cancel the ticker, rewind and show the static court.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the surface rejects the redraw.
    pub async fn reset(&mut self) -> Result<(), SurfaceError> {
        self.stop_ticker();
        self.player.lock().await.reset()
    }

    /// Next rendered tick, or `None` when not playing.
    pub async fn next_tick(&mut self) -> Option<Tick> {
        match self.ticker.as_mut() {
            Some(ticker) => ticker.next_tick().await,
            None => None,
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}
