//! Playback Clock: elapsed-time state machine for one playback surface.
//!
//! The clock owns no timer. Hosts read the wall clock and pass `now_ms` into
//! every call; a scheduler calls [`PlaybackClock::tick`] at a fixed cadence
//! while the clock is playing. Keeping the timer outside the clock lets every
//! surface own an independent instance with nothing shared between them.
//!
//! ```text
//! Stopped ──play──▶ Playing ◀──play── Paused
//!    ▲                 │  ──pause──▶     │
//!    └──────reset──────┴─────reset───────┘
//! ```
//!
//! `seek` is momentary: it moves the playhead and keeps the current state.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

/// Coarse playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Result of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub elapsed_ms: f64,
    /// The playhead ran past the end and wrapped to zero on this tick.
    pub looped: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackClock {
    state: ClockState,
    origin_ms: f64,
    elapsed_ms: f64,
    total_ms: f64,
}

impl PlaybackClock {
    /// A stopped clock at zero for a timeline of `total_ms`.
    #[must_use]
    pub fn new(total_ms: f64) -> Self {
        Self { state: ClockState::Stopped, origin_ms: 0.0, elapsed_ms: 0.0, total_ms: total_ms.max(0.0) }
    }

    #[must_use]
    pub fn state(&self) -> ClockState {
        self.state
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.state == ClockState::Playing
    }

    /// Playhead position as of the last tick, seek or pause.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    /// Start or resume from the current playhead. Returns `false` when the
    /// clock was already playing.
    pub fn play(&mut self, now_ms: f64) -> bool {
        if self.is_playing() {
            return false;
        }
        self.origin_ms = now_ms - self.elapsed_ms;
        self.state = ClockState::Playing;
        true
    }

    /// Advance to `now_ms`. Returns `None` unless playing.
    ///
    /// Reaching or passing the end wraps the playhead to exactly zero and
    /// restarts the origin at `now_ms`; the overshoot is dropped.
    pub fn tick(&mut self, now_ms: f64) -> Option<Tick> {
        if !self.is_playing() {
            return None;
        }
        let elapsed = now_ms - self.origin_ms;
        if elapsed >= self.total_ms {
            self.origin_ms = now_ms;
            self.elapsed_ms = 0.0;
            return Some(Tick { elapsed_ms: 0.0, looped: true });
        }
        self.elapsed_ms = elapsed.max(0.0);
        Some(Tick { elapsed_ms: self.elapsed_ms, looped: false })
    }

    /// Stop advancing and keep the playhead. Returns `false` when the clock
    /// was not playing.
    pub fn pause(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.state = ClockState::Paused;
        true
    }

    /// Move the playhead to `to_ms`, clamped to `[0, total]`, and return the
    /// clamped value. A playing clock continues from the new position.
    pub fn seek(&mut self, to_ms: f64, now_ms: f64) -> f64 {
        let clamped = if to_ms.is_nan() { 0.0 } else { to_ms.clamp(0.0, self.total_ms) };
        self.elapsed_ms = clamped;
        if self.is_playing() {
            self.origin_ms = now_ms - clamped;
        }
        clamped
    }

    /// Stop and rewind to zero.
    pub fn reset(&mut self) {
        self.state = ClockState::Stopped;
        self.elapsed_ms = 0.0;
        self.origin_ms = 0.0;
    }

    /// Swap in the duration of a recompiled timeline, keeping the playhead
    /// inside the new range.
    pub fn set_total(&mut self, total_ms: f64, now_ms: f64) {
        self.total_ms = total_ms.max(0.0);
        if self.elapsed_ms > self.total_ms {
            self.seek(self.total_ms, now_ms);
        }
    }
}
