//! Per-surface playback: one clock, one compiled timeline, one surface.
//!
//! A `Player` has no timer. Its host schedules [`Player::tick`] every
//! [`crate::consts::TICK_INTERVAL_MS`] and drops the schedule on pause or
//! close. Because the clock state and the render happen in the same `&mut`
//! call, a tick that arrives after `pause`/`reset` sees a non-playing clock
//! and draws nothing.

#[cfg(test)]
#[path = "player_test.rs"]
mod player_test;

use std::sync::Arc;

use tracing::debug;

use crate::clock::{ClockState, PlaybackClock, Tick};
use crate::doc::Element;
use crate::error::SurfaceError;
use crate::rally::{Timeline, compile};
use crate::render::{annotations, render_frame};
use crate::surface::CourtSurface;

pub struct Player<S> {
    surface: S,
    clock: PlaybackClock,
    timeline: Timeline,
    elements: Arc<Vec<Element>>,
}

impl<S: CourtSurface> Player<S> {
    /// Compile `elements` and bind them to `surface`, stopped at zero.
    #[must_use]
    pub fn new(surface: S, elements: Arc<Vec<Element>>) -> Self {
        let timeline = compile(&elements);
        let clock = PlaybackClock::new(timeline.total_duration_ms());
        debug!(surface = ?surface.surface_id(), events = timeline.len(), "player created");
        Self { surface, clock, timeline, elements }
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[must_use]
    pub fn state(&self) -> ClockState {
        self.clock.state()
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.clock.elapsed_ms()
    }

    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.clock.total_ms()
    }

    /// Whether the bound drill has anything to animate.
    #[must_use]
    pub fn has_animatable(&self) -> bool {
        self.elements.iter().any(Element::is_animatable)
    }

    /// Recompile after the annotation set changed. The playhead is kept,
    /// clamped to the new duration.
    pub fn reload(&mut self, elements: Arc<Vec<Element>>, now_ms: f64) {
        self.timeline = compile(&elements);
        self.elements = elements;
        self.clock.set_total(self.timeline.total_duration_ms(), now_ms);
        debug!(surface = ?self.surface.surface_id(), events = self.timeline.len(), "player reloaded");
    }

    /// Start or resume. Returns `false` when already playing.
    pub fn play(&mut self, now_ms: f64) -> bool {
        let started = self.clock.play(now_ms);
        if started {
            debug!(surface = ?self.surface.surface_id(), from_ms = self.clock.elapsed_ms(), "play");
        }
        started
    }

    /// Advance and draw one frame. Returns `Ok(None)` without drawing when
    /// the clock is not playing.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the surface rejects the frame.
    pub fn tick(&mut self, now_ms: f64) -> Result<Option<Tick>, SurfaceError> {
        let Some(tick) = self.clock.tick(now_ms) else {
            return Ok(None);
        };
        if tick.looped {
            debug!(surface = ?self.surface.surface_id(), "loop");
        }
        self.render_at(tick.elapsed_ms)?;
        Ok(Some(tick))
    }

    /// Stop advancing, keeping the current frame. Returns `false` when not
    /// playing.
    pub fn pause(&mut self) -> bool {
        let paused = self.clock.pause();
        if paused {
            debug!(surface = ?self.surface.surface_id(), at_ms = self.clock.elapsed_ms(), "pause");
        }
        paused
    }

    /// Jump to `to_ms` (clamped) and draw that frame immediately.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the surface rejects the frame.
    pub fn seek(&mut self, to_ms: f64, now_ms: f64) -> Result<f64, SurfaceError> {
        let at = self.clock.seek(to_ms, now_ms);
        debug!(surface = ?self.surface.surface_id(), at_ms = at, "seek");
        self.render_at(at)?;
        Ok(at)
    }

    /// Stop, rewind and show the static court with its annotations.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the surface rejects the redraw.
    pub fn reset(&mut self) -> Result<(), SurfaceError> {
        self.clock.reset();
        debug!(surface = ?self.surface.surface_id(), "reset");
        self.surface.set_timeline(0.0, self.clock.total_ms())?;
        self.surface.draw_static_court(false)?;
        self.surface.draw(&annotations(&self.elements, None))
    }

    /// Stop for good and hand the surface back.
    #[must_use]
    pub fn close(mut self) -> S {
        self.clock.reset();
        debug!(surface = ?self.surface.surface_id(), "player closed");
        self.surface
    }

    fn render_at(&mut self, elapsed_ms: f64) -> Result<(), SurfaceError> {
        let frame = render_frame(elapsed_ms, &self.timeline, &self.elements);
        self.surface.draw_static_court(true)?;
        self.surface.draw(&frame.commands())?;
        self.surface.set_timeline(elapsed_ms, self.clock.total_ms())
    }
}
