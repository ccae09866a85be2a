//! Headless court surface that reports what it would draw through `tracing`.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use court::error::SurfaceError;
use court::render::{DrawCommand, timeline_label};
use court::surface::{CourtSurface, SurfaceId};
use tracing::{debug, trace};

/// Remembers the last frame so callers can inspect or print it.
#[derive(Debug)]
pub struct LogSurface {
    id: SurfaceId,
    court_draws: usize,
    last_commands: Vec<DrawCommand>,
    timeline: (f64, f64),
}

impl LogSurface {
    #[must_use]
    pub fn new(id: SurfaceId) -> Self {
        Self { id, court_draws: 0, last_commands: Vec::new(), timeline: (0.0, 0.0) }
    }

    /// Times the bare court was painted.
    #[must_use]
    pub fn court_draws(&self) -> usize {
        self.court_draws
    }

    /// Commands drawn since the court was last painted.
    #[must_use]
    pub fn last_commands(&self) -> &[DrawCommand] {
        &self.last_commands
    }

    /// `(elapsed_ms, total_ms)` as last shown on the slider.
    #[must_use]
    pub fn timeline(&self) -> (f64, f64) {
        self.timeline
    }
}

impl CourtSurface for LogSurface {
    fn surface_id(&self) -> SurfaceId {
        self.id
    }

    fn draw_static_court(&mut self, suppress_annotations: bool) -> Result<(), SurfaceError> {
        self.court_draws += 1;
        self.last_commands.clear();
        trace!(canvas = self.id.canvas_id(), suppress_annotations, "court");
        Ok(())
    }

    fn draw(&mut self, commands: &[DrawCommand]) -> Result<(), SurfaceError> {
        trace!(canvas = self.id.canvas_id(), commands = commands.len(), "draw");
        self.last_commands.extend_from_slice(commands);
        Ok(())
    }

    fn set_timeline(&mut self, elapsed_ms: f64, total_ms: f64) -> Result<(), SurfaceError> {
        self.timeline = (elapsed_ms, total_ms);
        debug!(canvas = self.id.canvas_id(), "{}", timeline_label(elapsed_ms, total_ms));
        Ok(())
    }
}
