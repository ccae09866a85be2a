//! Drawing collaborator seam.
//!
//! A surface is one court canvas. It knows how to paint court geometry and
//! how to execute [`DrawCommand`]s; everything on top of the court comes from
//! the renderer.

use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;
use crate::render::DrawCommand;

/// The playback surfaces of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceId {
    /// Drill editor canvas with its preview controls.
    Editor,
    /// Live practice session canvas.
    Session,
    /// Drill preview modal.
    Preview,
}

impl SurfaceId {
    /// DOM id of the canvas element backing this surface.
    #[must_use]
    pub fn canvas_id(self) -> &'static str {
        match self {
            Self::Editor => "drill-court-canvas",
            Self::Session => "court-canvas",
            Self::Preview => "preview-court-canvas",
        }
    }
}

/// A court canvas plus its timeline slider.
pub trait CourtSurface {
    fn surface_id(&self) -> SurfaceId;

    /// Clear and paint the bare court. `suppress_annotations` is `true` when
    /// an animation frame is about to be drawn on top.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the canvas cannot be drawn to.
    fn draw_static_court(&mut self, suppress_annotations: bool) -> Result<(), SurfaceError>;

    /// Execute draw commands in order on top of the court.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the canvas cannot be drawn to.
    fn draw(&mut self, commands: &[DrawCommand]) -> Result<(), SurfaceError>;

    /// Sync the slider (`value = elapsed`, `max = total`) and the time readout.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the controls are missing.
    fn set_timeline(&mut self, elapsed_ms: f64, total_ms: f64) -> Result<(), SurfaceError>;
}
