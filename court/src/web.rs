//! Browser host: a `Canvas2D` court surface and interval-driven playback.
//!
//! This is the only module that touches the DOM. Court geometry is drawn by a
//! host-supplied JavaScript function; everything on top of it is executed
//! here from [`DrawCommand`]s.
//!
//! Each [`WebPlayback`] owns its own `Interval`. Dropping the interval cancels
//! it, and pause, reset and close all drop it before touching the player.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use std::sync::Arc;

use gloo_timers::callback::Interval;
use js_sys::{Array, Date, Function};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::TICK_INTERVAL_MS;
use crate::doc::Element;
use crate::error::SurfaceError;
use crate::player::Player;
use crate::render::{DrawCommand, Stroke, timeline_label};
use crate::surface::{CourtSurface, SurfaceId};

fn js_error(id: SurfaceId, err: &JsValue) -> SurfaceError {
    let message = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    SurfaceError::new(id.canvas_id(), message)
}

// =============================================================
// Surface
// =============================================================

/// A court canvas in the page.
pub struct Canvas2dSurface {
    id: SurfaceId,
    ctx: CanvasRenderingContext2d,
    /// `drawStaticCourt(canvasId, suppressAnnotations)`
    draw_court: Function,
    /// `(elapsedMs, totalMs, label)`; slider and readout sync.
    on_timeline: Option<Function>,
}

impl Canvas2dSurface {
    /// Bind to `canvas` and the page's court-drawing function.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the canvas has no 2D context.
    pub fn new(
        id: SurfaceId,
        canvas: &HtmlCanvasElement,
        draw_court: Function,
        on_timeline: Option<Function>,
    ) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|err| js_error(id, &err))?
            .ok_or_else(|| SurfaceError::new(id.canvas_id(), "2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|obj| js_error(id, &obj))?;
        Ok(Self { id, ctx, draw_court, on_timeline })
    }
}

impl CourtSurface for Canvas2dSurface {
    fn surface_id(&self) -> SurfaceId {
        self.id
    }

    fn draw_static_court(&mut self, suppress_annotations: bool) -> Result<(), SurfaceError> {
        self.draw_court
            .call2(
                &JsValue::NULL,
                &JsValue::from_str(self.id.canvas_id()),
                &JsValue::from_bool(suppress_annotations),
            )
            .map_err(|err| js_error(self.id, &err))?;
        Ok(())
    }

    fn draw(&mut self, commands: &[DrawCommand]) -> Result<(), SurfaceError> {
        for cmd in commands {
            self.ctx.save();
            let result = execute(&self.ctx, cmd);
            self.ctx.restore();
            result.map_err(|err| js_error(self.id, &err))?;
        }
        Ok(())
    }

    fn set_timeline(&mut self, elapsed_ms: f64, total_ms: f64) -> Result<(), SurfaceError> {
        let Some(on_timeline) = &self.on_timeline else {
            return Ok(());
        };
        let args = Array::of3(
            &JsValue::from_f64(elapsed_ms),
            &JsValue::from_f64(total_ms),
            &JsValue::from_str(&timeline_label(elapsed_ms, total_ms)),
        );
        on_timeline
            .apply(&JsValue::NULL, &args)
            .map_err(|err| js_error(self.id, &err))?;
        Ok(())
    }
}

fn execute(ctx: &CanvasRenderingContext2d, cmd: &DrawCommand) -> Result<(), JsValue> {
    match cmd {
        DrawCommand::Line { from, to, stroke } => {
            apply_stroke(ctx, stroke)?;
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.stroke();
        }
        DrawCommand::Circle { center, radius, fill, stroke } => {
            ctx.begin_path();
            ctx.arc(center.x, center.y, *radius, 0.0, TAU)?;
            if let Some(fill) = fill {
                ctx.set_fill_style_str(fill);
                ctx.fill();
            }
            if let Some(stroke) = stroke {
                apply_stroke(ctx, stroke)?;
                ctx.stroke();
            }
        }
        DrawCommand::Arc { center, radius, start_angle, end_angle, stroke } => {
            apply_stroke(ctx, stroke)?;
            ctx.begin_path();
            ctx.arc(center.x, center.y, *radius, *start_angle, *end_angle)?;
            ctx.stroke();
        }
        DrawCommand::Text { at, text, font, color } => {
            ctx.set_font(font);
            ctx.set_fill_style_str(color);
            ctx.fill_text(text, at.x, at.y)?;
        }
    }
    Ok(())
}

fn apply_stroke(ctx: &CanvasRenderingContext2d, stroke: &Stroke) -> Result<(), JsValue> {
    ctx.set_stroke_style_str(stroke.color);
    ctx.set_line_width(stroke.width);
    ctx.set_global_alpha(stroke.alpha);
    let segments = Array::new();
    if let Some([on, off]) = stroke.dash {
        segments.push(&JsValue::from_f64(on));
        segments.push(&JsValue::from_f64(off));
    }
    ctx.set_line_dash(&segments)
}

// =============================================================
// Scheduling
// =============================================================

/// Interval-driven playback for one surface.
pub struct WebPlayback<S: CourtSurface + 'static> {
    player: Rc<RefCell<Player<S>>>,
    tick: Option<Interval>,
}

impl<S: CourtSurface + 'static> WebPlayback<S> {
    #[must_use]
    pub fn new(player: Player<S>) -> Self {
        Self { player: Rc::new(RefCell::new(player)), tick: None }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.tick.is_some()
    }

    /// Start ticking every [`TICK_INTERVAL_MS`]. No-op while playing.
    pub fn play(&mut self) {
        if self.tick.is_some() || !self.player.borrow_mut().play(Date::now()) {
            return;
        }
        let player = Rc::clone(&self.player);
        self.tick = Some(Interval::new(TICK_INTERVAL_MS, move || {
            let Ok(mut player) = player.try_borrow_mut() else {
                return;
            };
            if let Err(err) = player.tick(Date::now()) {
                tracing::warn!(%err, "playback frame dropped");
            }
        }));
    }

    /// Cancel the interval, then pause the clock.
    pub fn pause(&mut self) {
        self.tick = None;
        self.player.borrow_mut().pause();
    }

    /// Jump to `to_ms` and draw it.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the surface rejects the frame.
    pub fn seek(&mut self, to_ms: f64) -> Result<f64, SurfaceError> {
        self.player.borrow_mut().seek(to_ms, Date::now())
    }

    /// Cancel the interval, rewind and redraw the static court.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the surface rejects the redraw.
    pub fn reset(&mut self) -> Result<(), SurfaceError> {
        self.tick = None;
        self.player.borrow_mut().reset()
    }

    /// Recompile after an edit.
    pub fn reload(&mut self, elements: Arc<Vec<Element>>) {
        self.player.borrow_mut().reload(elements, Date::now());
    }

    /// Cancel the interval and stop the clock; the surface is released with
    /// the player.
    pub fn close(mut self) {
        self.tick = None;
        self.player.borrow_mut().pause();
    }
}
