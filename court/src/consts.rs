//! Shared numeric constants for the court crate.

// ── Court geometry ──────────────────────────────────────────────

/// Width of the editing canvas in pixels.
pub const COURT_WIDTH_PX: f64 = 300.0;

/// Height of the editing canvas in pixels.
pub const COURT_HEIGHT_PX: f64 = 600.0;

/// Margin between the canvas edge and the doubles boundary.
pub const COURT_MARGIN_PX: f64 = 30.0;

/// Vertical center line of the court; the mirror axis for horizontal flips.
pub const COURT_CENTER_X: f64 = COURT_MARGIN_PX + (COURT_WIDTH_PX - COURT_MARGIN_PX * 2.0) / 2.0;

// ── Rally speed model ───────────────────────────────────────────

/// Ball travel speed in pixels per second.
pub const BALL_SPEED_PX_S: f64 = 200.0;

/// Player running speed in pixels per second.
pub const PLAYER_SPEED_PX_S: f64 = 150.0;

/// Pause after a shot lands before the rally advances.
pub const POST_SHOT_PAUSE_MS: f64 = 300.0;

/// Playback window for a drill with nothing to animate.
pub const EMPTY_TIMELINE_MS: f64 = 3000.0;

// ── Playback ────────────────────────────────────────────────────

/// Fixed tick cadence for every playback surface.
pub const TICK_INTERVAL_MS: u32 = 50;

// ── Editing ─────────────────────────────────────────────────────

/// Undo stack bound; the oldest entry is evicted beyond this.
pub const HISTORY_LIMIT: usize = 50;

/// Click radius around a player's current position.
pub const PLAYER_HIT_RADIUS_PX: f64 = 15.0;

/// Shot type used when the editor has none selected.
pub const DEFAULT_SHOT_TYPE: &str = "forehand";
