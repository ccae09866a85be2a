//! Frame Renderer: converts a point in time on a compiled timeline into a
//! drawable frame, and the current annotation set into the static editing
//! overlay.
//!
//! Nothing here touches a canvas. Output is a flat list of [`DrawCommand`]s in
//! paint order which a [`crate::surface::CourtSurface`] executes. Court
//! geometry (lines, net, service boxes) is the surface's job.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use serde::Serialize;

use crate::doc::{Element, ElementId, player_number};
use crate::geom::Point;
use crate::rally::{EventKind, RallyAction, Timeline, TimelineEvent};
use crate::resolve::{MarkerKind, marker_trails};

// ── Palette ─────────────────────────────────────────────────────

const PLAYER_FILL: &str = "#ffff00";
const SHOT_MARKER_FILL: &str = "#ff6666";
const MOVEMENT_MARKER_FILL: &str = "#66ccff";
const SHOT_COLOR: &str = "#ff0000";
const MOVEMENT_COLOR: &str = "#0066cc";
const FADED_LABEL_COLOR: &str = "#999";
const INK: &str = "#000";
const BALL_FILL: &str = "#e6ff00";
const BALL_SEAM: &str = "#fff";
const BALL_SHADOW: &str = "rgba(0, 0, 0, 0.2)";

// ── Sizes ───────────────────────────────────────────────────────

const MARKER_RADIUS: f64 = 8.0;
const SELECTION_RING_RADIUS: f64 = 15.0;
const PLAYER_RADIUS: f64 = 10.0;
const BALL_RADIUS: f64 = 10.0;
const BALL_SEAM_RADIUS: f64 = 7.0;
const SHOT_ARROW_WIDTH: f64 = 4.0;
const SHOT_ARROW_HEAD: f64 = 15.0;
const MOVEMENT_ARROW_WIDTH: f64 = 3.0;
const MOVEMENT_ARROW_HEAD: f64 = 12.0;
const TRAIL_WIDTH: f64 = 2.0;
const ARROW_ANGLE: f64 = PI / 6.0;

const MOVEMENT_DASH: [f64; 2] = [8.0, 8.0];
const SELECTION_DASH: [f64; 2] = [5.0, 5.0];

const SHOT_ALPHA_ACTIVE: f64 = 0.8;
const SHOT_ALPHA_DONE: f64 = 0.3;
const MOVEMENT_ALPHA_ACTIVE: f64 = 0.6;
const MOVEMENT_ALPHA_DONE: f64 = 0.2;

const LABEL_FONT: &str = "10px Arial";
const MARKER_FONT: &str = "bold 10px Arial";
const PLAYER_FONT: &str = "bold 12px Arial";

// =============================================================
// Draw commands
// =============================================================

/// Line styling for strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
    /// Dash pattern; `None` draws solid.
    pub dash: Option<[f64; 2]>,
    pub alpha: f64,
}

impl Stroke {
    #[must_use]
    pub fn solid(color: &'static str, width: f64) -> Self {
        Self { color, width, dash: None, alpha: 1.0 }
    }

    #[must_use]
    pub fn dashed(color: &'static str, width: f64, dash: [f64; 2]) -> Self {
        Self { color, width, dash: Some(dash), alpha: 1.0 }
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}

/// One drawing primitive in court pixel space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Option<&'static str>,
        stroke: Option<Stroke>,
    },
    /// Clockwise arc from `start_angle` to `end_angle` (radians).
    #[serde(rename_all = "camelCase")]
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        stroke: Stroke,
    },
    Text {
        at: Point,
        text: String,
        font: &'static str,
        color: &'static str,
    },
}

/// Shaft plus two head strokes. The head is always solid.
fn arrow(out: &mut Vec<DrawCommand>, from: Point, to: Point, stroke: Stroke, head_len: f64) {
    out.push(DrawCommand::Line { from, to, stroke });
    let angle = (to.y - from.y).atan2(to.x - from.x);
    let head = Stroke { dash: None, ..stroke };
    for side in [angle - ARROW_ANGLE, angle + ARROW_ANGLE] {
        let tip = Point::new(to.x - head_len * side.cos(), to.y - head_len * side.sin());
        out.push(DrawCommand::Line { from: to, to: tip, stroke: head });
    }
}

fn segment_label_anchor(from: Point, to: Point) -> Point {
    let mid = from.midpoint(to);
    Point::new(mid.x + 10.0, mid.y - 5.0)
}

// =============================================================
// Animated frames
// =============================================================

/// A player drawn at its interpolated position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPose {
    pub player_id: ElementId,
    /// 1-based label number (`P1`, `P2`, ...).
    pub number: usize,
    pub at: Point,
}

/// A started shot or movement segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trail {
    pub kind: EventKind,
    pub from: Point,
    pub to: Point,
    pub active: bool,
    pub alpha: f64,
    /// `P{n}: {shotType}` for shots with a type.
    pub label: Option<String>,
}

/// Everything visible at one instant of playback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub elapsed_ms: f64,
    /// Absent until the first shot is struck.
    pub ball: Option<Point>,
    pub players: Vec<PlayerPose>,
    pub trails: Vec<Trail>,
}

impl Frame {
    /// Paint-ordered commands: trails, then players, then the ball on top.
    #[must_use]
    pub fn commands(&self) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        for trail in &self.trails {
            trail_commands(&mut out, trail);
        }
        for pose in &self.players {
            out.push(DrawCommand::Circle {
                center: pose.at,
                radius: PLAYER_RADIUS,
                fill: Some(PLAYER_FILL),
                stroke: Some(Stroke::solid(INK, 2.0)),
            });
            out.push(DrawCommand::Text {
                at: Point::new(pose.at.x - 15.0, pose.at.y - 15.0),
                text: format!("P{}", pose.number),
                font: PLAYER_FONT,
                color: INK,
            });
        }
        if let Some(ball) = self.ball {
            ball_commands(&mut out, ball);
        }
        out
    }
}

fn trail_commands(out: &mut Vec<DrawCommand>, trail: &Trail) {
    let stroke = match trail.kind {
        EventKind::Shot => Stroke::solid(SHOT_COLOR, TRAIL_WIDTH),
        EventKind::Movement => Stroke::dashed(MOVEMENT_COLOR, TRAIL_WIDTH, MOVEMENT_DASH),
    };
    out.push(DrawCommand::Line { from: trail.from, to: trail.to, stroke: stroke.with_alpha(trail.alpha) });
    if let Some(label) = &trail.label {
        out.push(DrawCommand::Text {
            at: segment_label_anchor(trail.from, trail.to),
            text: label.clone(),
            font: LABEL_FONT,
            color: if trail.active { SHOT_COLOR } else { FADED_LABEL_COLOR },
        });
    }
}

fn ball_commands(out: &mut Vec<DrawCommand>, at: Point) {
    out.push(DrawCommand::Circle { center: at, radius: BALL_RADIUS, fill: Some(BALL_FILL), stroke: None });
    let seam = Stroke::solid(BALL_SEAM, 2.0);
    out.push(DrawCommand::Arc {
        center: at,
        radius: BALL_SEAM_RADIUS,
        start_angle: -PI / 4.0,
        end_angle: 3.0 * PI / 4.0,
        stroke: seam,
    });
    out.push(DrawCommand::Arc {
        center: at,
        radius: BALL_SEAM_RADIUS,
        start_angle: 3.0 * PI / 4.0,
        end_angle: 7.0 * PI / 4.0,
        stroke: seam,
    });
    out.push(DrawCommand::Circle {
        center: Point::new(at.x + 1.0, at.y + 1.0),
        radius: BALL_RADIUS,
        fill: Some(BALL_SHADOW),
        stroke: None,
    });
}

/// Build the frame shown at `elapsed_ms` of `timeline`.
#[must_use]
pub fn render_frame(elapsed_ms: f64, timeline: &Timeline, elements: &[Element]) -> Frame {
    Frame {
        elapsed_ms,
        ball: ball_position(elapsed_ms, timeline),
        players: player_poses(elapsed_ms, timeline, elements),
        trails: trails(elapsed_ms, timeline, elements),
    }
}

/// The first in-flight shot carries the ball; otherwise it rests where the
/// most recently completed shot landed.
#[must_use]
pub fn ball_position(elapsed_ms: f64, timeline: &Timeline) -> Option<Point> {
    let shots = || timeline.events.iter().filter(|ev| ev.kind() == EventKind::Shot);
    if let Some(ev) = shots().find(|ev| ev.is_active_at(elapsed_ms)) {
        let (origin, target) = ev.action.segment();
        return Some(origin.lerp(target, ev.progress_at(elapsed_ms)));
    }
    shots()
        .rev()
        .find(|ev| ev.is_complete_at(elapsed_ms))
        .map(|ev| ev.action.segment().1)
}

/// Where `player_id` stands at `elapsed_ms`.
#[must_use]
pub fn player_position_at(elapsed_ms: f64, timeline: &Timeline, player_id: ElementId, base: Point) -> Point {
    let moves = || {
        timeline
            .events
            .iter()
            .filter(move |ev| ev.kind() == EventKind::Movement && ev.action.player_id() == player_id)
    };

    let mut known: Vec<(f64, Point)> = vec![(0.0, base)];
    known.extend(moves().map(|ev| (ev.end_time_ms(), ev.action.segment().1)));
    known.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut at = known
        .iter()
        .rev()
        .find(|(t, _)| elapsed_ms >= *t)
        .map_or(base, |(_, p)| *p);

    for ev in moves().filter(|ev| ev.is_active_at(elapsed_ms)) {
        let (from, to) = ev.action.segment();
        at = from.lerp(to, ev.progress_at(elapsed_ms));
    }
    at
}

fn player_poses(elapsed_ms: f64, timeline: &Timeline, elements: &[Element]) -> Vec<PlayerPose> {
    elements
        .iter()
        .filter_map(Element::as_player)
        .map(|p| PlayerPose {
            player_id: p.id,
            number: player_number(elements, p.id).unwrap_or_default(),
            at: player_position_at(elapsed_ms, timeline, p.id, p.position()),
        })
        .collect()
}

fn trails(elapsed_ms: f64, timeline: &Timeline, elements: &[Element]) -> Vec<Trail> {
    let started = |ev: &&TimelineEvent| elapsed_ms >= ev.start_time_ms;
    let mut out: Vec<Trail> = timeline
        .events
        .iter()
        .filter(started)
        .filter(|ev| ev.kind() == EventKind::Shot)
        .map(|ev| {
            let active = ev.is_active_at(elapsed_ms);
            let (from, to) = ev.action.segment();
            let label = match &ev.action {
                RallyAction::Shot { shot_type, player_id, .. } if !shot_type.is_empty() => Some(format!(
                    "P{}: {shot_type}",
                    player_number(elements, *player_id).unwrap_or_default()
                )),
                _ => None,
            };
            Trail {
                kind: EventKind::Shot,
                from,
                to,
                active,
                alpha: if active { SHOT_ALPHA_ACTIVE } else { SHOT_ALPHA_DONE },
                label,
            }
        })
        .collect();
    out.extend(
        timeline
            .events
            .iter()
            .filter(started)
            .filter(|ev| ev.kind() == EventKind::Movement)
            .map(|ev| {
                let active = ev.is_active_at(elapsed_ms);
                let (from, to) = ev.action.segment();
                Trail {
                    kind: EventKind::Movement,
                    from,
                    to,
                    active,
                    alpha: if active { MOVEMENT_ALPHA_ACTIVE } else { MOVEMENT_ALPHA_DONE },
                    label: None,
                }
            }),
    );
    out
}

// =============================================================
// Static editing overlay
// =============================================================

/// Overlay for the editing view: every player's position trail, then shot and
/// movement arrows as drawn.
///
/// `selected` highlights one player's markers and rings its latest position.
#[must_use]
pub fn annotations(elements: &[Element], selected: Option<ElementId>) -> Vec<DrawCommand> {
    let mut out = Vec::new();
    let trails = marker_trails(elements);

    for player in elements.iter().filter_map(Element::as_player) {
        let Some(markers) = trails.get(&player.id) else {
            continue;
        };
        let number = player_number(elements, player.id).unwrap_or_default();
        let is_selected = selected == Some(player.id);
        let border = if is_selected { Stroke::solid(SHOT_COLOR, 3.0) } else { Stroke::solid(INK, 1.0) };

        for (idx, marker) in markers.iter().enumerate() {
            let fill = match marker.kind {
                MarkerKind::Start => PLAYER_FILL,
                MarkerKind::Shot => SHOT_MARKER_FILL,
                MarkerKind::Movement => MOVEMENT_MARKER_FILL,
            };
            out.push(DrawCommand::Circle {
                center: marker.at,
                radius: MARKER_RADIUS,
                fill: Some(fill),
                stroke: Some(border),
            });
            if is_selected && idx + 1 == markers.len() {
                out.push(DrawCommand::Circle {
                    center: marker.at,
                    radius: SELECTION_RING_RADIUS,
                    fill: None,
                    stroke: Some(Stroke::dashed(SHOT_COLOR, 2.0, SELECTION_DASH)),
                });
            }
            let (text, dx) = if marker.sequence == 0 {
                (format!("P{number}"), 12.0)
            } else {
                (format!("P{number}-{}", marker.sequence), 15.0)
            };
            out.push(DrawCommand::Text {
                at: Point::new(marker.at.x - dx, marker.at.y - 12.0),
                text,
                font: MARKER_FONT,
                color: INK,
            });
        }
    }

    for el in elements {
        if let Element::Shot(shot) = el {
            arrow(&mut out, shot.start(), shot.end(), Stroke::solid(SHOT_COLOR, SHOT_ARROW_WIDTH), SHOT_ARROW_HEAD);
            if !shot.shot_type.is_empty() {
                let number = player_number(elements, shot.player_id).unwrap_or_default();
                out.push(DrawCommand::Text {
                    at: segment_label_anchor(shot.start(), shot.end()),
                    text: format!("P{number}: {} ({})", shot.shot_type, shot.sequence.max(1)),
                    font: LABEL_FONT,
                    color: SHOT_COLOR,
                });
            }
        }
    }

    for el in elements {
        if let Element::Movement(movement) = el {
            arrow(
                &mut out,
                movement.start(),
                movement.end(),
                Stroke::dashed(MOVEMENT_COLOR, MOVEMENT_ARROW_WIDTH, MOVEMENT_DASH),
                MOVEMENT_ARROW_HEAD,
            );
            let number = player_number(elements, movement.player_id).unwrap_or_default();
            out.push(DrawCommand::Text {
                at: segment_label_anchor(movement.start(), movement.end()),
                text: format!("P{number}: Move ({})", movement.sequence.max(1)),
                font: LABEL_FONT,
                color: MOVEMENT_COLOR,
            });
        }
    }

    out
}

/// Timeline readout, e.g. `"1.5s / 3.0s"`.
#[must_use]
pub fn timeline_label(elapsed_ms: f64, total_ms: f64) -> String {
    format!("{:.1}s / {:.1}s", elapsed_ms / 1000.0, total_ms / 1000.0)
}
