//! Rally Compiler: turns an annotation set into a time-indexed timeline.
//!
//! DESIGN
//! ======
//! Shots and movements are merged and stable-sorted by sequence, then walked
//! once with a running clock. Every player's position is tracked from its
//! base placement, so each action starts where the player actually is at that
//! point of the rally rather than where it was when the action was drawn.
//!
//! Ball flight and running use constant speeds. A shot holds the clock for
//! its flight time plus a fixed pause; a movement holds it for its run time.
//! Start times therefore never decrease along the timeline, which gives the
//! causal ordering the renderer and the clock rely on.

#[cfg(test)]
#[path = "rally_test.rs"]
mod rally_test;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::consts::{BALL_SPEED_PX_S, EMPTY_TIMELINE_MS, PLAYER_SPEED_PX_S, POST_SHOT_PAUSE_MS};
use crate::doc::{Element, ElementId, RallyStep, rally_order};
use crate::geom::{Point, travel_ms};
use crate::resolve::PositionMap;

/// Speed model used by the compiler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RallyTuning {
    pub ball_speed_px_s: f64,
    pub player_speed_px_s: f64,
    pub post_shot_pause_ms: f64,
    /// Duration reported for a timeline with no events.
    pub empty_duration_ms: f64,
}

impl Default for RallyTuning {
    fn default() -> Self {
        Self {
            ball_speed_px_s: BALL_SPEED_PX_S,
            player_speed_px_s: PLAYER_SPEED_PX_S,
            post_shot_pause_ms: POST_SHOT_PAUSE_MS,
            empty_duration_ms: EMPTY_TIMELINE_MS,
        }
    }
}

/// Discriminant of a timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Shot,
    Movement,
}

/// What happens during a timeline event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RallyAction {
    /// The ball travels from the shooter to the target.
    #[serde(rename_all = "camelCase")]
    Shot {
        element_id: ElementId,
        player_id: ElementId,
        shot_type: String,
        sequence: u32,
        /// Where the shooter stood at this point of the rally.
        origin: Point,
        target: Point,
    },
    /// A player runs from its tracked position to a new one.
    #[serde(rename_all = "camelCase")]
    Movement {
        element_id: ElementId,
        player_id: ElementId,
        sequence: u32,
        from: Point,
        to: Point,
    },
}

impl RallyAction {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Shot { .. } => EventKind::Shot,
            Self::Movement { .. } => EventKind::Movement,
        }
    }

    #[must_use]
    pub fn player_id(&self) -> ElementId {
        match self {
            Self::Shot { player_id, .. } | Self::Movement { player_id, .. } => *player_id,
        }
    }

    /// Segment start and end.
    #[must_use]
    pub fn segment(&self) -> (Point, Point) {
        match self {
            Self::Shot { origin, target, .. } => (*origin, *target),
            Self::Movement { from, to, .. } => (*from, *to),
        }
    }
}

/// One timed action on the compiled timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub start_time_ms: f64,
    pub duration_ms: f64,
    pub action: RallyAction,
}

impl TimelineEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.action.kind()
    }

    #[must_use]
    pub fn end_time_ms(&self) -> f64 {
        self.start_time_ms + self.duration_ms
    }

    /// In flight at `elapsed_ms`: `start <= elapsed < end`.
    #[must_use]
    pub fn is_active_at(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.start_time_ms && elapsed_ms < self.end_time_ms()
    }

    /// Finished at `elapsed_ms`: `end <= elapsed`.
    #[must_use]
    pub fn is_complete_at(&self, elapsed_ms: f64) -> bool {
        self.end_time_ms() <= elapsed_ms
    }

    /// Fraction of the event covered at `elapsed_ms`, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress_at(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return if elapsed_ms >= self.start_time_ms { 1.0 } else { 0.0 };
        }
        ((elapsed_ms - self.start_time_ms) / self.duration_ms).clamp(0.0, 1.0)
    }
}

/// Compiled, chronologically ordered rally.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub events: Vec<TimelineEvent>,
    #[serde(skip)]
    empty_duration_ms: f64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self { events: Vec::new(), empty_duration_ms: EMPTY_TIMELINE_MS }
    }
}

impl Timeline {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Latest event end time, or the fixed empty-timeline window when there
    /// are no events.
    #[must_use]
    pub fn total_duration_ms(&self) -> f64 {
        if self.events.is_empty() {
            return self.empty_duration_ms;
        }
        self.events
            .iter()
            .map(TimelineEvent::end_time_ms)
            .fold(0.0, f64::max)
    }
}

/// Compile with the default speed model.
#[must_use]
pub fn compile(elements: &[Element]) -> Timeline {
    compile_with(elements, &RallyTuning::default())
}

/// Compile `elements` into a timeline using `tuning`.
///
/// Shots and movements whose player is not on the court are skipped.
#[must_use]
pub fn compile_with(elements: &[Element], tuning: &RallyTuning) -> Timeline {
    let mut positions: PositionMap = elements
        .iter()
        .filter_map(Element::as_player)
        .map(|p| (p.id, p.position()))
        .collect();

    let steps = rally_order(elements);
    debug!(steps = steps.len(), players = positions.len(), "compiling rally");

    let mut now_ms = 0.0;
    let mut events = Vec::with_capacity(steps.len());
    for step in steps {
        let player_id = step.player_id();
        let Some(at) = positions.get(&player_id).copied() else {
            warn!(player = %player_id, sequence = step.order(), "rally step references unknown player; skipped");
            continue;
        };

        match step {
            RallyStep::Shot(shot) => {
                let duration_ms = travel_ms(at, shot.end(), tuning.ball_speed_px_s);
                trace!(sequence = shot.sequence, player = %player_id, start_ms = now_ms, duration_ms, "shot");
                events.push(TimelineEvent {
                    start_time_ms: now_ms,
                    duration_ms,
                    action: RallyAction::Shot {
                        element_id: shot.id,
                        player_id,
                        shot_type: shot.shot_type.clone(),
                        sequence: shot.sequence,
                        origin: at,
                        target: shot.end(),
                    },
                });
                now_ms += duration_ms + tuning.post_shot_pause_ms;
            }
            RallyStep::Movement(movement) => {
                let duration_ms = travel_ms(at, movement.end(), tuning.player_speed_px_s);
                trace!(sequence = movement.sequence, player = %player_id, start_ms = now_ms, duration_ms, "movement");
                events.push(TimelineEvent {
                    start_time_ms: now_ms,
                    duration_ms,
                    action: RallyAction::Movement {
                        element_id: movement.id,
                        player_id,
                        sequence: movement.sequence,
                        from: at,
                        to: movement.end(),
                    },
                });
                positions.insert(player_id, movement.end());
                now_ms += duration_ms;
            }
        }
    }

    let timeline = Timeline { events, empty_duration_ms: tuning.empty_duration_ms };
    debug!(events = timeline.len(), total_ms = timeline.total_duration_ms(), "rally compiled");
    timeline
}
