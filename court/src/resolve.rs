//! Position Resolver: where each player stands once every annotated action
//! has been applied.
//!
//! The map is derived state. It is never stored with a drill, and is rebuilt
//! from scratch after any destructive edit (flip, replicate, undo/redo, load).

#[cfg(test)]
#[path = "resolve_test.rs"]
mod resolve_test;

use std::collections::BTreeMap;

use tracing::warn;

use crate::doc::{Element, ElementId, RallyStep, rally_order};
use crate::geom::Point;

/// Current resting position per player.
pub type PositionMap = BTreeMap<ElementId, Point>;

/// Seed every player at its own position, then apply movement end points in
/// rally order. Shots do not relocate the shooter.
///
/// Actions referencing an unknown player are skipped.
#[must_use]
pub fn resolve(elements: &[Element]) -> PositionMap {
    let mut positions: PositionMap = elements
        .iter()
        .filter_map(Element::as_player)
        .map(|p| (p.id, p.position()))
        .collect();

    for step in rally_order(elements) {
        let RallyStep::Movement(m) = step else {
            continue;
        };
        match positions.get_mut(&m.player_id) {
            Some(pos) => *pos = m.end(),
            None => warn!(movement = %m.id, player = %m.player_id, "movement references unknown player"),
        }
    }
    positions
}

/// What put a player at a trail marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    Shot,
    Movement,
}

/// One position a player occupies over the course of the rally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionMarker {
    pub at: Point,
    /// 0 for the starting position, otherwise the action's sequence.
    pub sequence: u32,
    pub kind: MarkerKind,
}

/// Ordered position markers per player, for the static editing view.
///
/// Every player starts with a `Start` marker. A shot adds a marker where the
/// shooter stands when striking; a movement adds one at its end point.
#[must_use]
pub fn marker_trails(elements: &[Element]) -> BTreeMap<ElementId, Vec<PositionMarker>> {
    let mut current: PositionMap = PositionMap::new();
    let mut trails: BTreeMap<ElementId, Vec<PositionMarker>> = BTreeMap::new();
    for p in elements.iter().filter_map(Element::as_player) {
        current.insert(p.id, p.position());
        trails.insert(p.id, vec![PositionMarker { at: p.position(), sequence: 0, kind: MarkerKind::Start }]);
    }

    for step in rally_order(elements) {
        let player_id = step.player_id();
        let (Some(at), Some(trail)) = (current.get(&player_id).copied(), trails.get_mut(&player_id)) else {
            continue;
        };
        match step {
            RallyStep::Shot(s) => {
                trail.push(PositionMarker { at, sequence: s.sequence, kind: MarkerKind::Shot });
            }
            RallyStep::Movement(m) => {
                trail.push(PositionMarker { at: m.end(), sequence: m.sequence, kind: MarkerKind::Movement });
                current.insert(player_id, m.end());
            }
        }
    }
    trails
}
