#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::PLAYER_HIT_RADIUS_PX;
use crate::doc::{Element, ElementId};
use crate::geom::Point;
use crate::resolve::PositionMap;

/// First player (in insertion order) within the hit radius of `pt`.
///
/// Players are tested at their current resolved position, falling back to
/// their base placement when `positions` has no entry.
#[must_use]
pub fn player_at(pt: Point, elements: &[Element], positions: &PositionMap) -> Option<ElementId> {
    elements
        .iter()
        .filter_map(Element::as_player)
        .find(|p| {
            let at = positions.get(&p.id).copied().unwrap_or_else(|| p.position());
            at.distance_to(pt) <= PLAYER_HIT_RADIUS_PX
        })
        .map(|p| p.id)
}
