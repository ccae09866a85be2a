//! Document model: court annotations and the in-memory Annotation Store.
//!
//! This module defines what a drill is made of (`Element`: players, shots and
//! movements), the id source used to mint element ids (`IdSource`), and the
//! store that owns the live element list for one editing or playback session
//! (`AnnotationStore`).
//!
//! Elements are serialized in the drill library's JSON shape (`type` tag,
//! camelCase fields) so a drill's `courtElements` array round-trips unchanged.
//! The store keeps its list behind an `Arc` and mutates clone-on-write, which
//! lets history snapshots share structure with the live list without aliasing.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::EditError;
use crate::geom::Point;

/// Unique identifier for a court element, unique within one session.
///
/// Older libraries hold fractional ids on replicated drills; those are
/// rounded to the nearest integer on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl<'de> Deserialize<'de> for ElementId {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Whole(u64),
            Fractional(f64),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Whole(id) => Ok(Self(id)),
            RawId::Fractional(id) if id.is_finite() && id >= 0.0 && id < u64::MAX as f64 => {
                Ok(Self(id.round() as u64))
            }
            RawId::Fractional(id) => Err(D::Error::custom(format!("invalid element id {id}"))),
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn default_sequence() -> u32 {
    1
}

/// `null` orders like an absent sequence.
fn sequence_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_sequence))
}

/// A player placed on the court at its starting position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMark {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
}

impl PlayerMark {
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One player's ball strike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    pub id: ElementId,
    pub player_id: ElementId,
    #[serde(default)]
    pub shot_type: String,
    /// Player position captured when the shot was drawn.
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    #[serde(default = "default_sequence", deserialize_with = "sequence_or_default")]
    pub sequence: u32,
}

impl Shot {
    #[must_use]
    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    #[must_use]
    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }
}

/// One player's repositioning without the ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: ElementId,
    pub player_id: ElementId,
    /// Player position captured when the movement was drawn.
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    #[serde(default = "default_sequence", deserialize_with = "sequence_or_default")]
    pub sequence: u32,
}

impl Movement {
    #[must_use]
    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    #[must_use]
    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }
}

/// A court annotation as stored in a drill and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Player(PlayerMark),
    Shot(Shot),
    Movement(Movement),
}

impl Element {
    #[must_use]
    pub fn id(&self) -> ElementId {
        match self {
            Self::Player(p) => p.id,
            Self::Shot(s) => s.id,
            Self::Movement(m) => m.id,
        }
    }

    /// The acting player for shots and movements.
    #[must_use]
    pub fn player_id(&self) -> Option<ElementId> {
        match self {
            Self::Player(_) => None,
            Self::Shot(s) => Some(s.player_id),
            Self::Movement(m) => Some(m.player_id),
        }
    }

    /// Stored sequence number for shots and movements.
    #[must_use]
    pub fn sequence(&self) -> Option<u32> {
        match self {
            Self::Player(_) => None,
            Self::Shot(s) => Some(s.sequence),
            Self::Movement(m) => Some(m.sequence),
        }
    }

    #[must_use]
    pub fn as_player(&self) -> Option<&PlayerMark> {
        match self {
            Self::Player(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_animatable(&self) -> bool {
        matches!(self, Self::Shot(_) | Self::Movement(_))
    }

    fn flip_horizontal(&mut self, axis_x: f64) {
        match self {
            Self::Player(p) => p.x = p.position().mirrored_x(axis_x).x,
            Self::Shot(s) => {
                s.start_x = s.start().mirrored_x(axis_x).x;
                s.end_x = s.end().mirrored_x(axis_x).x;
            }
            Self::Movement(m) => {
                m.start_x = m.start().mirrored_x(axis_x).x;
                m.end_x = m.end().mirrored_x(axis_x).x;
            }
        }
    }
}

/// A shot or movement, borrowed from an element list in rally order.
#[derive(Debug, Clone, Copy)]
pub enum RallyStep<'a> {
    Shot(&'a Shot),
    Movement(&'a Movement),
}

impl RallyStep<'_> {
    #[must_use]
    pub fn player_id(&self) -> ElementId {
        match self {
            Self::Shot(s) => s.player_id,
            Self::Movement(m) => m.player_id,
        }
    }

    /// Ordering key. A zero (unset) sequence orders as 1.
    #[must_use]
    pub fn order(&self) -> u32 {
        let raw = match self {
            Self::Shot(s) => s.sequence,
            Self::Movement(m) => m.sequence,
        };
        raw.max(1)
    }
}

/// All shots and movements, stable-sorted by sequence.
///
/// Equal sequence numbers keep their relative order in `elements`.
#[must_use]
pub fn rally_order(elements: &[Element]) -> Vec<RallyStep<'_>> {
    let mut steps: Vec<RallyStep<'_>> = elements
        .iter()
        .filter_map(|el| match el {
            Element::Shot(s) => Some(RallyStep::Shot(s)),
            Element::Movement(m) => Some(RallyStep::Movement(m)),
            Element::Player(_) => None,
        })
        .collect();
    steps.sort_by_key(RallyStep::order);
    steps
}

/// 1-based label number of a player: its rank among players sorted by id.
#[must_use]
pub fn player_number(elements: &[Element], player_id: ElementId) -> Option<usize> {
    let mut ids: Vec<ElementId> = elements
        .iter()
        .filter_map(Element::as_player)
        .map(|p| p.id)
        .collect();
    ids.sort_unstable();
    ids.iter().position(|id| *id == player_id).map(|idx| idx + 1)
}

// =============================================================
// Id source
// =============================================================

/// Mints element ids for a store.
pub trait IdSource {
    /// Return an id never handed out before by this source.
    fn next_id(&mut self) -> ElementId;

    /// Record an id that entered the store from outside (a loaded drill), so
    /// later ids cannot collide with it.
    fn observe(&mut self, _id: ElementId) {}
}

/// Monotonic counter starting at 1.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    last: u64,
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> ElementId {
        self.last += 1;
        ElementId(self.last)
    }

    fn observe(&mut self, id: ElementId) {
        self.last = self.last.max(id.0);
    }
}

// =============================================================
// Annotation store
// =============================================================

/// In-memory, insertion-ordered list of court elements for one drill.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore<I = SequentialIds> {
    elements: Arc<Vec<Element>>,
    ids: I,
}

impl AnnotationStore<SequentialIds> {
    /// Create an empty store backed by a sequential id counter.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ids(SequentialIds::default())
    }
}

impl<I: IdSource> AnnotationStore<I> {
    /// Create an empty store with an injected id source.
    #[must_use]
    pub fn with_ids(ids: I) -> Self {
        Self { elements: Arc::new(Vec::new()), ids }
    }

    /// All elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Shared handle to the current list, for snapshots.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<Element>> {
        Arc::clone(&self.elements)
    }

    /// Replace the list with a previously taken snapshot.
    pub fn restore(&mut self, elements: Arc<Vec<Element>>) {
        for el in elements.iter() {
            self.ids.observe(el.id());
        }
        self.elements = elements;
    }

    /// Replace all elements wholesale (drill loaded for edit or preview).
    pub fn load(&mut self, elements: Vec<Element>) {
        self.restore(Arc::new(elements));
    }

    /// Replace all elements with a deep copy of `source` carrying fresh ids.
    ///
    /// Shot and movement `player_id`s are remapped to the copied players.
    /// References to players absent from `source` are kept as they were.
    pub fn replicate(&mut self, source: &[Element]) {
        let mut player_ids: HashMap<ElementId, ElementId> = HashMap::new();
        let mut copied = Vec::with_capacity(source.len());
        for el in source {
            let mut el = el.clone();
            let fresh = self.ids.next_id();
            match &mut el {
                Element::Player(p) => {
                    player_ids.insert(p.id, fresh);
                    p.id = fresh;
                }
                Element::Shot(s) => s.id = fresh,
                Element::Movement(m) => m.id = fresh,
            }
            copied.push(el);
        }
        for el in &mut copied {
            match el {
                Element::Shot(s) => {
                    if let Some(id) = player_ids.get(&s.player_id) {
                        s.player_id = *id;
                    }
                }
                Element::Movement(m) => {
                    if let Some(id) = player_ids.get(&m.player_id) {
                        m.player_id = *id;
                    }
                }
                Element::Player(_) => {}
            }
        }
        self.elements = Arc::new(copied);
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.elements = Arc::new(Vec::new());
    }

    /// Mirror every element across the vertical line `x = axis_x`.
    pub fn flip_horizontal(&mut self, axis_x: f64) {
        for el in Arc::make_mut(&mut self.elements) {
            el.flip_horizontal(axis_x);
        }
    }

    /// Place a new player.
    pub fn add_player(&mut self, at: Point) -> ElementId {
        let id = self.ids.next_id();
        Arc::make_mut(&mut self.elements).push(Element::Player(PlayerMark { id, x: at.x, y: at.y }));
        id
    }

    /// Record a shot by `player_id` from `start` toward `end`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownPlayer`] if no such player is in the store.
    pub fn add_shot(
        &mut self,
        player_id: ElementId,
        shot_type: impl Into<String>,
        start: Point,
        end: Point,
    ) -> Result<ElementId, EditError> {
        self.require_player(player_id)?;
        let id = self.ids.next_id();
        let sequence = self.next_sequence();
        Arc::make_mut(&mut self.elements).push(Element::Shot(Shot {
            id,
            player_id,
            shot_type: shot_type.into(),
            start_x: start.x,
            start_y: start.y,
            end_x: end.x,
            end_y: end.y,
            sequence,
        }));
        Ok(id)
    }

    /// Record a movement of `player_id` from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownPlayer`] if no such player is in the store.
    pub fn add_movement(&mut self, player_id: ElementId, start: Point, end: Point) -> Result<ElementId, EditError> {
        self.require_player(player_id)?;
        let id = self.ids.next_id();
        let sequence = self.next_sequence();
        Arc::make_mut(&mut self.elements).push(Element::Movement(Movement {
            id,
            player_id,
            start_x: start.x,
            start_y: start.y,
            end_x: end.x,
            end_y: end.y,
            sequence,
        }));
        Ok(id)
    }

    /// Sequence number for the next shot or movement: one past the highest
    /// stored, or 1 when none is stored.
    #[must_use]
    pub fn next_sequence(&self) -> u32 {
        self.elements
            .iter()
            .filter_map(Element::sequence)
            .filter(|seq| *seq > 0)
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, id: ElementId) -> Option<&PlayerMark> {
        self.elements
            .iter()
            .filter_map(Element::as_player)
            .find(|p| p.id == id)
    }

    /// All players in insertion order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerMark> {
        self.elements.iter().filter_map(Element::as_player)
    }

    /// Label number of a player (`P1`, `P2`, ...).
    #[must_use]
    pub fn player_number(&self, id: ElementId) -> Option<usize> {
        player_number(&self.elements, id)
    }

    /// Whether any shot or movement exists.
    #[must_use]
    pub fn has_animatable(&self) -> bool {
        self.elements.iter().any(Element::is_animatable)
    }

    /// Number of elements in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn require_player(&self, id: ElementId) -> Result<(), EditError> {
        if self.player(id).is_some() {
            Ok(())
        } else {
            Err(EditError::UnknownPlayer(id))
        }
    }
}
