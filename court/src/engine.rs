//! Editor core: the drill editor's state and every editing operation.
//!
//! `EditorCore` owns the Annotation Store, the derived Position Map, the Edit
//! History and the editor session. It never draws. Hosts feed it clicks and
//! toolbar actions, then ask for [`EditorCore::static_commands`] or a compiled
//! [`Timeline`] to paint.
//!
//! Every mutation follows one shape: check preconditions, snapshot the
//! current state into history, mutate, re-derive positions. A failed
//! precondition returns before the snapshot, so errors leave store, positions
//! and history untouched.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::debug;

use crate::consts::COURT_CENTER_X;
use crate::doc::{AnnotationStore, Element, ElementId, IdSource, SequentialIds};
use crate::error::EditError;
use crate::geom::Point;
use crate::hit;
use crate::history::{EditHistory, EditLabel, Snapshot, TimeSource, system_now_ms};
use crate::input::{EditorSession, Tool};
use crate::rally::{Timeline, compile};
use crate::render::{DrawCommand, annotations};
use crate::resolve::{PositionMap, resolve};

/// Outcome of a click, for the host to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    PlayerSelected(ElementId),
    ElementAdded(ElementId),
}

/// Core editor state. Testable without a browser.
#[derive(Debug, Clone)]
pub struct EditorCore<I = SequentialIds> {
    store: AnnotationStore<I>,
    positions: PositionMap,
    history: EditHistory,
    session: EditorSession,
    now_ms: TimeSource,
}

impl Default for EditorCore<SequentialIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorCore<SequentialIds> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(SequentialIds::default(), system_now_ms)
    }
}

impl<I: IdSource> EditorCore<I> {
    /// Build an editor with an injected id source and snapshot clock.
    #[must_use]
    pub fn with_parts(ids: I, now_ms: TimeSource) -> Self {
        Self {
            store: AnnotationStore::with_ids(ids),
            positions: PositionMap::new(),
            history: EditHistory::new(),
            session: EditorSession::default(),
            now_ms,
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        self.store.elements()
    }

    #[must_use]
    pub fn store(&self) -> &AnnotationStore<I> {
        &self.store
    }

    #[must_use]
    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    /// Where a player stands after every recorded action.
    #[must_use]
    pub fn player_position(&self, id: ElementId) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    #[must_use]
    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    #[must_use]
    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    // --- Session lifecycle ---

    /// Start a blank drill.
    pub fn new_drill(&mut self) {
        self.store.clear();
        self.begin_session();
    }

    /// Open an existing drill's elements for editing.
    pub fn load_for_edit(&mut self, elements: Vec<Element>) {
        self.store.load(elements);
        self.begin_session();
    }

    /// Start a new drill from a copy of `elements` with fresh ids.
    pub fn load_for_replicate(&mut self, elements: &[Element]) {
        self.store.replicate(elements);
        self.begin_session();
    }

    fn begin_session(&mut self) {
        self.refresh_positions();
        self.history.clear();
        self.session.reset();
        debug!(elements = self.store.len(), "editor session started");
    }

    // --- Tools ---

    pub fn set_tool(&mut self, tool: Tool) {
        self.session.set_tool(tool);
    }

    pub fn set_shot_type(&mut self, shot_type: impl Into<String>) {
        self.session.shot_type = shot_type.into();
    }

    /// Handle a click on the court at `pt` with the active tool.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NoPlayerSelected`] when the shot or movement tool
    /// is active, no player is selected, and the click misses every player.
    pub fn click(&mut self, pt: Point) -> Result<Action, EditError> {
        let Some(tool) = self.session.tool else {
            return Ok(Action::None);
        };
        if !tool.needs_player() {
            return Ok(Action::ElementAdded(self.add_player(pt)));
        }

        let Some(player_id) = self.session.selected_player else {
            let Some(hit) = hit::player_at(pt, self.store.elements(), &self.positions) else {
                return Err(EditError::NoPlayerSelected(tool.noun()));
            };
            self.session.selected_player = Some(hit);
            debug!(player = %hit, "player selected");
            return Ok(Action::PlayerSelected(hit));
        };

        let id = if tool == Tool::Shot {
            let shot_type = self.session.shot_type.clone();
            self.add_shot(player_id, shot_type, pt)?
        } else {
            self.add_movement(player_id, pt)?
        };
        self.session.selected_player = None;
        Ok(Action::ElementAdded(id))
    }

    // --- Mutations ---

    /// Place a new player at `at`.
    pub fn add_player(&mut self, at: Point) -> ElementId {
        self.save_state(EditLabel::AddPlayer);
        let id = self.store.add_player(at);
        self.refresh_positions();
        debug!(player = %id, x = at.x, y = at.y, "player added");
        id
    }

    /// Record a shot from the player's current position to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownPlayer`] if `player_id` is not on the court.
    pub fn add_shot(
        &mut self,
        player_id: ElementId,
        shot_type: impl Into<String>,
        target: Point,
    ) -> Result<ElementId, EditError> {
        let start = self.current_position(player_id)?;
        self.save_state(EditLabel::AddShot);
        let id = self.store.add_shot(player_id, shot_type, start, target)?;
        self.refresh_positions();
        debug!(shot = %id, player = %player_id, "shot added");
        Ok(id)
    }

    /// Record a movement from the player's current position to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownPlayer`] if `player_id` is not on the court.
    pub fn add_movement(&mut self, player_id: ElementId, target: Point) -> Result<ElementId, EditError> {
        let start = self.current_position(player_id)?;
        self.save_state(EditLabel::AddMovement);
        let id = self.store.add_movement(player_id, start, target)?;
        self.refresh_positions();
        debug!(movement = %id, player = %player_id, "movement added");
        Ok(id)
    }

    /// Remove every element and reset the tool. Returns `false` (and records
    /// no history) when the court was already empty.
    pub fn clear_court(&mut self) -> bool {
        self.session.reset();
        if self.store.is_empty() {
            return false;
        }
        self.save_state(EditLabel::ClearCourt);
        self.store.clear();
        self.refresh_positions();
        debug!("court cleared");
        true
    }

    /// Mirror the drill left-to-right across the center line.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NothingToFlip`] when the court is empty.
    pub fn flip_horizontal(&mut self) -> Result<(), EditError> {
        if self.store.is_empty() {
            return Err(EditError::NothingToFlip);
        }
        self.save_state(EditLabel::FlipHorizontal);
        self.store.flip_horizontal(COURT_CENTER_X);
        self.refresh_positions();
        debug!(elements = self.store.len(), "court flipped");
        Ok(())
    }

    // --- History ---

    /// Revert the last edit. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot(EditLabel::Current);
        let Some(previous) = self.history.undo(current) else {
            return false;
        };
        debug!(label = ?previous.label, "undo");
        self.restore(previous);
        true
    }

    /// Re-apply the last undone edit. Returns `false` when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot(EditLabel::Current);
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        debug!("redo");
        self.restore(next);
        true
    }

    fn snapshot(&self, label: EditLabel) -> Snapshot {
        Snapshot {
            elements: self.store.snapshot(),
            positions: self.positions.clone(),
            label,
            timestamp_ms: (self.now_ms)(),
        }
    }

    fn save_state(&mut self, label: EditLabel) {
        let before = self.snapshot(label);
        self.history.save(before);
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.store.restore(snapshot.elements);
        self.positions = snapshot.positions;
        if let Some(id) = self.session.selected_player
            && self.store.player(id).is_none()
        {
            self.session.selected_player = None;
        }
    }

    // --- Derived views ---

    /// Compile the current annotations for preview playback.
    #[must_use]
    pub fn timeline(&self) -> Timeline {
        compile(self.store.elements())
    }

    /// Static editing overlay, highlighting the selected player.
    #[must_use]
    pub fn static_commands(&self) -> Vec<DrawCommand> {
        annotations(self.store.elements(), self.session.selected_player)
    }

    fn current_position(&self, player_id: ElementId) -> Result<Point, EditError> {
        self.positions
            .get(&player_id)
            .copied()
            .or_else(|| self.store.player(player_id).map(|p| p.position()))
            .ok_or(EditError::UnknownPlayer(player_id))
    }

    fn refresh_positions(&mut self) {
        self.positions = resolve(self.store.elements());
    }
}
