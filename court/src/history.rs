//! Edit History: bounded undo/redo over annotation snapshots.
//!
//! A snapshot pairs the element list with the position map derived from it.
//! Element lists are shared `Arc`s taken from the store, so a snapshot costs a
//! reference count until the store next mutates (clone-on-write there), and no
//! two stack entries can observe each other's changes.
//!
//! The history never reads the store itself. Callers capture the state they
//! are about to change and hand it in, which keeps "snapshot, then mutate" a
//! single step at the call site.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::consts::HISTORY_LIMIT;
use crate::doc::Element;
use crate::resolve::PositionMap;

/// Source of snapshot timestamps in epoch milliseconds.
pub type TimeSource = fn() -> i64;

/// Wall-clock epoch milliseconds; 0 if the clock is before the epoch.
#[must_use]
pub fn system_now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

/// What edit a snapshot precedes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditLabel {
    AddPlayer,
    AddShot,
    AddMovement,
    ClearCourt,
    FlipHorizontal,
    /// State captured while moving between the undo and redo stacks.
    Current,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub elements: Arc<Vec<Element>>,
    pub positions: PositionMap,
    pub label: EditLabel,
    pub timestamp_ms: i64,
}

/// Undo and redo stacks. The undo stack holds at most `limit` entries and
/// evicts oldest first.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    limit: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self { undo: VecDeque::new(), redo: Vec::new(), limit: limit.max(1) }
    }

    /// Record the state just before an edit. Any redo entries are dropped.
    pub fn save(&mut self, before: Snapshot) {
        self.redo.clear();
        self.push_undo(before);
    }

    /// Step back. `current` is the live state, kept for redo.
    ///
    /// Returns the state to restore, or `None` (and discards `current`) when
    /// there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forward again. Mirror of [`EditHistory::undo`].
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.push_undo(current);
        Some(next)
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Label of the edit the next undo would revert.
    #[must_use]
    pub fn next_undo_label(&self) -> Option<EditLabel> {
        self.undo.back().map(|s| s.label)
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo.push_back(snapshot);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
    }
}
