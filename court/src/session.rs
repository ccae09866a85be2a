//! Practice session plan: steps through a routine's drills in order.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use tracing::info;

use crate::catalog::{Catalog, Drill, Routine};
use crate::doc::Element;
use crate::error::SessionError;

/// A running session over a snapshot of a routine's drills.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    routine: Routine,
    drills: Vec<Drill>,
    index: usize,
}

impl Session {
    /// Start a session on `routine_id`, positioned at the first drill.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoRoutineSelected`] when `routine_id` is `None`.
    /// - [`SessionError::RoutineNotFound`] when no routine has that id.
    /// - [`SessionError::NoValidDrills`] when none of its drills exist.
    pub fn start(catalog: &Catalog, routine_id: Option<i64>) -> Result<Self, SessionError> {
        let routine_id = routine_id.ok_or(SessionError::NoRoutineSelected)?;
        let routine = catalog
            .routine(routine_id)
            .ok_or(SessionError::RoutineNotFound(routine_id))?;
        let drills: Vec<Drill> = catalog.routine_drills(routine).into_iter().cloned().collect();
        if drills.is_empty() {
            return Err(SessionError::NoValidDrills);
        }
        info!(routine_id, drills = drills.len(), "session started");
        Ok(Self { routine: routine.clone(), drills, index: 0 })
    }

    #[must_use]
    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    #[must_use]
    pub fn drills(&self) -> &[Drill] {
        &self.drills
    }

    /// Zero-based position of the current drill.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drills.len()
    }

    /// Always `false`: a session cannot start without drills.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drills.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Drill> {
        self.drills.get(self.index)
    }

    /// Current drill's elements, ready for a playback surface.
    #[must_use]
    pub fn current_elements(&self) -> Arc<Vec<Element>> {
        Arc::new(self.current().map(|d| d.court_elements.clone()).unwrap_or_default())
    }

    /// Whether playback controls apply to the current drill.
    #[must_use]
    pub fn has_animatable(&self) -> bool {
        self.current().is_some_and(Drill::has_animatable)
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.drills.len()
    }

    /// Advance one drill. Returns `false` at the last drill.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Go back one drill. Returns `false` at the first drill.
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }
}
