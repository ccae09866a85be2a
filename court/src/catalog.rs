//! Drill library: drills, routines and the in-memory catalog holding them.
//!
//! Records use the library's JSON shape. `courtElements` is passed through
//! as the element list; nothing here interprets it beyond replication.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::doc::{AnnotationStore, Element};
use crate::error::CatalogError;

const COPY_SUFFIX: &str = " (Copy)";

/// One drill: a named, timed court diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drill {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "duration")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub court_elements: Vec<Element>,
}

impl Drill {
    /// Whether the drill has any shot or movement to play back.
    #[must_use]
    pub fn has_animatable(&self) -> bool {
        self.court_elements.iter().any(Element::is_animatable)
    }
}

/// An ordered list of drills practiced in one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub drill_ids: Vec<i64>,
}

/// All known drills and routines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub drills: Vec<Drill>,
    #[serde(default)]
    pub routines: Vec<Routine>,
}

impl Catalog {
    #[must_use]
    pub fn drill(&self, id: i64) -> Option<&Drill> {
        self.drills.iter().find(|d| d.id == id)
    }

    #[must_use]
    pub fn routine(&self, id: i64) -> Option<&Routine> {
        self.routines.iter().find(|r| r.id == id)
    }

    /// The routine's drills in routine order. Ids with no matching drill are
    /// skipped.
    #[must_use]
    pub fn routine_drills(&self, routine: &Routine) -> Vec<&Drill> {
        routine.drill_ids.iter().filter_map(|id| self.drill(*id)).collect()
    }

    /// Sum of the routine's drill durations in minutes.
    #[must_use]
    pub fn routine_minutes(&self, routine: &Routine) -> u32 {
        self.routine_drills(routine).iter().map(|d| d.duration_minutes).sum()
    }

    /// Delete a drill and drop it from every routine.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DrillNotFound`] if no drill has `id`.
    pub fn remove_drill(&mut self, id: i64) -> Result<Drill, CatalogError> {
        let idx = self
            .drills
            .iter()
            .position(|d| d.id == id)
            .ok_or(CatalogError::DrillNotFound(id))?;
        let removed = self.drills.remove(idx);
        for routine in &mut self.routines {
            routine.drill_ids.retain(|drill_id| *drill_id != id);
        }
        info!(drill_id = id, "drill removed");
        Ok(removed)
    }

    /// Delete a routine. Its drills stay in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RoutineNotFound`] if no routine has `id`.
    pub fn remove_routine(&mut self, id: i64) -> Result<Routine, CatalogError> {
        let idx = self
            .routines
            .iter()
            .position(|r| r.id == id)
            .ok_or(CatalogError::RoutineNotFound(id))?;
        info!(routine_id = id, "routine removed");
        Ok(self.routines.remove(idx))
    }

    /// Add a copy of a drill named `"<name> (Copy)"` whose elements carry
    /// fresh ids. Returns the new drill's id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DrillNotFound`] if no drill has `id`.
    pub fn replicate_drill(&mut self, id: i64) -> Result<i64, CatalogError> {
        let source = self.drill(id).ok_or(CatalogError::DrillNotFound(id))?;
        let mut store = AnnotationStore::new();
        store.load(source.court_elements.clone());
        store.replicate(&source.court_elements);

        let copy = Drill {
            id: next_id(self.drills.iter().map(|d| d.id)),
            name: format!("{}{COPY_SUFFIX}", source.name),
            description: source.description.clone(),
            duration_minutes: source.duration_minutes,
            court_elements: store.elements().to_vec(),
        };
        let new_id = copy.id;
        self.drills.push(copy);
        info!(source_id = id, drill_id = new_id, "drill replicated");
        Ok(new_id)
    }

    /// Add a copy of a routine named `"<name> (Copy)"` with the same drills.
    /// Returns the new routine's id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RoutineNotFound`] if no routine has `id`.
    pub fn replicate_routine(&mut self, id: i64) -> Result<i64, CatalogError> {
        let source = self.routine(id).ok_or(CatalogError::RoutineNotFound(id))?;
        let copy = Routine {
            id: next_id(self.routines.iter().map(|r| r.id)),
            name: format!("{}{COPY_SUFFIX}", source.name),
            description: source.description.clone(),
            drill_ids: source.drill_ids.clone(),
        };
        let new_id = copy.id;
        self.routines.push(copy);
        info!(source_id = id, routine_id = new_id, "routine replicated");
        Ok(new_id)
    }
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().map_or(1, |max| max.saturating_add(1))
}
