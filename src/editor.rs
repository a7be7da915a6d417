//! Farm boundary editor
//!
//! Holds the vertex ring a user traces on the map, the completion lock and
//! the save flag. Every operation is a guarded transition: invalid calls
//! (adding while locked, undo on an empty ring, completing with fewer than
//! three vertices, saving an unlocked or unnamed region) are silent no-ops,
//! so the editor behaves the same whether or not the UI disables the
//! matching control.

use crate::domain::GeoPoint;
use crate::geometry::{area::MIN_RING_VERTICES, ring_area_sq_meters};

/// Coarse lifecycle state derived from the lock and save flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// Vertices may be added
    Editing,
    /// Ring completed, no more vertices accepted
    Locked,
    /// Locked and saved under a name
    Saved,
}

#[derive(Debug, Clone, Default)]
pub struct RegionEditor {
    vertices: Vec<GeoPoint>,
    locked: bool,
    saved: bool,
    name: String,
    current_location: Option<GeoPoint>,
}

impl RegionEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_location(&self) -> Option<GeoPoint> {
        self.current_location
    }

    pub fn state(&self) -> EditorState {
        match (self.locked, self.saved) {
            (false, _) => EditorState::Editing,
            (true, false) => EditorState::Locked,
            (true, true) => EditorState::Saved,
        }
    }

    /// Append a vertex. Ignored while locked.
    pub fn add_point(&mut self, point: GeoPoint) {
        if self.locked {
            log::debug!("Ignoring point {} while selection is locked", point);
            return;
        }

        self.vertices.push(point);
        self.saved = false;
    }

    /// Drop the last vertex and return to editing. No-op on an empty ring.
    pub fn undo(&mut self) {
        if self.vertices.pop().is_none() {
            log::debug!("Nothing to undo");
            return;
        }

        self.locked = false;
        self.saved = false;
    }

    /// Remove every vertex and return to editing
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.locked = false;
        self.saved = false;
    }

    pub fn can_complete(&self) -> bool {
        self.vertices.len() >= MIN_RING_VERTICES
    }

    /// Lock the ring once it has at least three vertices
    pub fn complete(&mut self) {
        if !self.can_complete() {
            log::debug!(
                "Cannot complete selection with {} vertices",
                self.vertices.len()
            );
            return;
        }

        self.locked = true;
    }

    /// Replace the region name. The text is kept as typed.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.saved = false;
    }

    pub fn can_save(&self) -> bool {
        self.locked && !self.name.trim().is_empty()
    }

    /// Name the region and mark it saved.
    ///
    /// Requires a locked ring and a name that is not blank after trimming;
    /// otherwise nothing changes. There is no persistence target: saving
    /// only flips the local flag.
    pub fn save(&mut self, name: &str) {
        if !self.locked || name.trim().is_empty() {
            log::debug!("Save ignored (locked: {}, name: {:?})", self.locked, name);
            return;
        }

        self.name = name.to_string();
        self.saved = true;
    }

    /// Record the device's last known position. Never touches the ring.
    pub fn set_current_location(&mut self, point: GeoPoint) {
        self.current_location = Some(point);
    }

    /// Area of the finalized ring in square meters.
    ///
    /// Zero until the ring is locked, and for rings with fewer than three
    /// vertices.
    pub fn compute_area(&self) -> f64 {
        if !self.locked || self.vertices.len() < MIN_RING_VERTICES {
            return 0.0;
        }

        ring_area_sq_meters(&self.vertices)
    }
}
