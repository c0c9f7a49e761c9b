//! Hole occupancy tracking
//!
//! Maps quantized hole keys to the placement that owns them. A key is never
//! present with more than one owner; a group is reserved or released as a
//! whole, never partially.

use std::collections::HashMap;

use uuid::Uuid;

use crate::board::{Hole, HoleKey};
use crate::error::SnapError;

/// Tracks which placement owns each hole on the current board.
///
/// Keyed to one board at a time; switching boards clears it.
#[derive(Debug, Clone, Default)]
pub struct OccupancyTracker {
    owners: HashMap<HoleKey, Uuid>,
}

impl OccupancyTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied holes
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// True if no hole is occupied
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Owner of a single hole, if any
    pub fn owner(&self, hole: &Hole) -> Option<Uuid> {
        self.owners.get(&hole.key()).copied()
    }

    /// True if any hole in the group is occupied
    pub fn is_occupied(&self, holes: &[Hole]) -> bool {
        holes.iter().any(|h| self.owners.contains_key(&h.key()))
    }

    /// True if any hole in the group is occupied by a placement other than
    /// `exclude` (used while repositioning that placement)
    pub fn is_occupied_excluding(&self, holes: &[Hole], exclude: Option<Uuid>) -> bool {
        holes.iter().any(|h| match self.owners.get(&h.key()) {
            Some(owner) => Some(*owner) != exclude,
            None => false,
        })
    }

    /// First occupying placement found in the group, if any
    pub fn occupant_of(&self, holes: &[Hole]) -> Option<Uuid> {
        holes.iter().find_map(|h| self.owners.get(&h.key()).copied())
    }

    /// First occupant in the group other than `exclude`, if any
    pub fn occupant_of_excluding(&self, holes: &[Hole], exclude: Option<Uuid>) -> Option<Uuid> {
        holes
            .iter()
            .filter_map(|h| self.owners.get(&h.key()).copied())
            .find(|owner| Some(*owner) != exclude)
    }

    /// Reserve every hole in the group for `placement_id`.
    ///
    /// Guarded: if any hole is already owned by another placement, nothing
    /// is written and the conflict is returned. All-or-nothing.
    pub fn reserve(&mut self, holes: &[Hole], placement_id: Uuid) -> Result<(), SnapError> {
        if let Some(occupant) = self.occupant_of_excluding(holes, Some(placement_id)) {
            return Err(SnapError::OccupancyConflict { occupant });
        }
        for hole in holes {
            self.owners.insert(hole.key(), placement_id);
        }
        tracing::debug!(
            placement = %placement_id,
            holes = holes.len(),
            "reserved hole group"
        );
        Ok(())
    }

    /// Release every hole in the group. Releasing unowned holes is a no-op.
    pub fn release(&mut self, holes: &[Hole]) {
        for hole in holes {
            self.owners.remove(&hole.key());
        }
        tracing::debug!(holes = holes.len(), "released hole group");
    }

    /// Drop all reservations (board switch or full reset)
    pub fn clear(&mut self) {
        self.owners.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn group(points: &[[f32; 3]]) -> Vec<Hole> {
        points.iter().map(|p| Hole::new(Vec3::from(*p))).collect()
    }

    #[test]
    fn test_reserve_release_round_trip() {
        let mut tracker = OccupancyTracker::new();
        let holes = group(&[[0.0, 0.0, 0.0], [0.0, 0.0254, 0.0]]);
        let id = Uuid::new_v4();

        tracker.reserve(&holes, id).unwrap();
        assert!(tracker.is_occupied(&holes));
        assert_eq!(tracker.occupant_of(&holes), Some(id));

        tracker.release(&holes);
        assert!(tracker.is_empty(), "release should restore prior state");
        assert!(!tracker.is_occupied(&holes));
    }

    #[test]
    fn test_shared_hole_counts_as_occupied() {
        let mut tracker = OccupancyTracker::new();
        let first = group(&[[0.0, 0.0, 0.0], [0.0, 0.0254, 0.0]]);
        tracker.reserve(&first, Uuid::new_v4()).unwrap();

        let overlapping = group(&[[0.0, 0.0254, 0.0], [0.0, 0.0508, 0.0]]);
        let disjoint = group(&[[0.0508, 0.0, 0.0], [0.0508, 0.0254, 0.0]]);
        assert!(tracker.is_occupied(&overlapping));
        assert!(!tracker.is_occupied(&disjoint));
    }

    #[test]
    fn test_guarded_reserve_leaves_map_untouched() {
        let mut tracker = OccupancyTracker::new();
        let first = group(&[[0.0, 0.0, 0.0]]);
        let owner = Uuid::new_v4();
        tracker.reserve(&first, owner).unwrap();

        let conflicting = group(&[[0.0, 0.0, 0.0], [0.0, 0.0254, 0.0]]);
        let err = tracker.reserve(&conflicting, Uuid::new_v4()).unwrap_err();
        assert_eq!(err, SnapError::OccupancyConflict { occupant: owner });
        assert_eq!(tracker.len(), 1, "conflicting reserve must not write");
        assert!(!tracker.is_occupied(&group(&[[0.0, 0.0254, 0.0]])));
    }

    #[test]
    fn test_excluding_own_placement_during_reposition() {
        let mut tracker = OccupancyTracker::new();
        let holes = group(&[[0.0, 0.0, 0.0]]);
        let own = Uuid::new_v4();
        tracker.reserve(&holes, own).unwrap();

        assert!(tracker.is_occupied(&holes));
        assert!(!tracker.is_occupied_excluding(&holes, Some(own)));
        assert!(tracker.is_occupied_excluding(&holes, Some(Uuid::new_v4())));
    }

    #[test]
    fn test_reserve_same_owner_is_not_a_conflict() {
        let mut tracker = OccupancyTracker::new();
        let holes = group(&[[0.0, 0.0, 0.0]]);
        let id = Uuid::new_v4();
        tracker.reserve(&holes, id).unwrap();
        tracker.reserve(&holes, id).unwrap();
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_clear_empties_tracker() {
        let mut tracker = OccupancyTracker::new();
        tracker
            .reserve(&group(&[[0.0, 0.0, 0.0]]), Uuid::new_v4())
            .unwrap();
        tracker.clear();
        assert!(tracker.is_empty());
    }
}
