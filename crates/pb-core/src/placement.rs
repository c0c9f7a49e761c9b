//! Committed placement records

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accessory::Footprint;
use crate::board::Hole;
use crate::validation::ValidationReport;

/// A committed accessory placement.
///
/// Created on a successful commit; its `occupied_holes` are the sole source
/// of truth the occupancy tracker mutates from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Unique per commit; a reposition-commit mints a new id
    pub id: Uuid,
    /// Catalog identifier of the accessory type
    pub accessory: String,
    /// World position of the accessory origin
    pub position: Vec3,
    /// Rotation about the board normal, radians
    pub rotation: f32,
    /// Holes this placement owns
    pub occupied_holes: Vec<Hole>,
    /// Last validation result at commit time
    #[serde(skip)]
    pub validation: ValidationReport,
}

/// The view of an existing placement the collection layer hands in for
/// overlap checks
#[derive(Debug, Clone, Copy)]
pub struct PlacedAccessory {
    pub id: Uuid,
    /// Accessory origin in board-local space
    pub position: Vec3,
    pub footprint: Footprint,
}

impl From<(&Placement, Footprint)> for PlacedAccessory {
    fn from((placement, footprint): (&Placement, Footprint)) -> Self {
        Self {
            id: placement.id,
            position: placement.position,
            footprint,
        }
    }
}
