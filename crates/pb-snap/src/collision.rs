//! Board-edge containment and inter-accessory overlap checks
//!
//! All checks work on axis-aligned boxes in the board's local (x, y) plane.
//! Peg matching never consults footprints; these checks only gate the final
//! placement.

use glam::{Vec2, Vec3};
use uuid::Uuid;

use pb_core::{Footprint, Hole, PegboardMetadata, PlacedAccessory};

/// 2D axis-aligned box in the board plane
#[derive(Debug, Clone, Copy)]
struct Aabb2 {
    min: Vec2,
    max: Vec2,
}

impl Aabb2 {
    fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Grow the box by `margin` on every side
    fn expand(self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// Boxes intersect only when they overlap on both axes simultaneously
    fn intersects(&self, other: &Aabb2) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

fn footprint_box(position: Vec3, footprint: &Footprint) -> Aabb2 {
    Aabb2::from_center_half_extents(position.truncate(), footprint.half_extents())
}

/// True if the footprint around `position` lies entirely within the board's
/// `[-w/2, w/2] x [-h/2, h/2]` extent
pub fn within_board_bounds(
    position: Vec3,
    footprint: &Footprint,
    board: &PegboardMetadata,
) -> bool {
    let bbox = footprint_box(position, footprint);
    let half_w = board.dimensions.width / 2.0;
    let half_h = board.dimensions.height / 2.0;
    bbox.min.x >= -half_w && bbox.max.x <= half_w && bbox.min.y >= -half_h && bbox.max.y <= half_h
}

/// True if the resolved position coincides with an actual hole, in the
/// board plane. Guards legacy placements that carry no peg pattern.
pub fn is_on_known_hole(position: Vec3, holes: &[Hole], tolerance: f32) -> bool {
    holes
        .iter()
        .any(|h| h.position.truncate().distance(position.truncate()) <= tolerance)
}

/// First placed accessory whose margin-expanded footprint intersects the
/// margin-expanded candidate footprint, skipping `exclude` (the placement
/// being repositioned). Short-circuits on the first hit.
pub fn find_overlap(
    position: Vec3,
    footprint: &Footprint,
    placed: &[PlacedAccessory],
    margin: f32,
    exclude: Option<Uuid>,
) -> Option<Uuid> {
    let candidate = footprint_box(position, footprint).expand(margin);
    placed
        .iter()
        .filter(|p| Some(p.id) != exclude)
        .find(|p| {
            candidate.intersects(&footprint_box(p.position, &p.footprint).expand(margin))
        })
        .map(|p| p.id)
}

/// True if the candidate overlaps any placed accessory
pub fn overlaps(
    position: Vec3,
    footprint: &Footprint,
    placed: &[PlacedAccessory],
    margin: f32,
    exclude: Option<Uuid>,
) -> bool {
    find_overlap(position, footprint, placed, margin, exclude).is_some()
}
