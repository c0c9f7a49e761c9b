//! Pegboard geometry: holes, quantized hole identity, and board metadata

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::HOLE_KEY_PRECISION;

/// Quantized hole identity key.
///
/// Coordinates are fixed-point at 1e-4 m so that two floats describing the
/// same physical hole always hash to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HoleKey(pub i32, pub i32, pub i32);

impl HoleKey {
    /// Quantize a board-local point to its key
    pub fn from_point(point: Vec3) -> Self {
        Self(
            (point.x * HOLE_KEY_PRECISION).round() as i32,
            (point.y * HOLE_KEY_PRECISION).round() as i32,
            (point.z * HOLE_KEY_PRECISION).round() as i32,
        )
    }
}

/// A hole in board-local space.
///
/// Equality is key equality, not raw float equality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hole {
    /// Position in board-local space (meters)
    pub position: Vec3,
}

impl Hole {
    /// Create a hole at the given board-local position
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Quantized identity key for this hole
    pub fn key(&self) -> HoleKey {
        HoleKey::from_point(self.position)
    }

    /// Euclidean distance from this hole to a point
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }
}

impl PartialEq for Hole {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Hole {}

/// Physical specification shared by every hole on a board
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HoleSpec {
    /// Hole diameter (meters)
    pub diameter: f32,
    /// Hole depth (meters)
    pub depth: f32,
}

/// Outer dimensions of a board
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoardDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

/// Immutable per-board geometry.
///
/// Created when a board is selected and discarded when a different board is
/// selected; the occupancy map is keyed to exactly one of these at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PegboardMetadata {
    pub dimensions: BoardDimensions,
    /// All holes in board-local space
    pub holes: Vec<Hole>,
    /// Specification shared by every hole
    pub hole_spec: HoleSpec,
    /// Outward normal of the front face (unit vector)
    pub front_face_normal: Vec3,
}

impl PegboardMetadata {
    /// Create board metadata from already-structured catalog data
    pub fn new(
        dimensions: BoardDimensions,
        holes: Vec<Hole>,
        hole_spec: HoleSpec,
        front_face_normal: Vec3,
    ) -> Self {
        Self {
            dimensions,
            holes,
            hole_spec,
            front_face_normal: front_face_normal.normalize(),
        }
    }

    /// Create a board with a regular hole grid centered on the origin.
    ///
    /// Holes sit on the z = 0 plane at `spacing` intervals, leaving half a
    /// spacing of blank border on each edge.
    pub fn grid(dimensions: BoardDimensions, spacing: f32, hole_spec: HoleSpec) -> Self {
        let nx = (dimensions.width / spacing).floor() as i32 - 1;
        let ny = (dimensions.height / spacing).floor() as i32 - 1;
        let mut holes = Vec::new();
        for ix in 0..nx.max(0) {
            for iy in 0..ny.max(0) {
                let x = (ix as f32 - (nx - 1) as f32 / 2.0) * spacing;
                let y = (iy as f32 - (ny - 1) as f32 / 2.0) * spacing;
                holes.push(Hole::new(Vec3::new(x, y, 0.0)));
            }
        }
        Self::new(dimensions, holes, hole_spec, Vec3::Z)
    }

    /// Z coordinate of the front face in board-local space
    pub fn front_face_z(&self) -> f32 {
        self.dimensions.depth / 2.0
    }
}
