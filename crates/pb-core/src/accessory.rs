//! Accessory attachment patterns: pegs, mounting specification, footprints

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single attachment peg on an accessory
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Peg {
    pub id: Uuid,
    /// Position relative to the accessory origin (meters)
    pub local_position: Vec3,
    /// Peg shaft diameter (meters)
    pub diameter: f32,
    /// Peg shaft length (meters)
    pub length: f32,
    /// Direction the peg is inserted along (unit vector)
    pub insertion_direction: Vec3,
}

impl Peg {
    /// Create a peg inserted along -Z (into a front-facing board)
    pub fn new(local_position: Vec3, diameter: f32, length: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            local_position,
            diameter,
            length,
            insertion_direction: Vec3::NEG_Z,
        }
    }

    /// Override the insertion direction (normalized)
    pub fn with_insertion_direction(mut self, direction: Vec3) -> Self {
        self.insertion_direction = direction.normalize();
        self
    }
}

/// Which board face the accessory mounts against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MountSurface {
    #[default]
    Front,
    Back,
}

impl MountSurface {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MountSurface::Front => "Front",
            MountSurface::Back => "Back",
        }
    }
}

/// How an accessory sits against the board once its pegs are seated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MountingSpec {
    pub surface: MountSurface,
    /// Distance from the accessory origin to its mounting surface (meters)
    pub surface_offset: f32,
    /// Additional offset applied when flush against the board (meters)
    pub flush_offset: f32,
    /// When false, the accessory may hang from its anchor peg alone if the
    /// full pattern cannot be matched
    pub requires_all_pegs: bool,
    /// Rotations about the board normal that may be tried, in radians.
    /// Only angles listed here are ever attempted.
    pub allowable_rotations: Vec<f32>,
}

impl Default for MountingSpec {
    fn default() -> Self {
        Self {
            surface: MountSurface::Front,
            surface_offset: 0.0,
            flush_offset: 0.0,
            requires_all_pegs: true,
            allowable_rotations: Vec::new(),
        }
    }
}

/// Immutable attachment pattern for one accessory type.
///
/// Loaded once from the catalog and reused for every placement attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PegConfiguration {
    /// Ordered pegs; peg 0 is the anchor the pattern search pivots on
    pub pegs: Vec<Peg>,
    pub mounting: MountingSpec,
}

impl PegConfiguration {
    /// Create a configuration with default mounting
    pub fn new(pegs: Vec<Peg>) -> Self {
        Self {
            pegs,
            mounting: MountingSpec::default(),
        }
    }

    /// Replace the mounting specification
    pub fn with_mounting(mut self, mounting: MountingSpec) -> Self {
        self.mounting = mounting;
        self
    }

    /// Number of pegs in the pattern
    pub fn peg_count(&self) -> usize {
        self.pegs.len()
    }

    /// Legacy accessories carry no peg data and snap to a single hole
    pub fn is_legacy(&self) -> bool {
        self.pegs.is_empty()
    }

    /// Peg local positions rotated about `axis` by `angle` radians
    pub fn rotated_peg_positions(&self, axis: Vec3, angle: f32) -> Vec<Vec3> {
        let rotation = glam::Quat::from_axis_angle(axis, angle);
        self.pegs.iter().map(|p| rotation * p.local_position).collect()
    }
}

/// Axis-aligned extents of an accessory in the board plane.
///
/// Used only for bounds and overlap checks, never for peg matching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f32,
    pub height: f32,
}

impl Footprint {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Half-extents in the board plane
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default_insertion_points_into_board() {
        let peg = Peg::new(Vec3::ZERO, 0.006, 0.008);
        assert_eq!(peg.insertion_direction, Vec3::NEG_Z);
    }

    #[test]
    fn test_rotated_peg_positions_quarter_turn() {
        let config = PegConfiguration::new(vec![
            Peg::new(Vec3::new(0.0, 0.0254, 0.0), 0.006, 0.008),
            Peg::new(Vec3::new(0.0, -0.0254, 0.0), 0.006, 0.008),
        ]);
        let rotated = config.rotated_peg_positions(Vec3::Z, FRAC_PI_2);
        // A +90 degree turn about Z maps +Y onto -X
        assert_abs_diff_eq!(rotated[0].x, -0.0254, epsilon = 1e-6);
        assert_abs_diff_eq!(rotated[0].y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rotated[1].x, 0.0254, epsilon = 1e-6);
    }

    #[test]
    fn test_peg_configuration_serde_round_trip() {
        let config = PegConfiguration::new(vec![Peg::new(
            Vec3::new(0.0, 0.0254, 0.0),
            0.006,
            0.008,
        )])
        .with_mounting(MountingSpec {
            surface_offset: 0.001,
            allowable_rotations: vec![0.0, FRAC_PI_2],
            ..Default::default()
        });

        let json = serde_json::to_string(&config).unwrap();
        let back: PegConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(back.peg_count(), 1);
        assert_eq!(back.pegs[0].id, config.pegs[0].id);
        assert_eq!(back.mounting.allowable_rotations.len(), 2);
    }
}
