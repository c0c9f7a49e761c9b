//! Rigid transform for an accepted hole group
//!
//! Once the matcher has accepted a group, the accessory origin is fully
//! determined: rotate peg 0's local offset, subtract it from hole 0, and
//! drop the accessory to its flush depth. Consistency of the remaining pegs
//! was already established by the matcher and is not re-derived.

use glam::{Quat, Vec3};

use pb_core::{Hole, PegConfiguration, PegboardMetadata};

/// Accessory origin position such that peg 0 lands exactly on hole 0.
///
/// Returns `None` for an empty configuration or hole group.
pub fn compute_origin_position(
    config: &PegConfiguration,
    hole_group: &[Hole],
    board_normal: Vec3,
    rotation: f32,
) -> Option<Vec3> {
    let peg0 = config.pegs.first()?;
    let hole0 = hole_group.first()?;
    let rotated = Quat::from_axis_angle(board_normal, rotation) * peg0.local_position;
    Some(hole0.position - rotated)
}

/// Z coordinate at which the accessory sits flush against the board face
pub fn compute_flush_z(config: &PegConfiguration, board: &PegboardMetadata) -> f32 {
    board.front_face_z() + config.mounting.flush_offset - config.mounting.surface_offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pb_core::{BoardDimensions, HoleSpec, MountingSpec, Peg};
    use std::f32::consts::FRAC_PI_2;

    fn board(depth: f32) -> PegboardMetadata {
        PegboardMetadata::new(
            BoardDimensions {
                width: 0.3,
                height: 0.2,
                depth,
            },
            Vec::new(),
            HoleSpec {
                diameter: 0.0064,
                depth: depth / 2.0,
            },
            Vec3::Z,
        )
    }

    #[test]
    fn test_origin_puts_peg_zero_on_hole_zero() {
        let config = PegConfiguration::new(vec![Peg::new(
            Vec3::new(0.0, 0.0254, 0.0),
            0.006,
            0.008,
        )]);
        let group = vec![Hole::new(Vec3::new(0.0508, 0.0254, 0.0))];

        let origin = compute_origin_position(&config, &group, Vec3::Z, 0.0).unwrap();
        // origin + peg0.local must land on the hole
        let seated = origin + config.pegs[0].local_position;
        assert_abs_diff_eq!(seated.x, group[0].position.x, epsilon = 1e-6);
        assert_abs_diff_eq!(seated.y, group[0].position.y, epsilon = 1e-6);
    }

    #[test]
    fn test_origin_accounts_for_rotation() {
        let config = PegConfiguration::new(vec![Peg::new(
            Vec3::new(0.0254, 0.0, 0.0),
            0.006,
            0.008,
        )]);
        let group = vec![Hole::new(Vec3::new(0.0, 0.0254, 0.0))];

        // Quarter turn maps the peg offset (+x) onto +y, so the origin must
        // sit at the board origin for the peg to land on the hole.
        let origin = compute_origin_position(&config, &group, Vec3::Z, FRAC_PI_2).unwrap();
        assert_abs_diff_eq!(origin.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(origin.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_inputs_yield_no_origin() {
        let config = PegConfiguration::new(Vec::new());
        assert!(compute_origin_position(&config, &[], Vec3::Z, 0.0).is_none());
    }

    #[test]
    fn test_flush_z_combines_offsets() {
        let config = PegConfiguration::new(vec![Peg::new(Vec3::ZERO, 0.006, 0.008)])
            .with_mounting(MountingSpec {
                surface_offset: 0.001,
                flush_offset: 0.002,
                ..Default::default()
            });
        let z = compute_flush_z(&config, &board(0.018));
        assert_abs_diff_eq!(z, 0.009 + 0.002 - 0.001, epsilon = 1e-7);
    }
}
