//! Per-peg geometric fit validation

use pb_core::constants::ALIGNMENT_TOLERANCE;
use pb_core::{
    Hole, Peg, PegFitIssue, PegFitStatus, PegboardMetadata, ValidationError, ValidationReport,
};

/// Validate a peg pattern against a candidate hole group.
///
/// Checks run per peg: shaft diameter against the hole diameter, shaft
/// length against the hole depth, and insertion direction against the
/// board's outward front normal (the peg must insert anti-parallel to it,
/// within tolerance). Overall validity is the conjunction of all checks.
pub fn validate(pegs: &[Peg], hole_group: &[Hole], board: &PegboardMetadata) -> ValidationReport {
    if pegs.is_empty() {
        return ValidationReport::failed(vec![ValidationError::NoPegConfig], Vec::new());
    }
    if pegs.len() != hole_group.len() {
        return ValidationReport::failed(
            vec![ValidationError::CountMismatch {
                expected: pegs.len(),
                actual: hole_group.len(),
            }],
            Vec::new(),
        );
    }

    let spec = board.hole_spec;
    let mut errors = Vec::new();
    let mut per_peg = Vec::with_capacity(pegs.len());

    for (index, peg) in pegs.iter().enumerate() {
        let mut issues = Vec::new();

        if peg.diameter > spec.diameter {
            issues.push(PegFitIssue::TooLarge {
                diameter: peg.diameter,
                hole_diameter: spec.diameter,
            });
            errors.push(ValidationError::PegTooLarge { peg: index });
        }
        if peg.length > spec.depth {
            issues.push(PegFitIssue::TooLong {
                length: peg.length,
                hole_depth: spec.depth,
            });
            errors.push(ValidationError::PegTooLong { peg: index });
        }

        let alignment = peg.insertion_direction.dot(board.front_face_normal);
        if (alignment + 1.0).abs() > ALIGNMENT_TOLERANCE {
            issues.push(PegFitIssue::Misaligned { alignment });
            errors.push(ValidationError::PegMisaligned { peg: index });
        }

        per_peg.push(PegFitStatus {
            peg_id: peg.id,
            index,
            issues,
        });
    }

    if errors.is_empty() {
        ValidationReport::passed(per_peg)
    } else {
        ValidationReport::failed(errors, per_peg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use pb_core::{BoardDimensions, HoleSpec, Peg};

    fn board() -> PegboardMetadata {
        PegboardMetadata::new(
            BoardDimensions {
                width: 0.3,
                height: 0.2,
                depth: 0.018,
            },
            vec![Hole::new(Vec3::ZERO)],
            HoleSpec {
                diameter: 0.0064,
                depth: 0.01,
            },
            Vec3::Z,
        )
    }

    fn group(n: usize) -> Vec<Hole> {
        (0..n)
            .map(|i| Hole::new(Vec3::new(0.0, i as f32 * 0.0254, 0.0)))
            .collect()
    }

    #[test]
    fn test_empty_pattern_is_rejected() {
        let report = validate(&[], &group(1), &board());
        assert!(!report.valid);
        assert_eq!(report.errors, vec![ValidationError::NoPegConfig]);
    }

    #[test]
    fn test_count_mismatch_stops_validation() {
        let pegs = vec![Peg::new(Vec3::ZERO, 0.006, 0.008)];
        let report = validate(&pegs, &group(2), &board());
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![ValidationError::CountMismatch {
                expected: 1,
                actual: 2
            }]
        );
        assert!(report.per_peg.is_empty());
    }

    #[test]
    fn test_fitting_peg_passes() {
        let pegs = vec![Peg::new(Vec3::ZERO, 0.006, 0.008)];
        let report = validate(&pegs, &group(1), &board());
        assert!(report.valid, "report should pass: {:?}", report);
        assert!(report.per_peg[0].fits());
    }

    #[test]
    fn test_oversized_peg_flagged_too_large() {
        // Any positive epsilon over the hole diameter fails the peg
        let pegs = vec![Peg::new(Vec3::ZERO, 0.008, 0.008)];
        let report = validate(&pegs, &group(1), &board());
        assert!(!report.valid);
        assert_eq!(report.errors, vec![ValidationError::PegTooLarge { peg: 0 }]);
        assert!(matches!(
            report.per_peg[0].issues[0],
            PegFitIssue::TooLarge { .. }
        ));
    }

    #[test]
    fn test_diameter_at_limit_is_not_flagged() {
        let pegs = vec![Peg::new(Vec3::ZERO, 0.0064, 0.008)];
        let report = validate(&pegs, &group(1), &board());
        assert!(report.valid);
    }

    #[test]
    fn test_long_peg_flagged_too_long() {
        let pegs = vec![Peg::new(Vec3::ZERO, 0.006, 0.012)];
        let report = validate(&pegs, &group(1), &board());
        assert_eq!(report.errors, vec![ValidationError::PegTooLong { peg: 0 }]);
    }

    #[test]
    fn test_reversed_insertion_flagged_misaligned() {
        let pegs =
            vec![Peg::new(Vec3::ZERO, 0.006, 0.008).with_insertion_direction(Vec3::Z)];
        let report = validate(&pegs, &group(1), &board());
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec![ValidationError::PegMisaligned { peg: 0 }]
        );
    }

    #[test]
    fn test_slightly_tilted_insertion_is_tolerated() {
        // ~14 degrees off anti-parallel stays inside the alignment cone
        let tilted = Vec3::new(0.25, 0.0, -1.0).normalize();
        let pegs = vec![Peg::new(Vec3::ZERO, 0.006, 0.008).with_insertion_direction(tilted)];
        let report = validate(&pegs, &group(1), &board());
        assert!(report.valid, "tilt within tolerance: {:?}", report);
    }

    #[test]
    fn test_one_bad_peg_fails_the_group() {
        let pegs = vec![
            Peg::new(Vec3::ZERO, 0.006, 0.008),
            Peg::new(Vec3::new(0.0, 0.0254, 0.0), 0.008, 0.008),
        ];
        let report = validate(&pegs, &group(2), &board());
        assert!(!report.valid);
        assert!(report.per_peg[0].fits());
        assert!(!report.per_peg[1].fits());
    }
}
