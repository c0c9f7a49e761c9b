//! Peg-pattern to hole-group matching
//!
//! Finds ordered groups of holes compatible with an accessory's peg pattern
//! near a target point, by rigid translation of the pattern and optionally
//! over a listed set of rotations about the board normal.

use std::collections::HashSet;

use glam::Vec3;

use pb_core::{Hole, HoleKey, PegConfiguration};

/// An ordered hole group; entry `i` corresponds to peg `i`
pub type HoleGroup = Vec<Hole>;

/// Nearest hole to a point by Euclidean distance
pub fn find_closest_hole(point: Vec3, holes: &[Hole]) -> Option<Hole> {
    holes
        .iter()
        .copied()
        .min_by(|a, b| a.distance_to(point).total_cmp(&b.distance_to(point)))
}

/// Find all hole groups compatible with the unrotated peg pattern.
///
/// Groups are sorted by total squared deviation (each matched hole against
/// its expected position, plus the anchor distance of hole 0), so the head
/// of the list is the geometrically best candidate. Symmetric grids can
/// yield many candidates.
pub fn find_compatible_hole_groups(
    config: &PegConfiguration,
    holes: &[Hole],
    anchor: Vec3,
    tolerance: f32,
) -> Vec<HoleGroup> {
    let locals: Vec<Vec3> = config.pegs.iter().map(|p| p.local_position).collect();
    match_pattern(&locals, holes, anchor, tolerance)
}

/// Find hole groups for the peg pattern rotated about `axis` by `angle`
pub fn find_rotated_hole_groups(
    config: &PegConfiguration,
    holes: &[Hole],
    anchor: Vec3,
    tolerance: f32,
    axis: Vec3,
    angle: f32,
) -> Vec<HoleGroup> {
    let locals = config.rotated_peg_positions(axis, angle);
    match_pattern(&locals, holes, anchor, tolerance)
}

/// Return the subset of the accessory's allowable rotations that yield at
/// least one valid group near the anchor. Only listed angles are tried;
/// free rotation search is never attempted.
pub fn test_rotations(
    config: &PegConfiguration,
    holes: &[Hole],
    anchor: Vec3,
    tolerance: f32,
    axis: Vec3,
) -> Vec<f32> {
    config
        .mounting
        .allowable_rotations
        .iter()
        .copied()
        .filter(|&angle| {
            !find_rotated_hole_groups(config, holes, anchor, tolerance, axis, angle).is_empty()
        })
        .collect()
}

/// Core search over peg local positions (already rotated if needed)
fn match_pattern(locals: &[Vec3], holes: &[Hole], anchor: Vec3, tolerance: f32) -> Vec<HoleGroup> {
    match locals.len() {
        0 => Vec::new(),
        1 => match_single(holes, anchor, tolerance),
        _ => match_multi(locals, holes, anchor, tolerance),
    }
}

/// Single-peg case: the nearest hole to the anchor, iff within tolerance
fn match_single(holes: &[Hole], anchor: Vec3, tolerance: f32) -> Vec<HoleGroup> {
    match find_closest_hole(anchor, holes) {
        Some(hole) if hole.distance_to(anchor) <= tolerance => vec![vec![hole]],
        _ => Vec::new(),
    }
}

/// Multi-peg case: every hole is a candidate anchor for peg 0; each
/// subsequent peg must find a distinct hole within tolerance of its
/// rigid-translated expected position.
fn match_multi(locals: &[Vec3], holes: &[Hole], anchor: Vec3, tolerance: f32) -> Vec<HoleGroup> {
    let mut scored: Vec<(f32, HoleGroup)> = Vec::new();

    'candidates: for h0 in holes {
        let mut group: HoleGroup = vec![*h0];
        let mut used: HashSet<HoleKey> = HashSet::from([h0.key()]);
        let mut score = h0.position.distance_squared(anchor);

        for local in &locals[1..] {
            let expected = h0.position + (*local - locals[0]);
            let Some(hole) = find_closest_hole(expected, holes) else {
                continue 'candidates;
            };
            let deviation = hole.distance_to(expected);
            if deviation > tolerance || !used.insert(hole.key()) {
                continue 'candidates;
            }
            score += deviation * deviation;
            group.push(hole);
        }

        scored.push((score, group));
    }

    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored.into_iter().map(|(_, group)| group).collect()
}
