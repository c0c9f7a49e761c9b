//! Placement session state machine
//!
//! Orchestrates matching, validation, occupancy reads, bounds/overlap checks
//! and the flush transform into a per-pointer-move preview, and owns the
//! commit/cancel transitions. The occupancy tracker is written only at
//! commit, never speculatively during preview, so an aborted preview can
//! never leak a reservation.

use glam::Vec3;
use uuid::Uuid;

use pb_core::constants::{DEFAULT_CLEARANCE_MARGIN, DEFAULT_SNAP_TOLERANCE, KNOWN_HOLE_TOLERANCE};
use pb_core::{
    Footprint, Hole, OccupancyTracker, PegConfiguration, PegboardMetadata, PlacedAccessory,
    Placement, SnapError, ValidationReport,
};

use crate::collision;
use crate::flush;
use crate::matcher::{self, HoleGroup};
use crate::validator;

/// Tunable parameters for a placement session
#[derive(Debug, Clone, Copy)]
pub struct SnapParams {
    /// Maximum distance between an expected and an actual hole position (meters)
    pub tolerance: f32,
    /// Clearance margin around footprints for overlap checks (meters)
    pub margin: f32,
}

impl Default for SnapParams {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_SNAP_TOLERANCE,
            margin: DEFAULT_CLEARANCE_MARGIN,
        }
    }
}

/// Outcome of one pointer-move evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum SnapResult {
    /// The accessory can be placed here
    Valid {
        /// Accessory origin, flush against the board face
        position: Vec3,
        /// Rotation about the board normal, radians
        rotation: f32,
        /// Holes the placement will own
        occupied_holes: Vec<Hole>,
        report: ValidationReport,
    },
    /// The accessory cannot be placed here
    Invalid { reason: SnapError },
}

impl SnapResult {
    fn invalid(reason: SnapError) -> Self {
        Self::Invalid { reason }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, SnapResult::Valid { .. })
    }

    /// Rejection reason, if invalid
    pub fn reason(&self) -> Option<&SnapError> {
        match self {
            SnapResult::Invalid { reason } => Some(reason),
            SnapResult::Valid { .. } => None,
        }
    }

    /// Snapped position, if valid
    pub fn position(&self) -> Option<Vec3> {
        match self {
            SnapResult::Valid { position, .. } => Some(*position),
            SnapResult::Invalid { .. } => None,
        }
    }
}

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Targeting,
    Committed,
    Cancelled,
}

/// Whether the session places a new accessory or moves an existing one
#[derive(Debug, Clone)]
enum SessionMode {
    Place,
    /// The original keeps its reservation until commit
    Reposition { original: Placement },
}

/// Per-accessory placement session.
///
/// Holds immutable board and accessory data; the only shared mutable state,
/// the occupancy tracker, is borrowed per call and written exclusively by
/// `commit`.
#[derive(Debug, Clone)]
pub struct PlacementSession {
    board: PegboardMetadata,
    accessory: String,
    config: PegConfiguration,
    footprint: Footprint,
    params: SnapParams,
    mode: SessionMode,
    state: SessionState,
    last: Option<SnapResult>,
}

impl PlacementSession {
    /// Create an idle session for one accessory type on one board
    pub fn new(
        board: PegboardMetadata,
        accessory: impl Into<String>,
        config: PegConfiguration,
        footprint: Footprint,
    ) -> Self {
        Self {
            board,
            accessory: accessory.into(),
            config,
            footprint,
            params: SnapParams::default(),
            mode: SessionMode::Place,
            state: SessionState::Idle,
            last: None,
        }
    }

    /// Override tolerance and margin
    pub fn with_params(mut self, params: SnapParams) -> Self {
        self.params = params;
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Result of the most recent `update`, if any
    pub fn last_result(&self) -> Option<&SnapResult> {
        self.last.as_ref()
    }

    /// True while pointer moves are being evaluated
    pub fn is_targeting(&self) -> bool {
        self.state == SessionState::Targeting
    }

    /// True when moving an existing placement
    pub fn is_repositioning(&self) -> bool {
        matches!(self.mode, SessionMode::Reposition { .. })
    }

    /// Start targeting a fresh placement. The host must have finished
    /// loading the accessory asset before calling this.
    pub fn begin(&mut self) {
        self.mode = SessionMode::Place;
        self.state = SessionState::Targeting;
        self.last = None;
        tracing::debug!(accessory = %self.accessory, "session targeting");
    }

    /// Start repositioning an existing placement. Its holes stay reserved
    /// (and are excluded from conflict checks) until commit.
    pub fn begin_reposition(&mut self, placement: Placement) {
        tracing::debug!(placement = %placement.id, "session repositioning");
        self.mode = SessionMode::Reposition {
            original: placement,
        };
        self.state = SessionState::Targeting;
        self.last = None;
    }

    /// Placement id to exclude from occupancy and overlap checks
    fn exclude_id(&self) -> Option<Uuid> {
        match &self.mode {
            SessionMode::Reposition { original } => Some(original.id),
            SessionMode::Place => None,
        }
    }

    /// Evaluate one pointer move. `pointer` is the ray-board intersection in
    /// board-local space, or `None` when the pointer left the board.
    ///
    /// Reads the occupancy tracker but never writes it.
    pub fn update(
        &mut self,
        pointer: Option<Vec3>,
        occupancy: &OccupancyTracker,
        placed: &[PlacedAccessory],
    ) -> SnapResult {
        if self.state != SessionState::Targeting {
            return SnapResult::invalid(SnapError::NotTargeting);
        }
        let result = self.evaluate(pointer, occupancy, placed);
        self.last = Some(result.clone());
        result
    }

    /// Commit the last valid result: reserve the hole group, mint the
    /// placement record, and (when repositioning) release the superseded
    /// reservation first.
    pub fn commit(&mut self, occupancy: &mut OccupancyTracker) -> Result<Placement, SnapError> {
        if self.state != SessionState::Targeting {
            return Err(SnapError::NotTargeting);
        }
        let Some(SnapResult::Valid {
            position,
            rotation,
            occupied_holes,
            report,
        }) = self.last.clone()
        else {
            return Err(SnapError::InvalidCommit);
        };

        let id = Uuid::new_v4();
        match &self.mode {
            SessionMode::Reposition { original } => {
                occupancy.release(&original.occupied_holes);
                if let Err(err) = occupancy.reserve(&occupied_holes, id) {
                    // Restore the superseded reservation; it was conflict-free
                    // before we released it, so this cannot fail.
                    let _ = occupancy.reserve(&original.occupied_holes, original.id);
                    return Err(err);
                }
            }
            SessionMode::Place => occupancy.reserve(&occupied_holes, id)?,
        }

        self.state = SessionState::Committed;
        tracing::debug!(placement = %id, accessory = %self.accessory, "committed placement");
        Ok(Placement {
            id,
            accessory: self.accessory.clone(),
            position,
            rotation,
            occupied_holes,
            validation: report,
        })
    }

    /// Abort targeting with zero occupancy mutation. A repositioned
    /// placement keeps its original reservation.
    pub fn cancel(&mut self) {
        self.state = SessionState::Cancelled;
        self.last = None;
        tracing::debug!(accessory = %self.accessory, "session cancelled");
    }

    fn evaluate(
        &self,
        pointer: Option<Vec3>,
        occupancy: &OccupancyTracker,
        placed: &[PlacedAccessory],
    ) -> SnapResult {
        let Some(anchor) = pointer else {
            return SnapResult::invalid(SnapError::OffBoard);
        };

        if self.config.is_legacy() {
            return self.evaluate_legacy(anchor, occupancy, placed);
        }

        let Some((group, active_pegs, rotation)) = self.match_pattern(anchor) else {
            return SnapResult::invalid(SnapError::PatternMismatch);
        };

        if let Some(occupant) = occupancy.occupant_of_excluding(&group, self.exclude_id()) {
            return SnapResult::invalid(SnapError::OccupancyConflict { occupant });
        }

        let report = validator::validate(&self.config.pegs[..active_pegs], &group, &self.board);
        if !report.valid {
            return SnapResult::invalid(SnapError::GeometryViolation { report });
        }

        let normal = self.board.front_face_normal;
        let Some(mut position) =
            flush::compute_origin_position(&self.config, &group, normal, rotation)
        else {
            return SnapResult::invalid(SnapError::PatternMismatch);
        };
        position.z = flush::compute_flush_z(&self.config, &self.board);

        if let Some(reason) = self.check_extent(position, placed) {
            return SnapResult::invalid(reason);
        }
        SnapResult::Valid {
            position,
            rotation,
            occupied_holes: group,
            report,
        }
    }

    /// Legacy accessories carry no peg pattern: snap to the nearest hole and
    /// require the resolved position to coincide with it.
    fn evaluate_legacy(
        &self,
        anchor: Vec3,
        occupancy: &OccupancyTracker,
        placed: &[PlacedAccessory],
    ) -> SnapResult {
        let Some(hole) = matcher::find_closest_hole(anchor, &self.board.holes) else {
            return SnapResult::invalid(SnapError::PatternMismatch);
        };
        if hole.distance_to(anchor) > self.params.tolerance {
            return SnapResult::invalid(SnapError::PatternMismatch);
        }

        let mut position = hole.position;
        position.z = flush::compute_flush_z(&self.config, &self.board);
        if !collision::is_on_known_hole(position, &self.board.holes, KNOWN_HOLE_TOLERANCE) {
            return SnapResult::invalid(SnapError::NotOnHole);
        }

        let group = vec![hole];
        if let Some(occupant) = occupancy.occupant_of_excluding(&group, self.exclude_id()) {
            return SnapResult::invalid(SnapError::OccupancyConflict { occupant });
        }
        if let Some(reason) = self.check_extent(position, placed) {
            return SnapResult::invalid(reason);
        }
        SnapResult::Valid {
            position,
            rotation: 0.0,
            occupied_holes: group,
            report: ValidationReport::default(),
        }
    }

    /// Try the unrotated pattern, then each listed rotation in order, then
    /// the anchor-peg fallback for accessories that tolerate missing holes.
    /// Returns the best group, the number of active pegs, and the rotation.
    fn match_pattern(&self, anchor: Vec3) -> Option<(HoleGroup, usize, f32)> {
        let holes = &self.board.holes;
        let normal = self.board.front_face_normal;
        let tolerance = self.params.tolerance;

        let groups = matcher::find_compatible_hole_groups(&self.config, holes, anchor, tolerance);
        if let Some(group) = groups.into_iter().next() {
            return Some((group, self.config.peg_count(), 0.0));
        }

        for &angle in &self.config.mounting.allowable_rotations {
            if angle.abs() < 1e-6 {
                continue; // zero rotation already tried
            }
            let groups = matcher::find_rotated_hole_groups(
                &self.config,
                holes,
                anchor,
                tolerance,
                normal,
                angle,
            );
            if let Some(group) = groups.into_iter().next() {
                return Some((group, self.config.peg_count(), angle));
            }
        }

        if !self.config.mounting.requires_all_pegs && self.config.peg_count() > 1 {
            // Hang the accessory off its anchor peg alone
            let hole = matcher::find_closest_hole(anchor, holes)?;
            if hole.distance_to(anchor) <= tolerance {
                return Some((vec![hole], 1, 0.0));
            }
        }
        None
    }

    fn check_extent(&self, position: Vec3, placed: &[PlacedAccessory]) -> Option<SnapError> {
        if !collision::within_board_bounds(position, &self.footprint, &self.board) {
            return Some(SnapError::BoundsViolation);
        }
        collision::find_overlap(
            position,
            &self.footprint,
            placed,
            self.params.margin,
            self.exclude_id(),
        )
        .map(|other| SnapError::OverlapViolation { other })
    }
}
