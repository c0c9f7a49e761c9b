//! Snap/placement error taxonomy
//!
//! Every failure is recoverable and user-facing; the pipeline returns tagged
//! values and never panics.

use uuid::Uuid;

use crate::validation::ValidationReport;

/// Reasons a placement attempt is rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapError {
    #[error("accessory has no usable peg configuration")]
    NoPegConfig,
    #[error("no hole group satisfies the peg pattern within tolerance")]
    PatternMismatch,
    #[error("peg count {expected} does not match hole group length {actual}")]
    CountMismatch { expected: usize, actual: usize },
    #[error("one or more pegs fail geometric fit checks")]
    GeometryViolation { report: ValidationReport },
    #[error("candidate holes already occupied by placement {occupant}")]
    OccupancyConflict { occupant: Uuid },
    #[error("accessory extends past the board edge")]
    BoundsViolation,
    #[error("footprint overlaps placement {other}")]
    OverlapViolation { other: Uuid },
    #[error("pointer is off the board surface")]
    OffBoard,
    #[error("resolved position does not coincide with a known hole")]
    NotOnHole,
    #[error("session is not targeting")]
    NotTargeting,
    #[error("commit requires a valid targeting result")]
    InvalidCommit,
}
