//! Snap engine for the pegboard placement editor
//!
//! This crate provides:
//! - Peg-pattern to hole-group matching near a pointer, with rotation sweep
//! - Per-peg geometric fit validation
//! - Board-edge containment and inter-accessory overlap checks
//! - The flush-mount rigid transform for an accepted hole group
//! - The `PlacementSession` state machine tying it all together
//!
//! The data model and the occupancy tracker live in `pb-core`. Everything
//! here is synchronous and single-threaded; one pointer-move pipeline runs
//! to completion before the next event is processed.

pub mod collision;
pub mod flush;
pub mod matcher;
pub mod session;
pub mod validator;

// Re-exports for convenience
pub use matcher::{
    HoleGroup, find_closest_hole, find_compatible_hole_groups, find_rotated_hole_groups,
    test_rotations,
};
pub use session::{PlacementSession, SessionState, SnapParams, SnapResult};
pub use validator::validate;
