//! Core data model for the pegboard placement engine
//!
//! This crate provides:
//! - Board geometry with quantized hole identity
//! - Accessory attachment patterns (pegs, mounting, footprints)
//! - Committed placement records
//! - The hole occupancy tracker and its invariants
//! - The shared error and validation-report taxonomy
//!
//! Geometry search and session orchestration live in `pb-snap`.

pub mod accessory;
pub mod board;
pub mod constants;
pub mod error;
pub mod occupancy;
pub mod placement;
pub mod validation;

// Re-exports for convenience
pub use accessory::{Footprint, MountSurface, MountingSpec, Peg, PegConfiguration};
pub use board::{BoardDimensions, Hole, HoleKey, HoleSpec, PegboardMetadata};
pub use error::SnapError;
pub use occupancy::OccupancyTracker;
pub use placement::{PlacedAccessory, Placement};
pub use validation::{PegFitIssue, PegFitStatus, ValidationError, ValidationReport};
