//! Per-peg fit validation report types
//!
//! The checking logic lives in `pb-snap`; the report travels with committed
//! placements, so the data types live here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A top-level validation failure
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("accessory has no peg configuration")]
    NoPegConfig,
    #[error("peg count {expected} does not match hole group length {actual}")]
    CountMismatch { expected: usize, actual: usize },
    #[error("peg {peg} diameter exceeds the hole diameter")]
    PegTooLarge { peg: usize },
    #[error("peg {peg} is longer than the hole depth")]
    PegTooLong { peg: usize },
    #[error("peg {peg} insertion direction is misaligned with the board")]
    PegMisaligned { peg: usize },
}

/// A geometric problem found on a single peg
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum PegFitIssue {
    #[error("diameter {diameter} exceeds hole diameter {hole_diameter}")]
    TooLarge { diameter: f32, hole_diameter: f32 },
    #[error("length {length} exceeds hole depth {hole_depth}")]
    TooLong { length: f32, hole_depth: f32 },
    #[error("insertion alignment {alignment} outside tolerance")]
    Misaligned { alignment: f32 },
}

/// Fit status for one peg against its candidate hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PegFitStatus {
    pub peg_id: Uuid,
    /// Index into the configuration's peg list
    pub index: usize,
    /// Problems found; empty means the peg fits
    pub issues: Vec<PegFitIssue>,
}

impl PegFitStatus {
    pub fn fits(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Result of validating a peg pattern against a hole group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Conjunction of all checks
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub per_peg: Vec<PegFitStatus>,
}

impl ValidationReport {
    /// A passing report with the given per-peg statuses
    pub fn passed(per_peg: Vec<PegFitStatus>) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            per_peg,
        }
    }

    /// A failing report
    pub fn failed(errors: Vec<ValidationError>, per_peg: Vec<PegFitStatus>) -> Self {
        Self {
            valid: false,
            errors,
            per_peg,
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::passed(Vec::new())
    }
}
