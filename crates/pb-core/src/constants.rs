//! Global constants for pb-core

/// Hole key quantization precision (multiply by this, then round to int).
///
/// A 1e-4 m lattice: coarse enough to absorb floating-point noise from
/// transforms and catalog round-trips, fine enough to keep adjacent holes
/// distinct on any real grid.
pub const HOLE_KEY_PRECISION: f32 = 10_000.0;

/// Default snap tolerance between a peg's expected position and an actual hole (meters)
pub const DEFAULT_SNAP_TOLERANCE: f32 = 0.002;

/// Default clearance margin added around accessory footprints for overlap checks (meters)
pub const DEFAULT_CLEARANCE_MARGIN: f32 = 0.002;

/// Maximum deviation of dot(insertion direction, front face normal) from -1
/// for a peg to count as aligned (about 25.8 degrees of cone)
pub const ALIGNMENT_TOLERANCE: f32 = 0.1;

/// Tolerance for treating a resolved position as sitting on a known hole (meters)
pub const KNOWN_HOLE_TOLERANCE: f32 = 0.001;
