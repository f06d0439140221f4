//! Weldpass: weld-pass evaluation engine for a VR welding trainer
//!
//! Tracks the welding gun tip against a seam, places bead marks while the
//! trigger is held, and grades the pass when the tool is put down.

pub mod core;
pub mod types;

// =============================================================================
// REACH & EFFECTS
// =============================================================================

/// Max reach of the welding ray from the gun tip (meters)
pub const RAY_DISTANCE: f32 = 3.0;

/// Sparks emit while the tip is closer than this to the metal (meters)
pub const SPARK_DISTANCE: f32 = 0.08;

/// Minimum travel between two bead marks (meters)
pub const WELD_MARK_SPACING: f32 = 0.015;

/// Default layer bit for weldable metal
pub const METAL_LAYER: u32 = 1 << 3;

// =============================================================================
// BEAD SIZE BANDS
// =============================================================================

/// Closer than this the bead comes out fat
pub const MIN_WELD_DISTANCE: f32 = 0.01;

/// Beyond this no bead is laid at all
pub const MAX_WELD_DISTANCE: f32 = 0.06;

/// Ideal tip-to-surface distance
pub const OPTIMAL_WELD_DISTANCE: f32 = 0.03;

/// Tolerance around the optimal distance for a good bead
pub const OPTIMAL_BAND: f32 = 0.01;

pub const FAT_SCALE: f32 = 1.5;
pub const GOOD_SCALE: f32 = 1.0;
pub const THIN_SCALE: f32 = 0.5;

// =============================================================================
// HEAT BANDS - half-open: (low, mid] optimal, (mid, high] overheated
// =============================================================================

pub const HEAT_LOW_BOUND: i32 = 80;
pub const HEAT_MID_BOUND: i32 = 100;
pub const HEAT_HIGH_BOUND: i32 = 140;

// =============================================================================
// SEAM
// =============================================================================

/// Allowed lateral deviation of the hit point from the seam (meters)
pub const SEAM_THRESHOLD: f32 = 0.02;

/// Distance between coverage samples along the seam (meters)
pub const COVERAGE_SAMPLE_SPACING: f32 = 0.018;

/// A sample is covered when a bead lies strictly closer than this (meters)
pub const COVERAGE_TOLERANCE: f32 = 0.025;

/// Smallest sample spacing a config may ask for (meters)
pub const MIN_COVERAGE_SAMPLE_SPACING: f32 = 1e-4;

/// Upper bound on samples per seam, whatever its length
pub const MAX_COVERAGE_SAMPLES: usize = 100_000;

// =============================================================================
// PRESENTATION TIMING (seconds)
// =============================================================================

/// Delay between putting the tool down and revealing the verdict
pub const VERDICT_REVEAL_DELAY_SECS: f64 = 0.5;

/// How long the verdict stays on screen
pub const VERDICT_HOLD_SECS: f64 = 3.0;

/// Lock popup auto-dismiss after a rejected grab
pub const LOCK_NOTICE_SECS: f64 = 2.0;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
