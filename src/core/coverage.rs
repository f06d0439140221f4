//! Seam Coverage Checker
//!
//! Samples the seam at a fixed spacing and requires every sample to have a
//! bead strictly within tolerance. O(samples x beads), which is fine for a
//! few hundred beads per pass. Samples are generated lazily.

use glam::Vec3;

use crate::types::{CoverageReport, Seam};
use crate::MAX_COVERAGE_SAMPLES;

/// Number of samples for a seam of `length`: `max(2, floor(length / spacing))`,
/// capped at [`MAX_COVERAGE_SAMPLES`]
pub fn sample_count(length: f32, sample_spacing: f32) -> usize {
    let n = (length / sample_spacing).floor();
    if n.is_nan() || n <= 2.0 {
        2
    } else if n >= MAX_COVERAGE_SAMPLES as f32 {
        MAX_COVERAGE_SAMPLES
    } else {
        n as usize
    }
}

/// Sample points from `seam.start` to `seam.end` inclusive
pub fn sample_points(seam: &Seam, sample_spacing: f32) -> impl Iterator<Item = Vec3> + '_ {
    let n = sample_count(seam.length(), sample_spacing);
    (0..n).map(move |i| seam.point_at(i as f32 / (n - 1) as f32))
}

fn is_sample_covered(sample: Vec3, beads: &[Vec3], tolerance: f32) -> bool {
    beads.iter().any(|b| sample.distance(*b) < tolerance)
}

/// Is the whole seam covered by beads?
///
/// Short-circuits on the first uncovered sample. No beads, or a seam with
/// coincident endpoints, is never covered.
pub fn is_seam_covered(seam: &Seam, beads: &[Vec3], sample_spacing: f32, tolerance: f32) -> bool {
    if beads.is_empty() || seam.is_degenerate() {
        return false;
    }

    sample_points(seam, sample_spacing).all(|s| is_sample_covered(s, beads, tolerance))
}

/// Full scan, counting covered samples instead of stopping early
pub fn coverage_report(
    seam: &Seam,
    beads: &[Vec3],
    sample_spacing: f32,
    tolerance: f32,
) -> CoverageReport {
    if beads.is_empty() || seam.is_degenerate() {
        return CoverageReport::empty();
    }

    let samples = sample_count(seam.length(), sample_spacing);
    let covered_samples = sample_points(seam, sample_spacing)
        .filter(|s| is_sample_covered(*s, beads, tolerance))
        .count();

    CoverageReport {
        covered: covered_samples == samples,
        samples,
        covered_samples,
    }
}

// =============================================================================
// TESTS
// =============================================================================
