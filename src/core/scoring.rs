//! Scoring Aggregator: three-tier verdict for a finished pass

use crate::types::{Bead, Verdict};

/// Grade a finished pass.
///
/// Returns `None` when no bead was laid; the caller decides what an empty
/// pass means. A bead that is optimal on one axis only lands in `Good`,
/// same as a genuinely mixed pass.
pub fn compute_verdict(beads: &[Bead], seam_covered: bool) -> Option<Verdict> {
    if beads.is_empty() {
        return None;
    }
    if !seam_covered {
        return Some(Verdict::Bad);
    }

    let verdict = if beads.iter().all(Bead::is_excellent) {
        Verdict::Excellent
    } else if beads.iter().all(Bead::is_poor) {
        Verdict::Bad
    } else {
        Verdict::Good
    };
    Some(verdict)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SizeCategory, ThermalTag};
    use glam::Vec3;

    fn bead(thermal: ThermalTag, size: SizeCategory) -> Bead {
        Bead::new(Vec3::ZERO, size, thermal, 90, 0.03)
    }

    fn excellent() -> Bead {
        bead(ThermalTag::Optimal, SizeCategory::Good)
    }

    fn poor() -> Bead {
        bead(ThermalTag::Overheated, SizeCategory::Thin)
    }

    #[test]
    fn test_empty_has_no_verdict() {
        assert_eq!(compute_verdict(&[], true), None);
        assert_eq!(compute_verdict(&[], false), None);
    }

    #[test]
    fn test_all_optimal_covered_is_excellent() {
        assert_eq!(compute_verdict(&[excellent(), excellent()], true), Some(Verdict::Excellent));
    }

    #[test]
    fn test_all_poor_covered_is_bad() {
        assert_eq!(compute_verdict(&[poor(), poor()], true), Some(Verdict::Bad));
    }

    #[test]
    fn test_mix_covered_is_good() {
        assert_eq!(compute_verdict(&[excellent(), poor()], true), Some(Verdict::Good));
    }

    #[test]
    fn test_uncovered_is_bad_regardless() {
        assert_eq!(compute_verdict(&[excellent()], false), Some(Verdict::Bad));
        assert_eq!(compute_verdict(&[excellent(), poor()], false), Some(Verdict::Bad));
    }

    #[test]
    fn test_half_optimal_bead_is_good() {
        // Thermal on target, size off
        let hot_fat = bead(ThermalTag::Optimal, SizeCategory::Fat);
        assert_eq!(compute_verdict(&[hot_fat.clone()], true), Some(Verdict::Good));
        // Size on target, thermal off
        let cold_good = bead(ThermalTag::Moderate, SizeCategory::Good);
        assert_eq!(compute_verdict(&[cold_good.clone()], true), Some(Verdict::Good));
        // Every bead half-optimal, none fully either way
        assert_eq!(compute_verdict(&[hot_fat, cold_good], true), Some(Verdict::Good));
    }
}
