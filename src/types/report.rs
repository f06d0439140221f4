//! Pass report produced when the tool is put down

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::types::{Bead, SizeCategory, Verdict};

/// Outcome of the sampled coverage scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub covered: bool,
    /// Number of sample points along the seam (0 when nothing was scanned)
    pub samples: usize,
    /// Samples with a bead within tolerance
    pub covered_samples: usize,
}

impl CoverageReport {
    /// Nothing to scan: no beads or a degenerate seam
    pub fn empty() -> Self {
        Self {
            covered: false,
            samples: 0,
            covered_samples: 0,
        }
    }

    /// Fraction of covered samples (0.0-1.0)
    pub fn ratio(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.covered_samples as f64 / self.samples as f64
        }
    }
}

/// Summary of one grab-to-release pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassReport {
    pub timestamp: DateTime<Utc>,
    pub verdict: Verdict,
    pub bead_count: usize,
    pub fat_beads: usize,
    pub good_beads: usize,
    pub thin_beads: usize,
    pub thermal_optimal_beads: usize,
    pub coverage: CoverageReport,
    pub weld_secs: f64,
    pub optimal_secs: f64,
}

impl PassReport {
    /// Build the report from the finished bead list
    pub fn new(
        verdict: Verdict,
        beads: &[Bead],
        coverage: CoverageReport,
        weld_secs: f64,
        optimal_secs: f64,
    ) -> Self {
        let count = |cat: SizeCategory| beads.iter().filter(|b| b.size_category == cat).count();
        Self {
            timestamp: Utc::now(),
            verdict,
            bead_count: beads.len(),
            fat_beads: count(SizeCategory::Fat),
            good_beads: count(SizeCategory::Good),
            thin_beads: count(SizeCategory::Thin),
            thermal_optimal_beads: beads.iter().filter(|b| b.thermal_optimal).count(),
            coverage,
            weld_secs,
            optimal_secs,
        }
    }

    /// Multi-line summary for the terminal
    pub fn to_summary_string(&self) -> String {
        format!(
            "verdict={} | beads={} (fat={} good={} thin={}) | thermal-optimal={} | coverage={}/{} ({:.0}%) | weld={:.2}s",
            self.verdict,
            self.bead_count,
            self.fat_beads,
            self.good_beads,
            self.thin_beads,
            self.thermal_optimal_beads,
            self.coverage.covered_samples,
            self.coverage.samples,
            self.coverage.ratio() * 100.0,
            self.weld_secs,
        )
    }
}
