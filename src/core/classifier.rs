//! Bead Classifier: size from tip distance, thermal state from heat reading

use crate::types::{HeatBands, SizeBands, SizeCategory, ThermalTag};

/// Classify bead size from the tip-to-surface distance.
///
/// Total over every input: anything that is neither fat nor inside the
/// optimal band (NaN included) is thin.
pub fn classify_size(tip_distance: f32, bands: &SizeBands) -> SizeCategory {
    if tip_distance < bands.min {
        SizeCategory::Fat
    } else if (tip_distance - bands.optimal).abs() <= bands.band {
        SizeCategory::Good
    } else {
        SizeCategory::Thin
    }
}

/// Classify the thermal state from the heat reading.
///
/// Half-open bands: `(low, mid]` optimal, `(mid, high]` overheated,
/// everything else moderate.
pub fn classify_thermal(heat: i32, bands: &HeatBands) -> ThermalTag {
    if heat > bands.low && heat <= bands.mid {
        ThermalTag::Optimal
    } else if heat > bands.mid && heat <= bands.high {
        ThermalTag::Overheated
    } else {
        ThermalTag::Moderate
    }
}

/// Render scale for a size category
pub fn size_scale(category: SizeCategory, bands: &SizeBands) -> f32 {
    match category {
        SizeCategory::Fat => bands.fat_scale,
        SizeCategory::Good => bands.good_scale,
        SizeCategory::Thin => bands.thin_scale,
    }
}

// =============================================================================
// TESTS
// =============================================================================
