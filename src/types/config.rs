//! Runtime configuration for a weld station
//!
//! Mirrors the tunables a scene designer would set on the welding gun.
//! Every field has a default from the crate-level constants, so a JSON
//! file only needs to name what it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{WeldError, WeldResult};
use crate::{
    COVERAGE_SAMPLE_SPACING, COVERAGE_TOLERANCE, FAT_SCALE, GOOD_SCALE, HEAT_HIGH_BOUND,
    HEAT_LOW_BOUND, HEAT_MID_BOUND, LOCK_NOTICE_SECS, MAX_WELD_DISTANCE, METAL_LAYER,
    MIN_COVERAGE_SAMPLE_SPACING, MIN_WELD_DISTANCE, OPTIMAL_BAND, OPTIMAL_WELD_DISTANCE,
    RAY_DISTANCE, SPARK_DISTANCE, THIN_SCALE, VERDICT_HOLD_SECS, VERDICT_REVEAL_DELAY_SECS,
    WELD_MARK_SPACING,
};

/// Tip-distance bands deciding bead size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeBands {
    /// Closer than this is fat
    pub min: f32,
    /// Farther than this lays nothing
    pub max: f32,
    pub optimal: f32,
    /// Half-width of the good band around `optimal`
    pub band: f32,
    pub fat_scale: f32,
    pub good_scale: f32,
    pub thin_scale: f32,
}

impl Default for SizeBands {
    fn default() -> Self {
        Self {
            min: MIN_WELD_DISTANCE,
            max: MAX_WELD_DISTANCE,
            optimal: OPTIMAL_WELD_DISTANCE,
            band: OPTIMAL_BAND,
            fat_scale: FAT_SCALE,
            good_scale: GOOD_SCALE,
            thin_scale: THIN_SCALE,
        }
    }
}

/// Heat reading bands: (low, mid] optimal, (mid, high] overheated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatBands {
    pub low: i32,
    pub mid: i32,
    pub high: i32,
}

impl Default for HeatBands {
    fn default() -> Self {
        Self {
            low: HEAT_LOW_BOUND,
            mid: HEAT_MID_BOUND,
            high: HEAT_HIGH_BOUND,
        }
    }
}

/// Full station configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeldConfig {
    /// Max raycast reach from the tip
    pub ray_distance: f32,
    /// Layer bits the ray may hit
    pub layer_mask: u32,
    pub spark_distance: f32,
    /// Minimum travel between bead marks
    pub weld_mark_spacing: f32,
    pub size: SizeBands,
    pub heat: HeatBands,
    pub coverage_sample_spacing: f32,
    pub coverage_tolerance: f32,
    pub verdict_reveal_delay_secs: f64,
    pub verdict_hold_secs: f64,
    pub lock_notice_secs: f64,
}

impl Default for WeldConfig {
    fn default() -> Self {
        Self {
            ray_distance: RAY_DISTANCE,
            layer_mask: METAL_LAYER,
            spark_distance: SPARK_DISTANCE,
            weld_mark_spacing: WELD_MARK_SPACING,
            size: SizeBands::default(),
            heat: HeatBands::default(),
            coverage_sample_spacing: COVERAGE_SAMPLE_SPACING,
            coverage_tolerance: COVERAGE_TOLERANCE,
            verdict_reveal_delay_secs: VERDICT_REVEAL_DELAY_SECS,
            verdict_hold_secs: VERDICT_HOLD_SECS,
            lock_notice_secs: LOCK_NOTICE_SECS,
        }
    }
}

impl WeldConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> WeldResult<()> {
        if self.ray_distance <= 0.0 {
            return Err(WeldError::Config(format!(
                "ray_distance must be > 0, got {}",
                self.ray_distance
            )));
        }
        if self.weld_mark_spacing < 0.0 {
            return Err(WeldError::Config(format!(
                "weld_mark_spacing must be >= 0, got {}",
                self.weld_mark_spacing
            )));
        }
        let s = &self.size;
        if !(0.0 <= s.min && s.min <= s.optimal && s.optimal <= s.max) {
            return Err(WeldError::Config(format!(
                "size bands must satisfy 0 <= min <= optimal <= max, got {} / {} / {}",
                s.min, s.optimal, s.max
            )));
        }
        if s.band < 0.0 {
            return Err(WeldError::Config(format!(
                "size band must be >= 0, got {}",
                s.band
            )));
        }
        let h = &self.heat;
        if !(h.low <= h.mid && h.mid <= h.high) {
            return Err(WeldError::Config(format!(
                "heat bands must satisfy low <= mid <= high, got {} / {} / {}",
                h.low, h.mid, h.high
            )));
        }
        let spacing = self.coverage_sample_spacing;
        if spacing.is_nan() || spacing < MIN_COVERAGE_SAMPLE_SPACING {
            return Err(WeldError::Config(format!(
                "coverage_sample_spacing must be >= {}, got {}",
                MIN_COVERAGE_SAMPLE_SPACING, spacing
            )));
        }
        if self.coverage_tolerance <= 0.0 {
            return Err(WeldError::Config(format!(
                "coverage_tolerance must be > 0, got {}",
                self.coverage_tolerance
            )));
        }
        for (name, secs) in [
            ("verdict_reveal_delay_secs", self.verdict_reveal_delay_secs),
            ("verdict_hold_secs", self.verdict_hold_secs),
            ("lock_notice_secs", self.lock_notice_secs),
        ] {
            if !(secs >= 0.0 && secs.is_finite()) {
                return Err(WeldError::Config(format!(
                    "{name} must be a finite value >= 0, got {secs}"
                )));
            }
        }
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> WeldResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> WeldResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(WeldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = WeldConfig::from_json(r#"{"spark_distance": 0.05, "heat": {"mid": 110}}"#).unwrap();
        assert_eq!(config.spark_distance, 0.05);
        assert_eq!(config.heat.mid, 110);
        assert_eq!(config.heat.low, HEAT_LOW_BOUND);
        assert_eq!(config.ray_distance, RAY_DISTANCE);
    }

    #[test]
    fn test_inverted_heat_bands_rejected() {
        let err = WeldConfig::from_json(r#"{"heat": {"low": 120, "mid": 100, "high": 140}}"#)
            .unwrap_err();
        assert!(matches!(err, WeldError::Config(_)));
    }

    #[test]
    fn test_zero_sample_spacing_rejected() {
        let config = WeldConfig {
            coverage_sample_spacing: 0.0,
            ..WeldConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tiny_sample_spacing_rejected() {
        let err = WeldConfig::from_json(r#"{"coverage_sample_spacing": 1e-30}"#).unwrap_err();
        assert!(matches!(err, WeldError::Config(_)));

        let config = WeldConfig {
            coverage_sample_spacing: f32::NAN,
            ..WeldConfig::default()
        };
        assert!(config.validate().is_err());

        let config = WeldConfig {
            coverage_sample_spacing: MIN_COVERAGE_SAMPLE_SPACING,
            ..WeldConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_garbage_json_is_json_error() {
        let err = WeldConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, WeldError::Json(_)));
    }
}
