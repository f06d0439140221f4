//! Bead records and their classifications

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Size of a bead, decided by tip-to-surface distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizeCategory {
    /// Tip too close, too much metal
    Fat,
    /// Within the optimal band
    Good,
    /// Tip too far, starved bead
    Thin,
}

impl SizeCategory {
    pub fn is_optimal(&self) -> bool {
        *self == SizeCategory::Good
    }
}

impl std::fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SizeCategory::Fat => "FAT",
            SizeCategory::Good => "GOOD",
            SizeCategory::Thin => "THIN",
        };
        write!(f, "{}", name)
    }
}

/// Thermal state of a bead, decided by the heat reading at placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThermalTag {
    /// Too cold, or past the overheated band
    Moderate,
    Optimal,
    Overheated,
}

impl ThermalTag {
    pub fn is_optimal(&self) -> bool {
        *self == ThermalTag::Optimal
    }

    /// Material the renderer should put on the bead
    pub fn material(&self) -> MoltenMaterial {
        match self {
            ThermalTag::Moderate => MoltenMaterial::ModerateMolten,
            ThermalTag::Optimal => MoltenMaterial::OptimalMolten,
            ThermalTag::Overheated => MoltenMaterial::RedHot,
        }
    }
}

impl std::fmt::Display for ThermalTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ThermalTag::Moderate => "MODERATE",
            ThermalTag::Optimal => "OPTIMAL",
            ThermalTag::Overheated => "OVERHEATED",
        };
        write!(f, "{}", name)
    }
}

/// Bead material selection handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoltenMaterial {
    ModerateMolten,
    OptimalMolten,
    RedHot,
}

/// One weld mark, immutable once laid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bead {
    /// Where the ray hit the metal
    pub position: Vec3,
    pub thermal_optimal: bool,
    pub size_optimal: bool,
    pub size_category: SizeCategory,
    pub thermal_tag: ThermalTag,
    /// Heat dial value sampled when the bead was laid
    pub heat_reading: i32,
    /// Tip-to-hit distance when the bead was laid
    pub tip_distance: f32,
}

impl Bead {
    /// Build a bead from its two classifications
    pub fn new(
        position: Vec3,
        size_category: SizeCategory,
        thermal_tag: ThermalTag,
        heat_reading: i32,
        tip_distance: f32,
    ) -> Self {
        Self {
            position,
            thermal_optimal: thermal_tag.is_optimal(),
            size_optimal: size_category.is_optimal(),
            size_category,
            thermal_tag,
            heat_reading,
            tip_distance,
        }
    }

    /// Both thermally and dimensionally on target
    pub fn is_excellent(&self) -> bool {
        self.thermal_optimal && self.size_optimal
    }

    /// Neither thermally nor dimensionally on target
    pub fn is_poor(&self) -> bool {
        !self.thermal_optimal && !self.size_optimal
    }
}
