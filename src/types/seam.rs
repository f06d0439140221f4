//! Seam, tool pose and ray hits

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::SEAM_THRESHOLD;

/// Line segment the trainee has to weld along
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seam {
    pub start: Vec3,
    pub end: Vec3,
    /// Max lateral deviation of the hit point to count as on-seam
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

fn default_threshold() -> f32 {
    SEAM_THRESHOLD
}

impl Seam {
    /// Create a seam with the default on-seam threshold
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            end,
            threshold: SEAM_THRESHOLD,
        }
    }

    /// Override the on-seam threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Coincident endpoints, nothing to weld
    pub fn is_degenerate(&self) -> bool {
        self.length() <= f32::EPSILON
    }

    /// Point at parameter `t` in [0, 1] along the seam
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.start.lerp(self.end, t)
    }
}

/// Where the gun tip is and where it points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TipPose {
    pub origin: Vec3,
    /// Forward axis, normalized by the constructor
    pub direction: Vec3,
}

impl TipPose {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }
}

/// Identifier of the surface a ray landed on
pub type SurfaceId = u32;

/// Result of a successful raycast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub point: Vec3,
    /// Distance from ray origin to `point`
    pub distance: f32,
    pub surface: SurfaceId,
}
