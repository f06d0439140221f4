//! Geometry helpers: segment projection and ray/plate intersection

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Closest point on segment `[seg_start, seg_end]` to `point`, and its distance.
///
/// The projection parameter is clamped to the segment. A zero-length segment
/// yields `seg_start`.
pub fn closest_point_on_segment(point: Vec3, seg_start: Vec3, seg_end: Vec3) -> (Vec3, f32) {
    let seg = seg_end - seg_start;
    let length = seg.length();
    if length <= f32::EPSILON {
        return (seg_start, point.distance(seg_start));
    }

    let dir = seg / length;
    let t = (point - seg_start).dot(dir).clamp(0.0, length);
    let closest = seg_start + dir * t;
    (closest, point.distance(closest))
}

/// Bounded rectangular metal plate, hit by the rig's raycast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetalPlate {
    pub center: Vec3,
    /// Surface normal (normalized on construction)
    pub normal: Vec3,
    /// In-plane axis along which `half_extents.x` is measured
    pub u_axis: Vec3,
    pub half_extents: [f32; 2],
    /// Layer bit of this plate
    pub layer: u32,
    pub id: u32,
}

impl MetalPlate {
    /// Plate lying in the XZ plane at height `y`, facing up
    pub fn horizontal(center: Vec3, half_x: f32, half_z: f32, layer: u32) -> Self {
        Self {
            center,
            normal: Vec3::Y,
            u_axis: Vec3::X,
            half_extents: [half_x, half_z],
            layer,
            id: 0,
        }
    }

    fn v_axis(&self) -> Vec3 {
        self.normal.cross(self.u_axis).normalize_or_zero()
    }

    /// Does `point` (assumed on the plate's plane) lie within its bounds?
    pub fn contains(&self, point: Vec3) -> bool {
        let local = point - self.center;
        local.dot(self.u_axis).abs() <= self.half_extents[0]
            && local.dot(self.v_axis()).abs() <= self.half_extents[1]
    }
}

/// Ray/plate intersection within `max_distance`.
///
/// Returns the hit point and its distance along the ray. Rays parallel to the
/// plate, pointing away from it, or landing outside its bounds miss.
pub fn intersect_plate(
    origin: Vec3,
    direction: Vec3,
    plate: &MetalPlate,
    max_distance: f32,
) -> Option<(Vec3, f32)> {
    let dir = direction.normalize_or_zero();
    let denom = plate.normal.dot(dir);
    if denom.abs() <= f32::EPSILON {
        return None;
    }

    let t = (plate.center - origin).dot(plate.normal) / denom;
    if t < 0.0 || t > max_distance {
        return None;
    }

    let point = origin + dir * t;
    plate.contains(point).then_some((point, t))
}
