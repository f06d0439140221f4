//! Collaborator seam between the engine and the scene

use glam::Vec3;

use crate::types::{RayHit, TipPose};

/// Everything the weld session reads from the outside world.
///
/// Implemented by the scene glue in a real trainer and by [`WeldRig`] for
/// the CLI, the server and tests. All reads are sampled at the moment the
/// engine needs them; the engine never writes through this trait.
///
/// [`WeldRig`]: crate::core::WeldRig
pub trait WeldEnvironment {
    /// Current pose of the gun tip, `None` while it is not tracked
    fn tip_pose(&self) -> Option<TipPose>;

    /// Cast a ray against surfaces whose layer matches `layer_mask`
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layer_mask: u32)
        -> Option<RayHit>;

    /// Is the gas tank open?
    fn gas_supply_enabled(&self) -> bool;

    /// Is the machine display switched on?
    fn display_lock_enabled(&self) -> bool;

    /// Heat value shown on the machine display (0-200)
    fn current_heat_reading(&self) -> i32;

    /// Raycast along the current tip pose
    fn raycast_from_tip(&self, max_distance: f32, layer_mask: u32) -> Option<RayHit> {
        let pose = self.tip_pose()?;
        self.raycast(pose.origin, pose.direction, max_distance, layer_mask)
    }
}
