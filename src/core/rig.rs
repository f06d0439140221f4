//! Simulated weld station: gas valve, display switch, heat dial, metal
//! plates and the tracked gun tip.
//!
//! Stands in for the VR scene so passes can be scripted and served.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::geometry::{intersect_plate, MetalPlate};
use crate::core::WeldEnvironment;
use crate::types::{RayHit, TipPose};

/// Lowest dial value
pub const HEAT_DIAL_MIN: i32 = 0;
/// Highest dial value before wrapping
pub const HEAT_DIAL_MAX: i32 = 200;
/// Dial increment per click
pub const HEAT_DIAL_STEP: i32 = 5;

/// On/off toggle flipped by a grab (gas tank valve, display switch)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toggle {
    on: bool,
}

impl Toggle {
    pub fn new(on: bool) -> Self {
        Self { on }
    }

    /// Flip and return the new state
    pub fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

/// Heat dial on the machine display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatDial {
    value: i32,
    min: i32,
    max: i32,
    step: i32,
}

impl Default for HeatDial {
    fn default() -> Self {
        Self {
            value: HEAT_DIAL_MIN,
            min: HEAT_DIAL_MIN,
            max: HEAT_DIAL_MAX,
            step: HEAT_DIAL_STEP,
        }
    }
}

impl HeatDial {
    /// Dial starting at `value`, clamped into range
    pub fn with_value(value: i32) -> Self {
        let dial = Self::default();
        Self {
            value: value.clamp(dial.min, dial.max),
            ..dial
        }
    }

    /// One click: step up, wrap to min past max. Ignored while the display is off.
    pub fn click(&mut self, display_on: bool) -> i32 {
        if display_on {
            self.value += self.step;
            if self.value > self.max {
                self.value = self.min;
            }
        }
        self.value
    }

    /// Knob turned to `position` in [0, 1]: linear over the range, rounded
    /// to the nearest whole value
    pub fn set_normalized(&mut self, position: f32) -> i32 {
        let t = if position.is_nan() { 0.0 } else { position.clamp(0.0, 1.0) };
        let span = (self.max - self.min) as f32;
        self.value = self.min + (span * t).round() as i32;
        self.value
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Text on the display: 3-digit value, blank while switched off
    pub fn display_text(&self, display_on: bool) -> String {
        if display_on {
            format!("{:03}", self.value)
        } else {
            String::new()
        }
    }
}

/// The whole station around the welding gun
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeldRig {
    pub gas: Toggle,
    pub display: Toggle,
    pub dial: HeatDial,
    pub plates: Vec<MetalPlate>,
    pub tip: Option<TipPose>,
}

impl Default for WeldRig {
    fn default() -> Self {
        Self::new()
    }
}

impl WeldRig {
    /// Empty station: gas and display off, dial at zero, no metal
    pub fn new() -> Self {
        Self {
            gas: Toggle::default(),
            display: Toggle::default(),
            dial: HeatDial::default(),
            plates: Vec::new(),
            tip: None,
        }
    }

    /// Add a plate to cast against
    pub fn with_plate(mut self, plate: MetalPlate) -> Self {
        self.plates.push(plate);
        self
    }

    /// Gas and display on, dial at `heat`
    pub fn ready(mut self, heat: i32) -> Self {
        self.gas = Toggle::new(true);
        self.display = Toggle::new(true);
        self.dial = HeatDial::with_value(heat);
        self
    }

    /// Move the gun tip
    pub fn aim(&mut self, origin: Vec3, direction: Vec3) {
        self.tip = Some(TipPose::new(origin, direction));
    }

    /// Tip hovering `height` above `point`, pointing straight down
    pub fn hover(&mut self, point: Vec3, height: f32) {
        self.aim(point + Vec3::Y * height, Vec3::NEG_Y);
    }

    /// Stop tracking the tip
    pub fn lose_tracking(&mut self) {
        self.tip = None;
    }

    /// Click the heat dial (only moves while the display is on)
    pub fn click_dial(&mut self) -> i32 {
        self.dial.click(self.display.is_on())
    }

    /// The gas-off warning panel shows whenever the valve is closed
    pub fn gas_warning_visible(&self) -> bool {
        !self.gas.is_on()
    }
}

impl WeldEnvironment for WeldRig {
    fn tip_pose(&self) -> Option<TipPose> {
        self.tip
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layer_mask: u32,
    ) -> Option<RayHit> {
        self.plates
            .iter()
            .filter(|p| p.layer & layer_mask != 0)
            .filter_map(|p| {
                intersect_plate(origin, direction, p, max_distance).map(|(point, distance)| RayHit {
                    point,
                    distance,
                    surface: p.id,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn gas_supply_enabled(&self) -> bool {
        self.gas.is_on()
    }

    fn display_lock_enabled(&self) -> bool {
        self.display.is_on()
    }

    fn current_heat_reading(&self) -> i32 {
        self.dial.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::METAL_LAYER;

    #[test]
    fn test_dial_steps_by_five() {
        let mut dial = HeatDial::default();
        assert_eq!(dial.click(true), 5);
        assert_eq!(dial.click(true), 10);
    }

    #[test]
    fn test_dial_wraps_past_max() {
        let mut dial = HeatDial::with_value(195);
        assert_eq!(dial.click(true), 200);
        assert_eq!(dial.click(true), 0);
    }

    #[test]
    fn test_dial_frozen_while_display_off() {
        let mut dial = HeatDial::with_value(90);
        assert_eq!(dial.click(false), 90);
        assert_eq!(dial.display_text(false), "");
        assert_eq!(dial.display_text(true), "090");
    }

    #[test]
    fn test_knob_position_maps_onto_range() {
        let mut dial = HeatDial::default();
        assert_eq!(dial.set_normalized(0.0), 0);
        assert_eq!(dial.set_normalized(0.5), 100);
        assert_eq!(dial.set_normalized(0.333), 67);
        assert_eq!(dial.set_normalized(1.0), 200);
        assert_eq!(dial.display_text(true), "200");
    }

    #[test]
    fn test_knob_position_is_clamped() {
        let mut dial = HeatDial::default();
        assert_eq!(dial.set_normalized(1.7), 200);
        assert_eq!(dial.set_normalized(-0.2), 0);
        assert_eq!(dial.set_normalized(f32::NAN), 0);
    }

    #[test]
    fn test_gas_warning_follows_valve() {
        let mut rig = WeldRig::new();
        assert!(rig.gas_warning_visible());
        rig.gas.toggle();
        assert!(!rig.gas_warning_visible());
        rig.gas.toggle();
        assert!(rig.gas_warning_visible());
    }

    #[test]
    fn test_toggle_flips() {
        let mut t = Toggle::default();
        assert!(!t.is_on());
        assert!(t.toggle());
        assert!(!t.toggle());
    }

    #[test]
    fn test_raycast_respects_layer_mask() {
        let plate = MetalPlate::horizontal(Vec3::ZERO, 0.5, 0.5, METAL_LAYER);
        let mut rig = WeldRig::new().with_plate(plate);
        rig.hover(Vec3::ZERO, 0.03);
        assert!(rig.raycast_from_tip(3.0, METAL_LAYER).is_some());
        assert!(rig.raycast_from_tip(3.0, 1).is_none());
    }

    #[test]
    fn test_raycast_picks_nearest_plate() {
        let low = MetalPlate { id: 1, ..MetalPlate::horizontal(Vec3::ZERO, 0.5, 0.5, METAL_LAYER) };
        let high = MetalPlate {
            id: 2,
            ..MetalPlate::horizontal(Vec3::new(0.0, 0.1, 0.0), 0.5, 0.5, METAL_LAYER)
        };
        let mut rig = WeldRig::new().with_plate(low).with_plate(high);
        rig.hover(Vec3::ZERO, 0.5);
        assert_eq!(rig.raycast_from_tip(3.0, METAL_LAYER).unwrap().surface, 2);
    }

    #[test]
    fn test_untracked_tip_never_hits() {
        let rig = WeldRig::new().with_plate(MetalPlate::horizontal(Vec3::ZERO, 0.5, 0.5, METAL_LAYER));
        assert!(rig.raycast_from_tip(3.0, METAL_LAYER).is_none());
    }
}
