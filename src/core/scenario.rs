//! Scripted weld passes
//!
//! A scenario is a seam, the metal under it and a list of station events.
//! The CLI replays scenario files, the interactive mode parses one event per
//! line, and the HTTP API accepts the same events as JSON.

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::geometry::MetalPlate;
use crate::core::{HeatDial, WeldRig, WeldSession};
use crate::types::{PassReport, Seam, StepOutput, Verdict, WeldConfig, WeldError, WeldResult};
use crate::METAL_LAYER;

/// Default frame length for ticks that do not name one
pub const DEFAULT_TICK_MS: u64 = 16;

/// Longest single frame an event may ask for
pub const MAX_TICK_MS: u64 = 60_000;

/// Most ticks one sweep may run
pub const MAX_SWEEP_STEPS: u32 = 10_000;

fn default_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}

/// One thing that can happen at the station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StationEvent {
    /// Flip the gas tank valve
    ToggleGas,
    /// Flip the machine display switch
    ToggleDisplay,
    /// Click the heat dial once
    ClickDial,
    /// Set the heat dial directly
    SetHeat { value: i32 },
    /// Turn the heat knob to a position in [0, 1]
    SetKnob { position: f32 },
    /// Point the gun tip
    Aim { origin: Vec3, direction: Vec3 },
    /// Hold the tip `height` above `point`, pointing down
    Hover { point: Vec3, height: f32 },
    /// Drag the tip from `from` to `to` at `height`, one tick per step
    Sweep {
        from: Vec3,
        to: Vec3,
        height: f32,
        steps: u32,
        #[serde(default = "default_tick_ms")]
        dt_ms: u64,
    },
    Grab,
    TriggerPress,
    Tick {
        #[serde(default = "default_tick_ms")]
        dt_ms: u64,
    },
    TriggerRelease,
    Release,
}

impl StationEvent {
    /// Parse one interactive command line.
    ///
    /// `gas`, `display`, `dial`, `heat N`, `knob T`, `aim x y z dx dy dz`,
    /// `hover x y z h`, `sweep x0 y0 z0 x1 y1 z1 h steps`, `grab`, `press`,
    /// `tick [ms]`, `up`, `release`.
    pub fn parse_command(line: &str) -> WeldResult<Self> {
        let mut parts = line.split_whitespace();
        let cmd = parts
            .next()
            .ok_or_else(|| WeldError::Scenario("empty command".to_string()))?
            .to_lowercase();
        let args: Vec<&str> = parts.collect();

        let event = match cmd.as_str() {
            "gas" => StationEvent::ToggleGas,
            "display" => StationEvent::ToggleDisplay,
            "dial" => StationEvent::ClickDial,
            "heat" => StationEvent::SetHeat {
                value: parse_arg(&cmd, &args, 0)?,
            },
            "knob" => StationEvent::SetKnob {
                position: parse_arg(&cmd, &args, 0)?,
            },
            "aim" => {
                let n = floats(&cmd, &args, 6)?;
                StationEvent::Aim {
                    origin: Vec3::new(n[0], n[1], n[2]),
                    direction: Vec3::new(n[3], n[4], n[5]),
                }
            }
            "hover" => {
                let n = floats(&cmd, &args, 4)?;
                StationEvent::Hover {
                    point: Vec3::new(n[0], n[1], n[2]),
                    height: n[3],
                }
            }
            "sweep" => {
                let n = floats(&cmd, &args, 7)?;
                StationEvent::Sweep {
                    from: Vec3::new(n[0], n[1], n[2]),
                    to: Vec3::new(n[3], n[4], n[5]),
                    height: n[6],
                    steps: parse_arg(&cmd, &args, 7)?,
                    dt_ms: DEFAULT_TICK_MS,
                }
            }
            "grab" => StationEvent::Grab,
            "press" | "trigger" => StationEvent::TriggerPress,
            "tick" => StationEvent::Tick {
                dt_ms: match args.first() {
                    Some(_) => parse_arg(&cmd, &args, 0)?,
                    None => DEFAULT_TICK_MS,
                },
            },
            "up" | "unpress" => StationEvent::TriggerRelease,
            "release" | "drop" => StationEvent::Release,
            other => {
                return Err(WeldError::Scenario(format!("unknown command '{}'", other)));
            }
        };
        event.validate()?;
        Ok(event)
    }

    /// Reject frames longer than [`MAX_TICK_MS`] and sweeps longer than
    /// [`MAX_SWEEP_STEPS`]
    pub fn validate(&self) -> WeldResult<()> {
        let (dt_ms, steps) = match self {
            StationEvent::Tick { dt_ms } => (*dt_ms, 1),
            StationEvent::Sweep { dt_ms, steps, .. } => (*dt_ms, *steps),
            _ => return Ok(()),
        };
        if dt_ms > MAX_TICK_MS {
            return Err(WeldError::Scenario(format!(
                "frame of {} ms exceeds {} ms",
                dt_ms, MAX_TICK_MS
            )));
        }
        if steps > MAX_SWEEP_STEPS {
            return Err(WeldError::Scenario(format!(
                "sweep of {} steps exceeds {}",
                steps, MAX_SWEEP_STEPS
            )));
        }
        Ok(())
    }
}

fn parse_arg<T: std::str::FromStr>(cmd: &str, args: &[&str], i: usize) -> WeldResult<T> {
    args.get(i)
        .ok_or_else(|| WeldError::Scenario(format!("'{}' is missing argument {}", cmd, i + 1)))?
        .parse()
        .map_err(|_| WeldError::Scenario(format!("'{}' argument {} is not a number", cmd, i + 1)))
}

fn floats(cmd: &str, args: &[&str], n: usize) -> WeldResult<Vec<f32>> {
    (0..n).map(|i| parse_arg(cmd, args, i)).collect()
}

/// Apply one event to a station, returning the outputs of every engine call
/// it made. Rig-only events make none. Oversized frames and sweeps are
/// clamped to [`MAX_TICK_MS`] and [`MAX_SWEEP_STEPS`].
pub fn apply_event(
    session: &mut WeldSession,
    rig: &mut WeldRig,
    event: &StationEvent,
) -> Vec<StepOutput> {
    match event {
        StationEvent::ToggleGas => {
            rig.gas.toggle();
            Vec::new()
        }
        StationEvent::ToggleDisplay => {
            rig.display.toggle();
            Vec::new()
        }
        StationEvent::ClickDial => {
            rig.click_dial();
            Vec::new()
        }
        StationEvent::SetHeat { value } => {
            rig.dial = HeatDial::with_value(*value);
            Vec::new()
        }
        StationEvent::SetKnob { position } => {
            rig.dial.set_normalized(*position);
            Vec::new()
        }
        StationEvent::Aim { origin, direction } => {
            rig.aim(*origin, *direction);
            Vec::new()
        }
        StationEvent::Hover { point, height } => {
            rig.hover(*point, *height);
            Vec::new()
        }
        StationEvent::Sweep { from, to, height, steps, dt_ms } => {
            let steps = (*steps).clamp(1, MAX_SWEEP_STEPS);
            let dt = frame(*dt_ms);
            (0..=steps)
                .map(|i| {
                    rig.hover(from.lerp(*to, i as f32 / steps as f32), *height);
                    session.tick(dt, &*rig)
                })
                .collect()
        }
        StationEvent::Grab => vec![session.grab(rig)],
        StationEvent::TriggerPress => vec![session.trigger_press(rig)],
        StationEvent::Tick { dt_ms } => vec![session.tick(frame(*dt_ms), rig)],
        StationEvent::TriggerRelease => vec![session.trigger_release()],
        StationEvent::Release => vec![session.release()],
    }
}

fn frame(dt_ms: u64) -> Duration {
    Duration::from_millis(dt_ms.min(MAX_TICK_MS))
}

/// Everything a replay produced
#[derive(Debug, Clone, Serialize)]
pub struct ReplayOutcome {
    pub outputs: Vec<StepOutput>,
    pub verdict: Option<Verdict>,
    pub report: Option<PassReport>,
}

/// A scripted pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: WeldConfig,
    pub seam: Seam,
    /// Metal to cast against; a plate under the seam when empty
    #[serde(default)]
    pub plates: Vec<MetalPlate>,
    pub events: Vec<StationEvent>,
}

impl Scenario {
    /// Parse and validate a scenario
    pub fn from_json(json: &str) -> WeldResult<Self> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.config.validate()?;
        if scenario.events.is_empty() {
            return Err(WeldError::Scenario("scenario has no events".to_string()));
        }
        for event in &scenario.events {
            event.validate()?;
        }
        Ok(scenario)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> WeldResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Fresh session and rig for this scenario
    pub fn build(&self) -> (WeldSession, WeldRig) {
        let session = WeldSession::new(self.seam, self.config.clone());
        let plates = if self.plates.is_empty() {
            vec![plate_under(&self.seam)]
        } else {
            self.plates.clone()
        };
        let rig = plates.into_iter().fold(WeldRig::new(), WeldRig::with_plate);
        (session, rig)
    }

    /// Run every event in order
    pub fn replay(&self) -> ReplayOutcome {
        let (mut session, mut rig) = self.build();
        let outputs = self
            .events
            .iter()
            .flat_map(|e| apply_event(&mut session, &mut rig, e))
            .collect();
        ReplayOutcome {
            outputs,
            verdict: session.last_verdict(),
            report: session.last_report().cloned(),
        }
    }
}

/// Horizontal plate centered under the seam, one meter across
pub fn plate_under(seam: &Seam) -> MetalPlate {
    let center = seam.point_at(0.5);
    let half = (seam.length() / 2.0 + 0.5).max(0.5);
    MetalPlate::horizontal(center, half, half, METAL_LAYER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(StationEvent::parse_command("grab").unwrap(), StationEvent::Grab);
        assert_eq!(StationEvent::parse_command("PRESS").unwrap(), StationEvent::TriggerPress);
        assert_eq!(StationEvent::parse_command("up").unwrap(), StationEvent::TriggerRelease);
        assert_eq!(StationEvent::parse_command("release").unwrap(), StationEvent::Release);
        assert_eq!(
            StationEvent::parse_command("tick").unwrap(),
            StationEvent::Tick { dt_ms: DEFAULT_TICK_MS }
        );
        assert_eq!(
            StationEvent::parse_command("tick 500").unwrap(),
            StationEvent::Tick { dt_ms: 500 }
        );
    }

    #[test]
    fn test_parse_vector_commands() {
        assert_eq!(
            StationEvent::parse_command("hover 0.1 0 0 0.03").unwrap(),
            StationEvent::Hover { point: Vec3::new(0.1, 0.0, 0.0), height: 0.03 }
        );
        let sweep = StationEvent::parse_command("sweep -0.1 0 0 0.1 0 0 0.03 40").unwrap();
        assert!(matches!(sweep, StationEvent::Sweep { steps: 40, .. }));
    }

    #[test]
    fn test_parse_errors() {
        assert!(StationEvent::parse_command("").is_err());
        assert!(StationEvent::parse_command("weld harder").is_err());
        assert!(StationEvent::parse_command("heat hot").is_err());
        assert!(StationEvent::parse_command("aim 1 2 3").is_err());
    }

    #[test]
    fn test_parse_rejects_oversized_events() {
        assert!(StationEvent::parse_command("tick 60000").is_ok());
        assert!(matches!(
            StationEvent::parse_command("tick 60001"),
            Err(WeldError::Scenario(_))
        ));
        assert!(StationEvent::parse_command("sweep 0 0 0 0.2 0 0 0.03 4294967295").is_err());
    }

    #[test]
    fn test_knob_command() {
        assert_eq!(
            StationEvent::parse_command("knob 0.45").unwrap(),
            StationEvent::SetKnob { position: 0.45 }
        );
        let seam = Seam::new(Vec3::ZERO, Vec3::new(0.2, 0.0, 0.0));
        let mut session = WeldSession::with_defaults(seam);
        let mut rig = WeldRig::new();
        assert!(apply_event(&mut session, &mut rig, &StationEvent::SetKnob { position: 0.45 }).is_empty());
        assert_eq!(rig.dial.value(), 90);
    }

    #[test]
    fn test_scenario_with_oversized_sweep_rejected() {
        let json = r#"{
            "seam": {"start": [0,0,0], "end": [0.2,0,0]},
            "events": [{"event": "sweep", "from": [0,0,0], "to": [0.2,0,0], "height": 0.03, "steps": 4294967295}]
        }"#;
        assert!(matches!(Scenario::from_json(json), Err(WeldError::Scenario(_))));
    }

    #[test]
    fn test_apply_clamps_huge_frames() {
        let seam = Seam::new(Vec3::ZERO, Vec3::new(0.2, 0.0, 0.0));
        let mut session = WeldSession::with_defaults(seam);
        let mut rig = WeldRig::new().with_plate(plate_under(&seam)).ready(90);
        rig.hover(seam.start, 0.03);
        apply_event(&mut session, &mut rig, &StationEvent::Grab);
        apply_event(&mut session, &mut rig, &StationEvent::TriggerPress);

        let outputs = apply_event(
            &mut session,
            &mut rig,
            &StationEvent::Sweep {
                from: seam.start,
                to: seam.end,
                height: 0.03,
                steps: 1100,
                dt_ms: u64::MAX,
            },
        );
        assert_eq!(outputs.len(), 1101);
        assert_eq!(session.clock(), Duration::from_millis(MAX_TICK_MS) * 1101);

        let outputs = apply_event(&mut session, &mut rig, &StationEvent::Tick { dt_ms: u64::MAX });
        assert_eq!(outputs.len(), 1);
        assert_eq!(session.clock(), Duration::from_millis(MAX_TICK_MS) * 1102);
    }

    #[test]
    fn test_events_roundtrip_tagged_json() {
        let json = r#"[{"event":"toggle_gas"},{"event":"tick","dt_ms":20},{"event":"tick"}]"#;
        let events: Vec<StationEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(
            events,
            vec![
                StationEvent::ToggleGas,
                StationEvent::Tick { dt_ms: 20 },
                StationEvent::Tick { dt_ms: DEFAULT_TICK_MS },
            ]
        );
    }

    #[test]
    fn test_empty_scenario_rejected() {
        let json = r#"{"seam": {"start": [0,0,0], "end": [0.2,0,0]}, "events": []}"#;
        assert!(matches!(Scenario::from_json(json), Err(WeldError::Scenario(_))));
    }

    #[test]
    fn test_default_plate_sits_under_seam() {
        let seam = Seam::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.2, 0.0, 0.0));
        let plate = plate_under(&seam);
        assert!(plate.contains(seam.start));
        assert!(plate.contains(seam.end));
    }

    #[test]
    fn test_sweep_ticks_every_step() {
        let seam = Seam::new(Vec3::ZERO, Vec3::new(0.2, 0.0, 0.0));
        let mut session = WeldSession::with_defaults(seam);
        let mut rig = WeldRig::new().with_plate(plate_under(&seam));
        let outputs = apply_event(
            &mut session,
            &mut rig,
            &StationEvent::Sweep {
                from: seam.start,
                to: seam.end,
                height: 0.03,
                steps: 10,
                dt_ms: 16,
            },
        );
        assert_eq!(outputs.len(), 11);
    }
}
