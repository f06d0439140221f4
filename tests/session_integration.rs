//! Integration tests for the weld session
//!
//! Tests the full path: rig → WeldSession → step outputs → graded pass

use glam::Vec3;
use pretty_assertions::assert_eq;
use std::time::Duration;

use weldpass::core::scenario::plate_under;
use weldpass::core::{apply_event, StationEvent, WeldRig, WeldSession};
use weldpass::types::{Effect, ReasonCode, Seam, StepOutput, Verdict, WeldState};

fn seam() -> Seam {
    Seam::new(Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.1, 0.0, 0.0))
}

fn station(heat: i32) -> (WeldSession, WeldRig) {
    let seam = seam();
    let mut rig = WeldRig::new().with_plate(plate_under(&seam)).ready(heat);
    rig.hover(seam.start, 0.03);
    (WeldSession::with_defaults(seam), rig)
}

fn sweep(from: f32, to: f32, height: f32) -> StationEvent {
    StationEvent::Sweep {
        from: Vec3::new(from, 0.0, 0.0),
        to: Vec3::new(to, 0.0, 0.0),
        height,
        steps: 40,
        dt_ms: 16,
    }
}

fn run(session: &mut WeldSession, rig: &mut WeldRig, events: &[StationEvent]) -> Vec<StepOutput> {
    events
        .iter()
        .flat_map(|e| apply_event(session, rig, e))
        .collect()
}

fn all_effects(outputs: &[StepOutput]) -> Vec<Effect> {
    outputs.iter().flat_map(|o| o.effects.clone()).collect()
}

/// Grab, strike, sweep, put down, wait for the reveal
fn graded_pass(session: &mut WeldSession, rig: &mut WeldRig, sweeps: &[StationEvent]) -> Vec<StepOutput> {
    let mut events = vec![StationEvent::Grab, StationEvent::TriggerPress];
    events.extend_from_slice(sweeps);
    events.push(StationEvent::TriggerRelease);
    events.push(StationEvent::Release);
    events.push(StationEvent::Tick { dt_ms: 600 });
    run(session, rig, &events)
}

/// Full pass at optimal heat and distance along the whole seam
#[test]
fn test_full_excellent_pass() {
    let (mut session, mut rig) = station(90);
    let outputs = graded_pass(&mut session, &mut rig, &[sweep(-0.1, 0.1, 0.03)]);

    assert_eq!(session.last_verdict(), Some(Verdict::Excellent));
    assert!(all_effects(&outputs).contains(&Effect::VerdictReady { verdict: Verdict::Excellent }));

    let report = session.last_report().unwrap();
    assert!(report.coverage.covered);
    assert_eq!(report.bead_count, report.good_beads);
    assert_eq!(report.bead_count, report.thermal_optimal_beads);
    assert!(report.bead_count >= 10, "beads: {}", report.bead_count);
}

/// Beads keep their spacing along the sweep
#[test]
fn test_beads_respect_spacing() {
    let (mut session, mut rig) = station(90);
    run(
        &mut session,
        &mut rig,
        &[StationEvent::Grab, StationEvent::TriggerPress, sweep(-0.1, 0.1, 0.03)],
    );

    let beads = session.beads();
    for pair in beads.windows(2) {
        assert!(pair[0].position.distance(pair[1].position) > 0.015);
    }
}

/// First half at optimal heat, second half overheated
#[test]
fn test_mixed_pass_is_good() {
    let (mut session, mut rig) = station(90);
    let sweeps = [
        sweep(-0.1, 0.0, 0.03),
        StationEvent::SetHeat { value: 130 },
        sweep(0.0, 0.1, 0.03),
    ];
    graded_pass(&mut session, &mut rig, &sweeps);

    assert_eq!(session.last_verdict(), Some(Verdict::Good));
    let report = session.last_report().unwrap();
    assert!(report.thermal_optimal_beads > 0);
    assert!(report.thermal_optimal_beads < report.bead_count);
}

/// Overheated and too far for a good bead everywhere
#[test]
fn test_overheated_thin_pass_is_bad() {
    let (mut session, mut rig) = station(130);
    rig.hover(seam().start, 0.055);
    graded_pass(&mut session, &mut rig, &[sweep(-0.1, 0.1, 0.055)]);

    let report = session.last_report().unwrap();
    assert!(report.coverage.covered);
    assert_eq!(report.bead_count, report.thin_beads);
    assert_eq!(session.last_verdict(), Some(Verdict::Bad));
}

/// Perfect beads over half the seam still fail
#[test]
fn test_half_covered_pass_is_bad() {
    let (mut session, mut rig) = station(90);
    graded_pass(&mut session, &mut rig, &[sweep(-0.1, 0.0, 0.03)]);

    let report = session.last_report().unwrap();
    assert!(!report.coverage.covered);
    assert!(report.bead_count > 0);
    assert_eq!(session.last_verdict(), Some(Verdict::Bad));
}

/// Gas off: one rejection, one popup dismissal two seconds later
#[test]
fn test_locked_grab_clears_once() {
    let (mut session, mut rig) = station(90);
    rig.gas.toggle();

    let mut outputs = vec![session.grab(&rig)];
    for _ in 0..150 {
        outputs.push(session.tick(Duration::from_millis(20), &rig));
    }

    let effects = all_effects(&outputs);
    let rejected = effects.iter().filter(|e| **e == Effect::LockRejected).count();
    let cleared = effects.iter().filter(|e| **e == Effect::LockCleared).count();
    assert_eq!(rejected, 1);
    assert_eq!(cleared, 1);
    assert_eq!(session.state(), WeldState::Idle);
    assert_eq!(session.last_verdict(), None);

    let cleared_at = outputs
        .iter()
        .find(|o| o.effects.contains(&Effect::LockCleared))
        .map(|o| o.clock_secs)
        .unwrap();
    assert!((cleared_at - 2.0).abs() < 1e-9, "cleared at {}", cleared_at);
}

/// Display switch off locks the tool just like the gas
#[test]
fn test_display_off_locks_grab() {
    let (mut session, mut rig) = station(90);
    rig.display.toggle();
    let out = session.grab(&rig);
    assert_eq!(out.reason, ReasonCode::W001_GRAB_LOCKED_DISPLAY);
    assert!(out.effects.contains(&Effect::ForceRelease));
}

/// Second trigger release in a row changes nothing
#[test]
fn test_double_trigger_release() {
    let (mut session, mut rig) = station(90);
    run(
        &mut session,
        &mut rig,
        &[StationEvent::Grab, StationEvent::TriggerPress, StationEvent::Tick { dt_ms: 16 }],
    );

    let first = session.trigger_release();
    let beads = session.beads().len();
    let second = session.trigger_release();

    assert_eq!(first.reason, ReasonCode::W002_WELD_STOPPED);
    assert_eq!(second.reason, ReasonCode::W005_IGNORED);
    assert!(second.effects.is_empty());
    assert_eq!(session.state(), WeldState::Armed);
    assert_eq!(session.beads().len(), beads);
}

/// Releasing mid-weld grades the pass without a trigger release first
#[test]
fn test_release_while_welding_grades() {
    let (mut session, mut rig) = station(90);
    run(
        &mut session,
        &mut rig,
        &[StationEvent::Grab, StationEvent::TriggerPress, sweep(-0.1, 0.1, 0.03)],
    );
    let out = session.release();

    assert_eq!(out.reason, ReasonCode::W004_PASS_GRADED);
    assert_eq!(out.state, WeldState::Idle);
    assert!(!session.weld_effects_active());
    assert_eq!(session.last_verdict(), Some(Verdict::Excellent));
}

/// Heat dial only moves while the display is on
#[test]
fn test_dial_needs_display() {
    let (mut session, mut rig) = station(90);
    rig.display.toggle();
    run(&mut session, &mut rig, &[StationEvent::ClickDial]);
    assert_eq!(rig.dial.value(), 90);

    run(&mut session, &mut rig, &[StationEvent::ToggleDisplay, StationEvent::ClickDial]);
    assert_eq!(rig.dial.value(), 95);
}
