//! Integration tests for scenario replay
//!
//! Tests the full path: JSON scenario → replay → outputs + report

use pretty_assertions::assert_eq;

use weldpass::core::Scenario;
use weldpass::types::{Effect, ReasonCode, Verdict, WeldError, WeldState};

const EXCELLENT: &str = include_str!("../demos/excellent_pass.json");
const LOCKED_OUT: &str = include_str!("../demos/locked_out.json");
const OVERHEATED: &str = include_str!("../demos/overheated_thin.json");

#[test]
fn test_excellent_demo() {
    let outcome = Scenario::from_json(EXCELLENT).unwrap().replay();

    assert_eq!(outcome.verdict, Some(Verdict::Excellent));
    let last = outcome.outputs.last().unwrap();
    assert_eq!(last.effects, vec![Effect::VerdictReady { verdict: Verdict::Excellent }]);
    assert_eq!(last.state, WeldState::Idle);

    let placed = outcome.outputs.iter().filter(|o| o.placed_bead()).count();
    assert_eq!(placed, outcome.report.unwrap().bead_count);
}

#[test]
fn test_locked_out_demo() {
    let outcome = Scenario::from_json(LOCKED_OUT).unwrap().replay();

    let reasons: Vec<ReasonCode> = outcome.outputs.iter().map(|o| o.reason).collect();
    assert_eq!(
        reasons,
        vec![
            ReasonCode::W001_GRAB_LOCKED_GAS,
            ReasonCode::W003_IDLE_TICK,
            ReasonCode::W003_IDLE_TICK,
            ReasonCode::W003_IDLE_TICK,
            ReasonCode::W001_GRAB_ACCEPTED,
        ]
    );
    // Popup goes away after two seconds, once
    assert!(outcome.outputs[1].effects.is_empty());
    assert_eq!(outcome.outputs[2].effects, vec![Effect::LockCleared]);
    assert!(outcome.outputs[3].effects.is_empty());
    assert!(outcome.outputs[4].effects.is_empty());
    assert_eq!(outcome.verdict, None);
}

#[test]
fn test_overheated_demo() {
    let scenario = Scenario::from_json(OVERHEATED).unwrap();
    assert_eq!(scenario.config.verdict_hold_secs, 5.0);

    let outcome = scenario.replay();
    assert_eq!(outcome.verdict, Some(Verdict::Bad));
    let report = outcome.report.unwrap();
    assert_eq!(report.thermal_optimal_beads, 0);
    assert_eq!(report.good_beads, 0);
}

#[test]
fn test_invalid_config_rejected() {
    let json = r#"{
        "config": { "size": { "min": 0.05, "max": 0.01 } },
        "seam": { "start": [0, 0, 0], "end": [0.2, 0, 0] },
        "events": [{ "event": "grab" }]
    }"#;
    assert!(matches!(Scenario::from_json(json), Err(WeldError::Config(_))));
}

#[test]
fn test_unknown_event_rejected() {
    let json = r#"{
        "seam": { "start": [0, 0, 0], "end": [0.2, 0, 0] },
        "events": [{ "event": "weld_harder" }]
    }"#;
    assert!(matches!(Scenario::from_json(json), Err(WeldError::Json(_))));
}

#[test]
fn test_replay_is_deterministic() {
    let scenario = Scenario::from_json(EXCELLENT).unwrap();
    let a = scenario.replay();
    let b = scenario.replay();

    let strip = |o: &weldpass::core::ReplayOutcome| {
        o.outputs
            .iter()
            .map(|s| (s.reason, s.effects.clone(), s.bead_count))
            .collect::<Vec<_>>()
    };
    assert_eq!(strip(&a), strip(&b));
}
