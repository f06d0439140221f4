//! Weld Session: state machine for one welding gun
//!
//! State transitions:
//! - IDLE → ARMED: grab with gas on AND display on
//! - IDLE → IDLE: grab while locked out (forced release + lock popup)
//! - ARMED → WELDING: trigger pressed with metal under the tip
//! - WELDING → ARMED: trigger released
//! - ARMED/WELDING → IDLE: tool released, pass graded
//!
//! Every handler returns a [`StepOutput`] carrying the effects the scene has
//! to apply. Deferred UI (verdict reveal and hold, lock popup dismissal)
//! runs off the internal timer queue, advanced by [`WeldSession::tick`].

use std::time::Duration;

use glam::Vec3;
use tracing::{debug, info, warn};

use crate::core::classifier::{classify_size, classify_thermal, size_scale};
use crate::core::coverage::coverage_report;
use crate::core::geometry::closest_point_on_segment;
use crate::core::scoring::compute_verdict;
use crate::core::timers::{TimerAction, TimerId, TimerQueue};
use crate::core::WeldEnvironment;
use crate::types::{
    Bead, CameraView, Effect, PassReport, RayHit, ReasonCode, Seam, StepOutput, Verdict,
    WeldConfig, WeldState,
};

/// Weld session engine for one gun and one seam
#[derive(Debug)]
pub struct WeldSession {
    config: WeldConfig,
    /// Read-only for the life of the session
    seam: Seam,
    state: WeldState,
    trigger_held: bool,
    last_mark_position: Option<Vec3>,
    has_placed_mark: bool,
    /// Append-only while welding, cleared on weld start
    beads: Vec<Bead>,
    elapsed_weld: Duration,
    elapsed_optimal: Duration,
    /// Sum of all ticks seen
    clock: Duration,
    sparks_emitting: bool,
    effects_active: bool,
    camera: CameraView,
    /// Pending auto-dismiss of a visible lock popup
    lock_notice: Option<TimerId>,
    verdict_visible: bool,
    last_verdict: Option<Verdict>,
    last_report: Option<PassReport>,
    timers: TimerQueue,
    event_count: u64,
}

impl WeldSession {
    /// Create new session over `seam`
    pub fn new(seam: Seam, config: WeldConfig) -> Self {
        Self {
            config,
            seam,
            state: WeldState::Idle,
            trigger_held: false,
            last_mark_position: None,
            has_placed_mark: false,
            beads: Vec::new(),
            elapsed_weld: Duration::ZERO,
            elapsed_optimal: Duration::ZERO,
            clock: Duration::ZERO,
            sparks_emitting: false,
            effects_active: false,
            camera: CameraView::Default,
            lock_notice: None,
            verdict_visible: false,
            last_verdict: None,
            last_report: None,
            timers: TimerQueue::new(),
            event_count: 0,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(seam: Seam) -> Self {
        Self::new(seam, WeldConfig::default())
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// The tool was grabbed.
    ///
    /// Gas and display are sampled here. When either is off the grab is
    /// undone before this returns: the tool is handed back, the lock popup
    /// goes up and its dismissal is scheduled.
    pub fn grab(&mut self, env: &dyn WeldEnvironment) -> StepOutput {
        self.event_count += 1;
        if self.state != WeldState::Idle {
            return self.output(ReasonCode::W005_IGNORED, Vec::new());
        }

        let mut effects = Vec::new();
        self.hide_verdict(&mut effects);

        let locked = if !env.gas_supply_enabled() {
            Some(ReasonCode::W001_GRAB_LOCKED_GAS)
        } else if !env.display_lock_enabled() {
            Some(ReasonCode::W001_GRAB_LOCKED_DISPLAY)
        } else {
            None
        };

        if let Some(reason) = locked {
            warn!(reason = reason.code(), "grab rejected, tool locked");
            effects.push(Effect::ForceRelease);
            effects.push(Effect::LockRejected);
            if let Some(id) = self.lock_notice.take() {
                self.timers.cancel(id);
            }
            let due = self.clock.saturating_add(secs(self.config.lock_notice_secs));
            self.lock_notice = Some(self.timers.schedule_at(due, TimerAction::ClearLockNotice));
            return self.output(reason, effects);
        }

        if let Some(id) = self.lock_notice.take() {
            self.timers.cancel(id);
            effects.push(Effect::LockCleared);
        }
        self.state = WeldState::Armed;
        info!("tool grabbed, armed");
        self.output(ReasonCode::W001_GRAB_ACCEPTED, effects)
    }

    /// The trigger was pulled.
    ///
    /// Only strikes an arc when the tip ray finds metal within reach;
    /// otherwise nothing changes.
    pub fn trigger_press(&mut self, env: &dyn WeldEnvironment) -> StepOutput {
        self.event_count += 1;
        if self.state != WeldState::Armed {
            return self.output(ReasonCode::W005_IGNORED, Vec::new());
        }

        let Some(hit) = env.raycast_from_tip(self.config.ray_distance, self.config.layer_mask)
        else {
            debug!("trigger pressed with no metal in reach");
            return self.output(ReasonCode::W002_NO_SURFACE, Vec::new());
        };

        self.state = WeldState::Welding;
        self.trigger_held = true;
        self.reset_pass(hit.point);

        let mut effects = Vec::new();
        self.set_camera(CameraView::Zoom, &mut effects);
        info!(surface = hit.surface, "arc struck");
        self.output(ReasonCode::W002_WELD_STARTED, effects)
    }

    /// One frame of `dt`.
    ///
    /// Always advances the clock and fires due timers. While welding with the
    /// trigger held it also accumulates weld time, drives sparks and the arc
    /// effects, and tries to lay a bead.
    pub fn tick(&mut self, dt: Duration, env: &dyn WeldEnvironment) -> StepOutput {
        self.event_count += 1;
        self.clock = self.clock.saturating_add(dt);

        let mut effects = Vec::new();
        self.fire_timers(&mut effects);

        if !(self.state == WeldState::Welding && self.trigger_held) {
            return self.output(ReasonCode::W003_IDLE_TICK, effects);
        }

        self.elapsed_weld = self.elapsed_weld.saturating_add(dt);
        self.elapsed_optimal = self.elapsed_optimal.saturating_add(dt);

        let hit = env.raycast_from_tip(self.config.ray_distance, self.config.layer_mask);
        let sparks = hit.is_some_and(|h| h.distance < self.config.spark_distance);
        self.set_sparks(sparks, &mut effects);

        let reason = match hit {
            Some(hit) => self.try_place_bead(hit, env, &mut effects),
            None => ReasonCode::W003_NO_HIT,
        };

        self.set_weld_effects(true, &mut effects);
        self.output(reason, effects)
    }

    /// The trigger was let go. A second call in a row does nothing.
    pub fn trigger_release(&mut self) -> StepOutput {
        self.event_count += 1;
        if self.state != WeldState::Welding {
            return self.output(ReasonCode::W005_IGNORED, Vec::new());
        }

        self.state = WeldState::Armed;
        self.trigger_held = false;
        self.has_placed_mark = false;

        let mut effects = Vec::new();
        self.stop_weld_effects(&mut effects);
        info!(beads = self.beads.len(), "arc stopped");
        self.output(ReasonCode::W002_WELD_STOPPED, effects)
    }

    /// The tool was put down: grade the pass and schedule the verdict reveal.
    pub fn release(&mut self) -> StepOutput {
        self.event_count += 1;
        if self.state == WeldState::Idle {
            return self.output(ReasonCode::W005_IGNORED, Vec::new());
        }

        self.state = WeldState::Idle;
        self.trigger_held = false;

        let mut effects = Vec::new();
        self.set_camera(CameraView::Default, &mut effects);
        self.stop_weld_effects(&mut effects);

        let report = self.grade();
        self.has_placed_mark = false;

        self.timers
            .cancel_where(|a| matches!(a, TimerAction::RevealVerdict(_) | TimerAction::ClearVerdict));
        let due = self.clock.saturating_add(secs(self.config.verdict_reveal_delay_secs));
        self.timers
            .schedule_at(due, TimerAction::RevealVerdict(report.verdict));

        info!(
            verdict = %report.verdict,
            beads = report.bead_count,
            covered = report.coverage.covered,
            "pass graded"
        );
        self.last_verdict = Some(report.verdict);
        self.last_report = Some(report);
        self.output(ReasonCode::W004_PASS_GRADED, effects)
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    /// Clear the bead list and timers for a fresh pass
    fn reset_pass(&mut self, start: Vec3) {
        self.beads.clear();
        self.elapsed_weld = Duration::ZERO;
        self.elapsed_optimal = Duration::ZERO;
        self.last_mark_position = Some(start);
        self.has_placed_mark = false;
    }

    /// Bead placement for the current ray hit
    fn try_place_bead(
        &mut self,
        hit: RayHit,
        env: &dyn WeldEnvironment,
        effects: &mut Vec<Effect>,
    ) -> ReasonCode {
        if hit.distance > self.config.size.max {
            return ReasonCode::W003_TOO_FAR;
        }

        let (_, off_seam) = closest_point_on_segment(hit.point, self.seam.start, self.seam.end);
        if off_seam > self.seam.threshold {
            return ReasonCode::W003_OFF_SEAM;
        }

        let far_enough = match self.last_mark_position {
            Some(last) => last.distance(hit.point) > self.config.weld_mark_spacing,
            None => true,
        };
        if self.has_placed_mark && !far_enough {
            return ReasonCode::W003_SPACING;
        }

        let size = classify_size(hit.distance, &self.config.size);
        let heat = env.current_heat_reading();
        let thermal = classify_thermal(heat, &self.config.heat);
        debug!(
            heat,
            distance = hit.distance,
            size = %size,
            thermal = %thermal,
            "bead laid"
        );

        self.beads
            .push(Bead::new(hit.point, size, thermal, heat, hit.distance));
        self.last_mark_position = Some(hit.point);
        self.has_placed_mark = true;

        effects.push(Effect::BeadPlaced {
            position: hit.point,
            size_scale: size_scale(size, &self.config.size),
            material: thermal.material(),
        });
        ReasonCode::W003_BEAD_PLACED
    }

    /// Coverage and verdict for the beads of the pass just ended.
    /// A pass without beads grades as bad.
    fn grade(&self) -> PassReport {
        let positions: Vec<Vec3> = self.beads.iter().map(|b| b.position).collect();
        let coverage = coverage_report(
            &self.seam,
            &positions,
            self.config.coverage_sample_spacing,
            self.config.coverage_tolerance,
        );
        let verdict = compute_verdict(&self.beads, coverage.covered).unwrap_or(Verdict::Bad);
        PassReport::new(
            verdict,
            &self.beads,
            coverage,
            self.elapsed_weld.as_secs_f64(),
            self.elapsed_optimal.as_secs_f64(),
        )
    }

    /// Apply every timer due at the current clock
    fn fire_timers(&mut self, effects: &mut Vec<Effect>) {
        // A fired reveal schedules its clear, which may already be due
        loop {
            let fired = self.timers.pop_due(self.clock);
            if fired.is_empty() {
                break;
            }
            for timer in fired {
                match timer.action {
                    TimerAction::ClearLockNotice => {
                        self.lock_notice = None;
                        effects.push(Effect::LockCleared);
                    }
                    TimerAction::RevealVerdict(verdict) => {
                        self.verdict_visible = true;
                        effects.push(Effect::VerdictReady { verdict });
                        let due = timer.due.saturating_add(secs(self.config.verdict_hold_secs));
                        self.timers.schedule_at(due, TimerAction::ClearVerdict);
                    }
                    TimerAction::ClearVerdict => {
                        self.verdict_visible = false;
                        effects.push(Effect::VerdictCleared);
                    }
                }
            }
        }
    }

    /// Drop any pending or visible verdict panel
    fn hide_verdict(&mut self, effects: &mut Vec<Effect>) {
        self.timers
            .cancel_where(|a| matches!(a, TimerAction::RevealVerdict(_) | TimerAction::ClearVerdict));
        if self.verdict_visible {
            self.verdict_visible = false;
            effects.push(Effect::VerdictCleared);
        }
    }

    fn set_sparks(&mut self, emitting: bool, effects: &mut Vec<Effect>) {
        if self.sparks_emitting != emitting {
            self.sparks_emitting = emitting;
            effects.push(Effect::SparksChanged { emitting });
        }
    }

    fn set_weld_effects(&mut self, active: bool, effects: &mut Vec<Effect>) {
        if self.effects_active != active {
            self.effects_active = active;
            effects.push(Effect::WeldEffectsActive { active });
        }
    }

    fn stop_weld_effects(&mut self, effects: &mut Vec<Effect>) {
        self.set_sparks(false, effects);
        self.set_weld_effects(false, effects);
    }

    fn set_camera(&mut self, view: CameraView, effects: &mut Vec<Effect>) {
        if self.camera != view {
            self.camera = view;
            effects.push(Effect::CameraView { view });
        }
    }

    fn output(&self, reason: ReasonCode, effects: Vec<Effect>) -> StepOutput {
        StepOutput::new(
            self.state,
            reason,
            effects,
            self.beads.len(),
            self.clock.as_secs_f64(),
        )
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Get current state
    pub fn state(&self) -> WeldState {
        self.state
    }

    pub fn seam(&self) -> &Seam {
        &self.seam
    }

    pub fn config(&self) -> &WeldConfig {
        &self.config
    }

    /// Beads of the current (or just finished) pass
    pub fn beads(&self) -> &[Bead] {
        &self.beads
    }

    pub fn trigger_held(&self) -> bool {
        self.trigger_held
    }

    pub fn has_placed_mark(&self) -> bool {
        self.has_placed_mark
    }

    pub fn last_mark_position(&self) -> Option<Vec3> {
        self.last_mark_position
    }

    pub fn elapsed_weld_time(&self) -> Duration {
        self.elapsed_weld
    }

    pub fn elapsed_optimal_time(&self) -> Duration {
        self.elapsed_optimal
    }

    /// Engine clock (sum of ticks)
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn sparks_emitting(&self) -> bool {
        self.sparks_emitting
    }

    pub fn weld_effects_active(&self) -> bool {
        self.effects_active
    }

    pub fn camera(&self) -> CameraView {
        self.camera
    }

    pub fn lock_notice_visible(&self) -> bool {
        self.lock_notice.is_some()
    }

    pub fn verdict_visible(&self) -> bool {
        self.verdict_visible
    }

    /// Verdict of the most recent release
    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict
    }

    /// Report of the most recent release
    pub fn last_report(&self) -> Option<&PassReport> {
        self.last_report.as_ref()
    }

    /// Number of events handled
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Reset session to initial state, keeping seam and config
    pub fn reset(&mut self) {
        *self = Self::new(self.seam, self.config.clone());
    }
}

/// Config seconds to a duration. Values too large for a `Duration` saturate,
/// negative or NaN collapse to zero.
fn secs(value: f64) -> Duration {
    match Duration::try_from_secs_f64(value) {
        Ok(d) => d,
        Err(_) if value > 0.0 => Duration::MAX,
        Err(_) => Duration::ZERO,
    }
}

// =============================================================================
// TESTS
// =============================================================================
