//! Output structures for each handled event

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::types::{Effect, ReasonCode, WeldState};

/// Result of one event fed into the weld session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutput {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    /// State after the event
    pub state: WeldState,
    /// Why the engine did what it did
    pub reason: ReasonCode,
    /// Effects to apply, in emission order
    pub effects: Vec<Effect>,
    /// Beads laid so far in the current pass
    pub bead_count: usize,
    /// Engine clock (seconds of ticks seen)
    pub clock_secs: f64,
}

impl StepOutput {
    /// Create new output
    pub fn new(
        state: WeldState,
        reason: ReasonCode,
        effects: Vec<Effect>,
        bead_count: usize,
        clock_secs: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            state,
            reason,
            effects,
            bead_count,
            clock_secs,
        }
    }

    /// Did this event lay a bead?
    pub fn placed_bead(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, Effect::BeadPlaced { .. }))
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.state.color_code();
        let reset = WeldState::color_reset();
        let emoji = self.state.emoji();

        format!(
            "{}{} t={:.2}s | state={} | beads={} | {}{}",
            color,
            emoji,
            self.clock_secs,
            self.state,
            self.bead_count,
            self.reason.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "t={:.2}s | state={} | beads={} | reason={}",
            self.clock_secs,
            self.state,
            self.bead_count,
            self.reason.code()
        )
    }
}
