//! Reason codes for state machine outcomes
//! Grouped by the event that produced them

use serde::{Deserialize, Serialize};

/// Reason codes for every handled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // W001: Grab
    // =========================================================================
    /// Grab accepted, tool armed
    W001_GRAB_ACCEPTED,
    /// Grab refused, gas supply is off
    W001_GRAB_LOCKED_GAS,
    /// Grab refused, display switch is off
    W001_GRAB_LOCKED_DISPLAY,

    // =========================================================================
    // W002: Trigger
    // =========================================================================
    /// Trigger pressed over metal, welding started
    W002_WELD_STARTED,
    /// Trigger pressed but the ray found no metal
    W002_NO_SURFACE,
    /// Trigger released, welding stopped
    W002_WELD_STOPPED,

    // =========================================================================
    // W003: Tick
    // =========================================================================
    /// Bead laid this tick
    W003_BEAD_PLACED,
    /// Tip beyond max weld distance
    W003_TOO_FAR,
    /// Hit point off the seam
    W003_OFF_SEAM,
    /// Too close to the previous mark
    W003_SPACING,
    /// Ray found no metal this tick
    W003_NO_HIT,
    /// Not welding, only timers advanced
    W003_IDLE_TICK,

    // =========================================================================
    // W004: Release
    // =========================================================================
    /// Tool put down, pass graded
    W004_PASS_GRADED,

    // =========================================================================
    // W005: Ignored
    // =========================================================================
    /// Event does not apply in the current state
    W005_IGNORED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::W001_GRAB_ACCEPTED => "W001_GRAB_ACCEPTED",
            Self::W001_GRAB_LOCKED_GAS => "W001_GRAB_LOCKED_GAS",
            Self::W001_GRAB_LOCKED_DISPLAY => "W001_GRAB_LOCKED_DISPLAY",
            Self::W002_WELD_STARTED => "W002_WELD_STARTED",
            Self::W002_NO_SURFACE => "W002_NO_SURFACE",
            Self::W002_WELD_STOPPED => "W002_WELD_STOPPED",
            Self::W003_BEAD_PLACED => "W003_BEAD_PLACED",
            Self::W003_TOO_FAR => "W003_TOO_FAR",
            Self::W003_OFF_SEAM => "W003_OFF_SEAM",
            Self::W003_SPACING => "W003_SPACING",
            Self::W003_NO_HIT => "W003_NO_HIT",
            Self::W003_IDLE_TICK => "W003_IDLE_TICK",
            Self::W004_PASS_GRADED => "W004_PASS_GRADED",
            Self::W005_IGNORED => "W005_IGNORED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::W001_GRAB_ACCEPTED => "Tool armed",
            Self::W001_GRAB_LOCKED_GAS => "Locked - gas supply is off",
            Self::W001_GRAB_LOCKED_DISPLAY => "Locked - display is off",
            Self::W002_WELD_STARTED => "Arc struck",
            Self::W002_NO_SURFACE => "No metal under the tip",
            Self::W002_WELD_STOPPED => "Arc stopped",
            Self::W003_BEAD_PLACED => "Bead laid",
            Self::W003_TOO_FAR => "Tip too far from the metal",
            Self::W003_OFF_SEAM => "Tip off the seam",
            Self::W003_SPACING => "Waiting for travel",
            Self::W003_NO_HIT => "No metal in reach",
            Self::W003_IDLE_TICK => "Not welding",
            Self::W004_PASS_GRADED => "Pass graded",
            Self::W005_IGNORED => "Event ignored",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
