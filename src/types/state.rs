//! Weld station state definitions

use serde::{Deserialize, Serialize};

/// The three states of the welding gun interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeldState {
    /// Tool is resting, nobody holds it
    Idle,
    /// Tool is held, trigger not pulled (or no surface under the tip)
    Armed,
    /// Trigger held over metal, beads can be laid
    Welding,
}

impl WeldState {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            WeldState::Idle => "\x1b[90m",    // Gray
            WeldState::Armed => "\x1b[33m",   // Yellow
            WeldState::Welding => "\x1b[36m", // Cyan
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            WeldState::Idle => "⏸",
            WeldState::Armed => "🔧",
            WeldState::Welding => "🔥",
        }
    }
}

impl std::fmt::Display for WeldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WeldState::Idle => "IDLE",
            WeldState::Armed => "ARMED",
            WeldState::Welding => "WELDING",
        };
        write!(f, "{}", name)
    }
}
