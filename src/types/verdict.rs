//! Final grade of a weld pass

use serde::{Deserialize, Serialize};

/// Three-tier quality verdict, recomputed on every release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Excellent,
    Good,
    Bad,
}

impl Verdict {
    /// Get emoji for verdict
    pub fn emoji(&self) -> &'static str {
        match self {
            Verdict::Excellent => "🏆",
            Verdict::Good => "👍",
            Verdict::Bad => "✗",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Verdict::Excellent => "EXCELLENT",
            Verdict::Good => "GOOD",
            Verdict::Bad => "BAD",
        };
        write!(f, "{}", name)
    }
}
