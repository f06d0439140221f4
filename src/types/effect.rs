//! Effect notifications for the surrounding scene
//!
//! The engine never touches rendering, audio or input directly. Each
//! handled event returns the effects the scene should apply, in order.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::{MoltenMaterial, Verdict};

/// Which camera the headset should render through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraView {
    /// Regular XR camera
    Default,
    /// Close-up welding camera
    Zoom,
}

/// One notification to an external collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Hand the tool back to the interactor that tried to grab it
    ForceRelease,
    /// Show the "locked" popup
    LockRejected,
    /// Hide the "locked" popup
    LockCleared,
    /// Spark particles started or stopped
    SparksChanged { emitting: bool },
    /// Point light and arc loop audio on or off
    WeldEffectsActive { active: bool },
    CameraView { view: CameraView },
    /// Instantiate a bead mark
    BeadPlaced {
        position: Vec3,
        size_scale: f32,
        material: MoltenMaterial,
    },
    /// Show the verdict panel and play its audio
    VerdictReady { verdict: Verdict },
    /// Hide all verdict panels
    VerdictCleared,
}

impl Effect {
    /// Short label for terminal output
    pub fn label(&self) -> String {
        match self {
            Effect::ForceRelease => "force-release".to_string(),
            Effect::LockRejected => "lock-popup on".to_string(),
            Effect::LockCleared => "lock-popup off".to_string(),
            Effect::SparksChanged { emitting } => {
                format!("sparks {}", if *emitting { "on" } else { "off" })
            }
            Effect::WeldEffectsActive { active } => {
                format!("arc light+audio {}", if *active { "on" } else { "off" })
            }
            Effect::CameraView { view } => format!("camera {:?}", view).to_lowercase(),
            Effect::BeadPlaced { position, size_scale, material } => format!(
                "bead at ({:.3}, {:.3}, {:.3}) x{:.1} {:?}",
                position.x, position.y, position.z, size_scale, material
            ),
            Effect::VerdictReady { verdict } => format!("verdict {}", verdict),
            Effect::VerdictCleared => "verdict cleared".to_string(),
        }
    }
}
