//! Core types for Weldpass

mod state;
mod reason;
mod bead;
mod seam;
mod verdict;
mod effect;
mod output;
mod report;
mod config;
mod error;

pub use state::WeldState;
pub use reason::ReasonCode;
pub use bead::{Bead, SizeCategory, ThermalTag, MoltenMaterial};
pub use seam::{Seam, TipPose, RayHit, SurfaceId};
pub use verdict::Verdict;
pub use effect::{Effect, CameraView};
pub use output::StepOutput;
pub use report::{PassReport, CoverageReport};
pub use config::{WeldConfig, SizeBands, HeatBands};
pub use error::{WeldError, WeldResult};
