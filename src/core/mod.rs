//! Core modules for Weldpass

pub mod geometry;
pub mod classifier;
pub mod coverage;
pub mod scoring;
pub mod timers;
pub mod environment;
pub mod rig;
pub mod session;
pub mod scenario;
pub mod api;

pub use geometry::{closest_point_on_segment, intersect_plate, MetalPlate};
pub use classifier::{classify_size, classify_thermal, size_scale};
pub use coverage::{is_seam_covered, coverage_report, sample_count};
pub use scoring::compute_verdict;
pub use timers::{TimerQueue, TimerAction, TimerId};
pub use environment::WeldEnvironment;
pub use rig::{WeldRig, HeatDial, Toggle};
pub use session::WeldSession;
pub use scenario::{Scenario, StationEvent, ReplayOutcome, apply_event};
pub use api::{create_router, run_server};
