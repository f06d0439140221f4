//! Error type for the fallible edges of the crate
//!
//! The engine itself never fails; these cover configuration, scenario
//! files and external input.

use thiserror::Error;

/// Root error type for weldpass
#[derive(Error, Debug)]
pub enum WeldError {
    /// Configuration value out of range
    #[error("config error: {0}")]
    Config(String),

    /// Scenario script is malformed
    #[error("scenario error: {0}")]
    Scenario(String),

    /// Reading a file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type WeldResult<T> = Result<T, WeldError>;
