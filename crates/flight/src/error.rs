//! Error types for tuning validation and per-frame failures.

use thiserror::Error;

/// A tuning value that would break the vehicle invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("tuning value `{name}` must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("tuning value `{name}` must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("tuning value `{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("start height {start} is below the ground clearance {clearance}")]
    StartBelowGround { start: f64, clearance: f64 },
}

/// Outcome of a frame that could not be completed.
///
/// Non-fatal: the driver reports it and schedules the next frame anyway.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// The scene host rejected the vehicle or camera update, or failed to draw.
    #[error("scene host failed: {0}")]
    Scene(String),
    /// The vehicle pose stopped being a finite number.
    #[error("vehicle pose is not finite after frame {frame}")]
    NonFinite { frame: u64 },
}
