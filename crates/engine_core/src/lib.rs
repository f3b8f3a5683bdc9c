//! Core engine types shared by the flight simulator crates.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Node transforms handed to the renderer
//! - Frame counting for the display loop

pub mod time;
pub mod transform;

pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{DQuat, DVec3, Mat4, Quat, Vec3};
