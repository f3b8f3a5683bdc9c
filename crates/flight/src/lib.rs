//! Vehicle kinematics and chase camera for the flight simulator.
//!
//! One [`Simulation::frame`] call per displayed frame: read the control
//! snapshot, advance the [`VehicleState`], derive the [`CameraState`], then
//! hand both to the [`SceneHost`] for drawing.

pub mod camera;
pub mod error;
pub mod sim;
pub mod telemetry;
pub mod tuning;
pub mod vehicle;

pub use camera::*;
pub use error::*;
pub use sim::*;
pub use telemetry::*;
pub use tuning::*;
pub use vehicle::*;
