//! Per-frame driver: advance the vehicle, derive the camera, hand off to the scene.

use crate::{
    camera::CameraState,
    error::{FrameError, TuningError},
    telemetry::Telemetry,
    tuning::FlightTuning,
    vehicle::VehicleState,
};
use input::ControlState;
use std::fmt;

/// The scene graph and renderer the simulation writes into.
///
/// The simulation is the only writer of the vehicle and camera nodes; the
/// host only draws them.
pub trait SceneHost {
    type Error: fmt::Display;

    /// Copy the vehicle pose onto the vehicle node.
    fn place_vehicle(&mut self, vehicle: &VehicleState) -> Result<(), Self::Error>;

    /// Move the camera and point it at the look target.
    fn place_camera(&mut self, camera: &CameraState) -> Result<(), Self::Error>;

    /// Refresh the text overlay.
    fn show_telemetry(&mut self, telemetry: &Telemetry);

    /// Draw the frame.
    fn render(&mut self) -> Result<(), Self::Error>;
}

/// What a completed frame produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// 1-based index of the frame.
    pub frame: u64,
    pub camera: CameraState,
    pub telemetry: Telemetry,
}

/// Owns the vehicle for the whole session and advances it once per frame.
#[derive(Debug, Clone)]
pub struct Simulation {
    tuning: FlightTuning,
    vehicle: VehicleState,
    camera: CameraState,
    frame: u64,
}

impl Simulation {
    /// Start a session with the vehicle at its spawn point.
    pub fn new(tuning: FlightTuning) -> Result<Self, TuningError> {
        let vehicle = VehicleState::spawn(&tuning);
        Self::with_vehicle(tuning, vehicle)
    }

    /// Start a session from an explicit vehicle state.
    pub fn with_vehicle(tuning: FlightTuning, vehicle: VehicleState) -> Result<Self, TuningError> {
        tuning.validate()?;
        let camera = CameraState::chase(&vehicle, &tuning);
        log::debug!(
            "simulation start at {:?}, heading {:.3}",
            vehicle.position,
            vehicle.yaw
        );
        Ok(Self {
            tuning,
            vehicle,
            camera,
            frame: 0,
        })
    }

    /// Advance the vehicle one call and recompute the camera. Never fails.
    pub fn step(&mut self, controls: &ControlState) -> FrameReport {
        self.frame += 1;
        self.vehicle.update(controls, &self.tuning);
        self.camera = CameraState::chase(&self.vehicle, &self.tuning);
        FrameReport {
            frame: self.frame,
            camera: self.camera,
            telemetry: Telemetry::from_vehicle(&self.vehicle),
        }
    }

    /// One full frame: step, write the vehicle and camera into the host, then render.
    ///
    /// An error leaves the simulation usable; the caller decides whether to keep
    /// scheduling frames.
    pub fn frame<H: SceneHost>(
        &mut self,
        controls: &ControlState,
        host: &mut H,
    ) -> Result<FrameReport, FrameError> {
        let report = self.step(controls);
        if !self.vehicle.is_finite() {
            return Err(FrameError::NonFinite { frame: report.frame });
        }

        host.place_vehicle(&self.vehicle).map_err(scene_error)?;
        host.place_camera(&report.camera).map_err(scene_error)?;
        host.show_telemetry(&report.telemetry);
        host.render().map_err(scene_error)?;
        Ok(report)
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn tuning(&self) -> &FlightTuning {
        &self.tuning
    }

    /// Frames stepped so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}

fn scene_error(e: impl fmt::Display) -> FrameError {
    FrameError::Scene(e.to_string())
}
