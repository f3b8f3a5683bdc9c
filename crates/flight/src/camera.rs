//! Chase camera derived from the vehicle pose.

use crate::{tuning::FlightTuning, vehicle::VehicleState};
use glam::DVec3;

/// Camera placement for one frame. Recomputed from the vehicle every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Eye position.
    pub position: DVec3,
    /// Point the camera looks at (world up is +Y).
    pub target: DVec3,
}

impl CameraState {
    /// Trail the vehicle: both the chase offset and the look-ahead point are
    /// expressed in the vehicle frame and rotated into world space.
    pub fn chase(vehicle: &VehicleState, tuning: &FlightTuning) -> Self {
        let orientation = vehicle.orientation();
        Self {
            position: vehicle.position + orientation * tuning.camera_offset(),
            target: vehicle.position + orientation * tuning.look_ahead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trails_level_vehicle_at_origin() {
        let t = FlightTuning::standard();
        let v = VehicleState::at_rest(DVec3::ZERO, 0.0);
        let cam = CameraState::chase(&v, &t);
        assert_eq!(cam.position, DVec3::new(0.0, t.camera_height, t.camera_distance));
        assert_eq!(cam.target, t.look_ahead);
    }

    #[test]
    fn offset_rotates_with_heading() {
        let t = FlightTuning::standard();
        let v = VehicleState::at_rest(DVec3::new(10.0, 100.0, 0.0), std::f64::consts::FRAC_PI_2);
        let cam = CameraState::chase(&v, &t);
        // Quarter turn left: behind the vehicle is now +X.
        assert!((cam.position - DVec3::new(40.0, 108.0, 0.0)).length() < 1e-9);
        assert!((cam.target - DVec3::new(-10.0, 100.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn camera_stays_behind_the_nose() {
        let t = FlightTuning::standard();
        let mut v = VehicleState::at_rest(DVec3::new(0.0, 300.0, 0.0), 1.3);
        v.roll = 0.2;
        v.pitch = -0.1;
        let cam = CameraState::chase(&v, &t);
        let to_camera = cam.position - v.position;
        assert!(to_camera.dot(v.forward()) < 0.0);
        assert!((to_camera.length() - t.camera_offset().length()).abs() < 1e-9);
        assert!((cam.target - cam.position).dot(v.forward()) > 0.0);
    }

    #[test]
    fn basic_variant_looks_at_the_vehicle() {
        let t = FlightTuning::basic();
        let v = VehicleState::at_rest(DVec3::new(5.0, 0.0, 5.0), 0.4);
        let cam = CameraState::chase(&v, &t);
        assert_eq!(cam.target, v.position);
    }
}
