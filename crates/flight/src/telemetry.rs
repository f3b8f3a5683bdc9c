//! Read-only readout for the on-screen overlay.

use crate::vehicle::VehicleState;
use std::fmt;

/// Position rounded to whole units and forward speed, refreshed every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub position: [i64; 3],
    pub speed: f64,
}

impl Telemetry {
    pub fn from_vehicle(vehicle: &VehicleState) -> Self {
        let p = vehicle.position;
        Self {
            position: [round_half_up(p.x), round_half_up(p.y), round_half_up(p.z)],
            // Avoid printing "-0.00".
            speed: if vehicle.forward_speed == 0.0 { 0.0 } else { vehicle.forward_speed },
        }
    }

    /// Single-line form for a window title.
    pub fn one_line(&self) -> String {
        let [x, y, z] = self.position;
        format!("x={x}, y={y}, z={z} | speed {:.2}", self.speed)
    }
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.position;
        writeln!(f, "Flight Simulator")?;
        writeln!(f, "Position: x={x}, y={y}, z={z}")?;
        write!(f, "Speed: {:.2}", self.speed)
    }
}

/// Round to the nearest integer, ties toward +∞ (-2.5 rounds to -2).
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
