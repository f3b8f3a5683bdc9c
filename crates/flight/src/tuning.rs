//! Numeric tuning of the flight model and chase camera.
//!
//! The scene comes in two variants with different constants; both are
//! presets here and either can be overridden from the game config.

use crate::error::TuningError;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Which preset the scene starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Full scene: throttle ramp, banking, climb and the chase offset (0, 8, 30).
    #[default]
    Standard,
    /// Lightweight scene: instant throttle, yaw only, camera looks at the vehicle.
    Basic,
}

impl Variant {
    pub fn tuning(self) -> FlightTuning {
        match self {
            Variant::Standard => FlightTuning::standard(),
            Variant::Basic => FlightTuning::basic(),
        }
    }
}

/// How the throttle keys move forward speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Throttle {
    /// Speed ramps by `acceleration` while a key is held and bleeds off by
    /// `deceleration` when released.
    #[default]
    Ramp,
    /// Speed is set outright every call: `max_speed`, `min_speed()` or zero.
    Instant,
}

/// Every constant the per-frame update consumes. Rates are per call, not per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightTuning {
    pub throttle: Throttle,
    /// Speed gained per call while `forward` (or lost while `back`) is held.
    pub acceleration: f64,
    /// Speed bled toward zero per call with no throttle held.
    pub deceleration: f64,
    /// Forward speed cap; reverse is capped at half of it.
    pub max_speed: f64,
    /// Bank angle limit (radians).
    pub roll_limit: f64,
    /// Nose lean limit (radians).
    pub pitch_limit: f64,
    /// Lean change per call toward the limit or back toward level.
    pub lean_step: f64,
    /// Heading change per call while turning (radians).
    pub yaw_rate: f64,
    /// Height change per call while climbing or diving.
    pub ascent_rate: f64,
    /// Extra roll per call from the roll keys (radians).
    pub aux_roll_rate: f64,
    /// Lowest allowed vehicle height.
    pub ground_clearance: f64,
    /// Chase camera height above the vehicle, in the vehicle frame.
    pub camera_height: f64,
    /// Chase camera distance behind the vehicle (+Z in the vehicle frame).
    pub camera_distance: f64,
    /// Look target offset in the vehicle frame.
    pub look_ahead: DVec3,
    /// Where the vehicle spawns.
    pub start_position: DVec3,
    /// Initial heading (radians).
    pub start_heading: f64,
    /// Propeller spin per call (radians).
    pub propeller_rate: f64,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self::standard()
    }
}

impl FlightTuning {
    pub fn standard() -> Self {
        Self {
            throttle: Throttle::Ramp,
            acceleration: 0.01,
            deceleration: 0.005,
            max_speed: 2.0,
            roll_limit: 0.3,
            pitch_limit: 0.2,
            lean_step: 0.01,
            yaw_rate: 0.02,
            ascent_rate: 0.5,
            aux_roll_rate: 0.02,
            ground_clearance: 50.0,
            camera_height: 8.0,
            camera_distance: 30.0,
            look_ahead: DVec3::new(0.0, 0.0, -20.0),
            start_position: DVec3::new(0.0, 200.0, 0.0),
            // The airplane model is authored nose-first along +Z.
            start_heading: std::f64::consts::PI,
            propeller_rate: 0.3,
        }
    }

    /// Instant throttle, yaw only. `acceleration` and `deceleration` are unused.
    pub fn basic() -> Self {
        Self {
            throttle: Throttle::Instant,
            acceleration: 1.0,
            deceleration: 1.0,
            max_speed: 1.0,
            roll_limit: 0.0,
            pitch_limit: 0.0,
            lean_step: 0.0,
            yaw_rate: 0.02,
            ascent_rate: 0.0,
            aux_roll_rate: 0.0,
            ground_clearance: 0.0,
            camera_height: 10.0,
            camera_distance: 30.0,
            look_ahead: DVec3::ZERO,
            start_position: DVec3::ZERO,
            start_heading: 0.0,
            propeller_rate: 0.0,
        }
    }

    /// Reverse speed cap.
    pub fn min_speed(&self) -> f64 {
        -self.max_speed / 2.0
    }

    /// Chase offset in the vehicle frame.
    pub fn camera_offset(&self) -> DVec3 {
        DVec3::new(0.0, self.camera_height, self.camera_distance)
    }

    /// Reject tunings that would produce NaN poses or unreachable limits.
    pub fn validate(&self) -> Result<(), TuningError> {
        let scalars = [
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("max_speed", self.max_speed),
            ("roll_limit", self.roll_limit),
            ("pitch_limit", self.pitch_limit),
            ("lean_step", self.lean_step),
            ("yaw_rate", self.yaw_rate),
            ("ascent_rate", self.ascent_rate),
            ("aux_roll_rate", self.aux_roll_rate),
            ("ground_clearance", self.ground_clearance),
            ("camera_height", self.camera_height),
            ("camera_distance", self.camera_distance),
            ("start_heading", self.start_heading),
            ("propeller_rate", self.propeller_rate),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(TuningError::NotFinite { name, value });
            }
        }
        let vectors = [
            ("look_ahead", self.look_ahead),
            ("start_position", self.start_position),
        ];
        for (name, v) in vectors {
            if !v.is_finite() {
                let value = v
                    .to_array()
                    .into_iter()
                    .find(|c| !c.is_finite())
                    .unwrap_or(f64::NAN);
                return Err(TuningError::NotFinite { name, value });
            }
        }

        for (name, value) in [("max_speed", self.max_speed), ("deceleration", self.deceleration)] {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { name, value });
            }
        }
        for (name, value) in [
            ("acceleration", self.acceleration),
            ("roll_limit", self.roll_limit),
            ("pitch_limit", self.pitch_limit),
            ("lean_step", self.lean_step),
            ("ascent_rate", self.ascent_rate),
            ("aux_roll_rate", self.aux_roll_rate),
        ] {
            if value < 0.0 {
                return Err(TuningError::Negative { name, value });
            }
        }
        if self.start_position.y < self.ground_clearance {
            return Err(TuningError::StartBelowGround {
                start: self.start_position.y,
                clearance: self.ground_clearance,
            });
        }
        Ok(())
    }
}
