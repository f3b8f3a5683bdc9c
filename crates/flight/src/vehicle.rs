//! Vehicle kinematics: throttle, banking, climb and the ground floor.
//!
//! Speed and both lean angles are leaky integrators with saturation: each
//! call moves them one fixed step toward the target implied by the held
//! controls (a limit or zero) and clamps them to their range. There is no
//! timestep; one call is one displayed frame.

use crate::tuning::{FlightTuning, Throttle};
use engine_core::Transform;
use glam::{DQuat, DVec3};
use input::ControlState;
use std::f64::consts::TAU;

/// Values this close to a bound or to zero settle onto it exactly, so
/// accumulated rounding cannot leave a residue like 1.9999999999999998.
const SETTLE_EPSILON: f64 = 1e-9;

/// Kinematic state of the flyable vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    /// World position.
    pub position: DVec3,
    /// Heading (radians, unbounded).
    pub yaw: f64,
    /// Nose lean (radians), within the pitch limit.
    pub pitch: f64,
    /// Bank (radians), within the roll limit.
    pub roll: f64,
    /// Signed speed along the nose direction.
    pub forward_speed: f64,
    /// Heading change chosen by the last update.
    pub yaw_rate: f64,
    /// Height change chosen by the last update.
    pub vertical_rate: f64,
    /// Roll-key contribution chosen by the last update.
    pub roll_rate: f64,
    /// Cosmetic propeller angle in `[0, 2π)`.
    pub propeller_angle: f64,
}

impl VehicleState {
    /// A motionless, level vehicle.
    pub fn at_rest(position: DVec3, heading: f64) -> Self {
        Self {
            position,
            yaw: heading,
            pitch: 0.0,
            roll: 0.0,
            forward_speed: 0.0,
            yaw_rate: 0.0,
            vertical_rate: 0.0,
            roll_rate: 0.0,
            propeller_angle: 0.0,
        }
    }

    /// The vehicle as placed at scene start.
    pub fn spawn(tuning: &FlightTuning) -> Self {
        Self::at_rest(tuning.start_position, tuning.start_heading)
    }

    /// Orientation composed as pitch, then heading, then bank (X, Y, Z intrinsic).
    pub fn orientation(&self) -> DQuat {
        DQuat::from_rotation_x(self.pitch)
            * DQuat::from_rotation_y(self.yaw)
            * DQuat::from_rotation_z(self.roll)
    }

    /// Nose direction: world -Z rotated by the orientation.
    pub fn forward(&self) -> DVec3 {
        self.orientation() * DVec3::NEG_Z
    }

    /// Render transform of the vehicle node.
    pub fn transform(&self) -> Transform {
        Transform::from_pose(self.position, self.orientation())
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.yaw.is_finite()
            && self.pitch.is_finite()
            && self.roll.is_finite()
            && self.forward_speed.is_finite()
    }

    /// Advance one call. Steps run in a fixed order; each reads the previous step's result.
    pub fn update(&mut self, controls: &ControlState, tuning: &FlightTuning) {
        self.apply_throttle(controls, tuning);
        self.apply_steering(controls, tuning);
        self.apply_climb(controls, tuning);
        self.roll_rate = if controls.roll_left {
            tuning.aux_roll_rate
        } else if controls.roll_right {
            -tuning.aux_roll_rate
        } else {
            0.0
        };

        self.yaw += self.yaw_rate;
        // Roll keys can push past the bank limit; the limit wins.
        self.roll = (self.roll + self.roll_rate).clamp(-tuning.roll_limit, tuning.roll_limit);

        self.position += self.forward() * self.forward_speed;
        self.position.y += self.vertical_rate;

        if self.position.y < tuning.ground_clearance {
            self.position.y = tuning.ground_clearance;
        }

        self.propeller_angle = (self.propeller_angle + tuning.propeller_rate).rem_euclid(TAU);
    }

    fn apply_throttle(&mut self, controls: &ControlState, tuning: &FlightTuning) {
        self.forward_speed = match tuning.throttle {
            Throttle::Instant if controls.forward => tuning.max_speed,
            Throttle::Instant if controls.back => tuning.min_speed(),
            Throttle::Instant => 0.0,
            Throttle::Ramp => {
                let speed = if controls.forward {
                    self.forward_speed + tuning.acceleration
                } else if controls.back {
                    self.forward_speed - tuning.acceleration
                } else {
                    decay_to_zero(self.forward_speed, tuning.deceleration)
                };
                saturate(speed, tuning.min_speed(), tuning.max_speed)
            }
        };

        // Boost skips the ramp in either mode.
        if controls.boost {
            self.forward_speed = tuning.max_speed;
        }
    }

    fn apply_steering(&mut self, controls: &ControlState, tuning: &FlightTuning) {
        if controls.left {
            self.yaw_rate = tuning.yaw_rate;
            self.roll = (self.roll + tuning.lean_step).min(tuning.roll_limit);
        } else if controls.right {
            self.yaw_rate = -tuning.yaw_rate;
            self.roll = (self.roll - tuning.lean_step).max(-tuning.roll_limit);
        } else {
            self.yaw_rate = 0.0;
            self.roll = relax_to_zero(self.roll, tuning.lean_step);
        }
    }

    fn apply_climb(&mut self, controls: &ControlState, tuning: &FlightTuning) {
        if controls.pitch_up {
            self.vertical_rate = tuning.ascent_rate;
            self.pitch = (self.pitch + tuning.lean_step).min(tuning.pitch_limit);
        } else if controls.pitch_down {
            self.vertical_rate = -tuning.ascent_rate;
            self.pitch = (self.pitch - tuning.lean_step).max(-tuning.pitch_limit);
        } else {
            self.vertical_rate = 0.0;
            self.pitch = relax_to_zero(self.pitch, tuning.lean_step);
        }
    }
}

/// Step a lean angle back toward level without crossing zero.
fn relax_to_zero(value: f64, step: f64) -> f64 {
    if value > step {
        value - step
    } else if value < -step {
        value + step
    } else {
        0.0
    }
}

/// Bleed speed toward zero; within one step of zero it snaps to exactly zero.
fn decay_to_zero(value: f64, step: f64) -> f64 {
    if value.abs() <= step + SETTLE_EPSILON {
        0.0
    } else {
        value - step * value.signum()
    }
}

/// Clamp to `[min, max]`, settling near-bound values onto the bound.
fn saturate(value: f64, min: f64, max: f64) -> f64 {
    let v = value.clamp(min, max);
    if max - v < SETTLE_EPSILON {
        max
    } else if v - min < SETTLE_EPSILON {
        min
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use input::Control;

    fn level() -> VehicleState {
        VehicleState::at_rest(DVec3::new(0.0, 200.0, 0.0), 0.0)
    }

    fn hold(controls: &[Control]) -> ControlState {
        ControlState::holding(controls)
    }

    #[test]
    fn throttle_ramps_by_acceleration() {
        let t = FlightTuning::standard();
        let mut v = level();
        v.update(&hold(&[Control::Forward]), &t);
        assert!((v.forward_speed - 0.01).abs() < 1e-12);
        v.update(&hold(&[Control::Forward]), &t);
        assert!((v.forward_speed - 0.02).abs() < 1e-12);
    }

    #[test]
    fn reverse_is_capped_at_half_max_speed() {
        let t = FlightTuning::standard();
        let mut v = level();
        for _ in 0..500 {
            v.update(&hold(&[Control::Back]), &t);
        }
        assert_eq!(v.forward_speed, -1.0);
    }

    #[test]
    fn forward_wins_over_back() {
        let t = FlightTuning::standard();
        let mut v = level();
        v.update(&hold(&[Control::Forward, Control::Back]), &t);
        assert!(v.forward_speed > 0.0);
    }

    #[test]
    fn decay_reaches_exact_zero_without_crossing() {
        let t = FlightTuning::standard();
        let mut v = level();
        v.forward_speed = 1.0;
        let mut calls = 0;
        while v.forward_speed != 0.0 {
            v.update(&ControlState::default(), &t);
            calls += 1;
            assert!(v.forward_speed >= 0.0);
            assert!(calls <= 1000, "decay never settled");
        }
        assert_eq!(calls, (1.0 / t.deceleration).ceil() as usize);
    }

    #[test]
    fn reverse_speed_decays_up_to_zero() {
        let t = FlightTuning::standard();
        let mut v = level();
        v.forward_speed = -0.012;
        v.update(&ControlState::default(), &t);
        assert!((v.forward_speed + 0.007).abs() < 1e-12);
        v.update(&ControlState::default(), &t);
        assert!((v.forward_speed + 0.002).abs() < 1e-12);
        v.update(&ControlState::default(), &t);
        assert_eq!(v.forward_speed, 0.0);
    }

    #[test]
    fn boost_overrides_ramp() {
        let t = FlightTuning::standard();
        let mut v = level();
        v.update(&hold(&[Control::Boost]), &t);
        assert_eq!(v.forward_speed, t.max_speed);

        let mut v = level();
        v.forward_speed = -1.0;
        v.update(&hold(&[Control::Back, Control::Boost]), &t);
        assert_eq!(v.forward_speed, t.max_speed);
    }

    #[test]
    fn turning_left_banks_and_yaws() {
        let t = FlightTuning::standard();
        let mut v = level();
        v.update(&hold(&[Control::Left]), &t);
        assert!((v.yaw - 0.02).abs() < 1e-12);
        assert!((v.roll - 0.01).abs() < 1e-12);
        for _ in 0..100 {
            v.update(&hold(&[Control::Left]), &t);
        }
        assert_eq!(v.roll, t.roll_limit);
        assert!((v.yaw - 101.0 * 0.02).abs() < 1e-9);
    }

    #[test]
    fn turning_right_mirrors_left() {
        let t = FlightTuning::standard();
        let mut left = level();
        let mut right = level();
        for _ in 0..12 {
            left.update(&hold(&[Control::Left]), &t);
            right.update(&hold(&[Control::Right]), &t);
        }
        assert!((left.roll + right.roll).abs() < 1e-12);
        assert!((left.yaw + right.yaw).abs() < 1e-12);
    }

    #[test]
    fn bank_relaxes_to_exact_level() {
        let t = FlightTuning::standard();
        let mut v = level();
        v.roll = 0.035;
        v.update(&ControlState::default(), &t);
        assert!((v.roll - 0.025).abs() < 1e-12);
        v.update(&ControlState::default(), &t);
        v.update(&ControlState::default(), &t);
        assert!((v.roll - 0.005).abs() < 1e-12);
        v.update(&ControlState::default(), &t);
        assert_eq!(v.roll, 0.0);
        assert_eq!(v.yaw_rate, 0.0);
    }

    #[test]
    fn climb_leans_nose_and_rises() {
        let t = FlightTuning::standard();
        let mut v = level();
        for _ in 0..50 {
            v.update(&hold(&[Control::PitchUp]), &t);
        }
        assert_eq!(v.pitch, t.pitch_limit);
        assert_eq!(v.vertical_rate, t.ascent_rate);
        assert!(v.position.y > 200.0 + 50.0 * 0.5 - 1e-9);

        for _ in 0..50 {
            v.update(&ControlState::default(), &t);
        }
        assert_eq!(v.pitch, 0.0);
        assert_eq!(v.vertical_rate, 0.0);
    }

    #[test]
    fn roll_keys_add_to_bank_within_limit() {
        let t = FlightTuning::standard();
        let mut v = level();
        v.update(&hold(&[Control::RollLeft]), &t);
        assert!((v.roll - 0.02).abs() < 1e-12);
        assert_eq!(v.yaw_rate, 0.0);

        for _ in 0..100 {
            v.update(&hold(&[Control::Left, Control::RollLeft]), &t);
            assert!(v.roll <= t.roll_limit);
        }
        assert_eq!(v.roll, t.roll_limit);

        for _ in 0..100 {
            v.update(&hold(&[Control::RollRight]), &t);
            assert!(v.roll >= -t.roll_limit);
        }
        assert_eq!(v.roll, -t.roll_limit);
    }

    #[test]
    fn moves_along_negative_z_at_zero_heading() {
        let t = FlightTuning::standard();
        let mut v = level();
        v.update(&hold(&[Control::Boost]), &t);
        assert!((v.position - DVec3::new(0.0, 200.0, -2.0)).length() < 1e-12);
    }

    #[test]
    fn spawn_heading_flies_toward_positive_z() {
        let t = FlightTuning::standard();
        let mut v = VehicleState::spawn(&t);
        v.update(&hold(&[Control::Boost]), &t);
        assert!((v.position.z - 2.0).abs() < 1e-9);
        assert!(v.position.x.abs() < 1e-9);
    }

    #[test]
    fn nose_lean_tilts_travel_direction() {
        let t = FlightTuning::standard();
        let mut v = level();
        v.pitch = 0.2;
        v.forward_speed = 1.0;
        let start = v.position;
        v.update(&hold(&[Control::Forward, Control::PitchUp]), &t);
        let moved = v.position - start;
        assert!(moved.z < 0.0);
        assert!(moved.y > t.ascent_rate);
    }

    #[test]
    fn ground_is_a_hard_floor() {
        let t = FlightTuning {
            ascent_rate: 500.0,
            ..FlightTuning::standard()
        };
        let mut v = VehicleState::at_rest(DVec3::new(0.0, 60.0, 0.0), 0.0);
        v.update(&hold(&[Control::PitchDown]), &t);
        assert_eq!(v.position.y, t.ground_clearance);
    }

    #[test]
    fn spawn_below_floor_is_lifted_on_first_update() {
        let t = FlightTuning::standard();
        let mut v = VehicleState::at_rest(DVec3::new(3.0, -10.0, 4.0), 0.0);
        v.update(&ControlState::default(), &t);
        assert_eq!(v.position, DVec3::new(3.0, 50.0, 4.0));
    }

    #[test]
    fn rest_is_a_fixed_point() {
        let t = FlightTuning::standard();
        let mut v = level();
        for _ in 0..10 {
            v.update(&ControlState::default(), &t);
        }
        assert_eq!(v.forward_speed, 0.0);
        assert_eq!(v.roll, 0.0);
        assert_eq!(v.pitch, 0.0);
        assert_eq!(v.position, DVec3::new(0.0, 200.0, 0.0));
    }

    #[test]
    fn propeller_angle_wraps() {
        let t = FlightTuning::standard();
        let mut v = level();
        for _ in 0..100 {
            v.update(&ControlState::default(), &t);
            assert!((0.0..TAU).contains(&v.propeller_angle));
        }
    }

    #[test]
    fn basic_variant_has_instant_throttle() {
        let t = FlightTuning::basic();
        let mut v = VehicleState::spawn(&t);
        v.update(&hold(&[Control::Forward]), &t);
        assert_eq!(v.forward_speed, 1.0);
        v.update(&hold(&[Control::Back]), &t);
        assert_eq!(v.forward_speed, -0.5);
        v.update(&hold(&[Control::Back]), &t);
        assert_eq!(v.forward_speed, -0.5);
        v.update(&hold(&[Control::Forward]), &t);
        assert_eq!(v.forward_speed, 1.0);
        v.update(&ControlState::default(), &t);
        assert_eq!(v.forward_speed, 0.0);
        v.update(&hold(&[Control::Left, Control::PitchUp]), &t);
        assert_eq!(v.roll, 0.0);
        assert_eq!(v.pitch, 0.0);
        assert_eq!(v.position.y, 0.0);
    }

    #[test]
    fn instant_throttle_ignores_previous_speed() {
        let t = FlightTuning::basic();
        let mut v = VehicleState::spawn(&t);
        v.forward_speed = 0.3;
        v.update(&hold(&[Control::Back]), &t);
        assert_eq!(v.forward_speed, -0.5);
        v.update(&hold(&[Control::Boost]), &t);
        assert_eq!(v.forward_speed, 1.0);
        v.update(&hold(&[Control::Forward, Control::Back]), &t);
        assert_eq!(v.forward_speed, 1.0);
    }

    #[test]
    fn saturate_settles_on_bounds() {
        assert_eq!(saturate(2.0 - 1e-12, -1.0, 2.0), 2.0);
        assert_eq!(saturate(-1.0 + 1e-12, -1.0, 2.0), -1.0);
        assert_eq!(saturate(1.5, -1.0, 2.0), 1.5);
        assert_eq!(saturate(9.0, -1.0, 2.0), 2.0);
    }
}
