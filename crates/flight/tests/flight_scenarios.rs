//! End-to-end flight scenarios driven through `Simulation::frame`.

use flight::{
    CameraState, FlightTuning, SceneHost, Simulation, Telemetry, VehicleState,
};
use glam::DVec3;
use input::{Control, ControlState, InputLatch};

/// Records everything the simulation hands to the scene.
#[derive(Default)]
struct RecordingHost {
    vehicles: Vec<VehicleState>,
    cameras: Vec<CameraState>,
    overlays: Vec<String>,
    renders: usize,
}

impl SceneHost for RecordingHost {
    type Error = std::convert::Infallible;

    fn place_vehicle(&mut self, vehicle: &VehicleState) -> Result<(), Self::Error> {
        self.vehicles.push(*vehicle);
        Ok(())
    }

    fn place_camera(&mut self, camera: &CameraState) -> Result<(), Self::Error> {
        self.cameras.push(*camera);
        Ok(())
    }

    fn show_telemetry(&mut self, telemetry: &Telemetry) {
        self.overlays.push(telemetry.to_string());
    }

    fn render(&mut self) -> Result<(), Self::Error> {
        self.renders += 1;
        Ok(())
    }
}

fn level_sim(tuning: FlightTuning, height: f64) -> Simulation {
    Simulation::with_vehicle(tuning, VehicleState::at_rest(DVec3::new(0.0, height, 0.0), 0.0))
        .unwrap()
}

#[test]
fn holding_forward_saturates_at_max_speed_after_200_calls() {
    let mut sim = level_sim(FlightTuning::standard(), 200.0);
    let mut host = RecordingHost::default();
    let forward = ControlState::holding(&[Control::Forward]);

    for call in 1..=300u64 {
        let report = sim.frame(&forward, &mut host).unwrap();
        let speed = sim.vehicle().forward_speed;
        if call < 200 {
            assert!(speed < 2.0, "call {call}: {speed}");
        } else {
            assert_eq!(speed, 2.0, "call {call}");
        }
        assert_eq!(report.frame, call);
    }
    assert_eq!(host.renders, 300);
    assert!(host.overlays.last().unwrap().ends_with("Speed: 2.00"));
}

#[test]
fn invariants_hold_under_mixed_input() {
    let tuning = FlightTuning::standard();
    let mut sim = level_sim(tuning.clone(), 60.0);
    let mut host = RecordingHost::default();

    let patterns: [&[Control]; 6] = [
        &[Control::Forward, Control::Left, Control::PitchDown],
        &[Control::Back, Control::RollRight, Control::Right],
        &[Control::Boost, Control::RollLeft, Control::Left],
        &[Control::PitchUp, Control::RollLeft],
        &[],
        &[Control::PitchDown, Control::Right, Control::RollRight],
    ];
    for call in 0..1200 {
        let held = patterns[(call / 37) % patterns.len()];
        sim.frame(&ControlState::holding(held), &mut host).unwrap();

        let v = sim.vehicle();
        assert!(v.roll.abs() <= tuning.roll_limit);
        assert!(v.pitch.abs() <= tuning.pitch_limit);
        assert!(v.forward_speed >= tuning.min_speed() && v.forward_speed <= tuning.max_speed);
        assert!(v.position.y >= tuning.ground_clearance);
    }
}

#[test]
fn rest_state_is_a_fixed_point() {
    let mut sim = level_sim(FlightTuning::standard(), 120.0);
    let mut host = RecordingHost::default();
    for _ in 0..50 {
        sim.frame(&ControlState::default(), &mut host).unwrap();
    }
    let v = sim.vehicle();
    assert_eq!(v.forward_speed, 0.0);
    assert_eq!(v.roll, 0.0);
    assert_eq!(v.pitch, 0.0);
    assert!(host.vehicles.windows(2).all(|w| w[0].position == w[1].position));
}

#[test]
fn boost_then_release_decays_back_to_rest() {
    let mut sim = level_sim(FlightTuning::standard(), 200.0);
    let mut host = RecordingHost::default();
    sim.frame(&ControlState::holding(&[Control::Boost]), &mut host).unwrap();
    assert_eq!(sim.vehicle().forward_speed, 2.0);

    let mut calls = 0;
    while sim.vehicle().forward_speed > 0.0 {
        sim.frame(&ControlState::default(), &mut host).unwrap();
        calls += 1;
    }
    assert_eq!(sim.vehicle().forward_speed, 0.0);
    assert_eq!(calls, 400);
}

#[test]
fn diving_stops_at_the_ground_clearance() {
    let tuning = FlightTuning::standard();
    let mut sim = level_sim(tuning.clone(), 55.0);
    let mut host = RecordingHost::default();
    let dive = ControlState::holding(&[Control::PitchDown]);
    for _ in 0..40 {
        sim.frame(&dive, &mut host).unwrap();
    }
    assert_eq!(sim.vehicle().position.y, tuning.ground_clearance);
    assert!(host
        .vehicles
        .iter()
        .all(|v| v.position.y >= tuning.ground_clearance));
}

#[test]
fn camera_trails_vehicle_at_origin() {
    let tuning = FlightTuning {
        ground_clearance: 0.0,
        ..FlightTuning::standard()
    };
    let mut sim = Simulation::with_vehicle(tuning.clone(), VehicleState::at_rest(DVec3::ZERO, 0.0))
        .unwrap();
    let mut host = RecordingHost::default();
    sim.frame(&ControlState::default(), &mut host).unwrap();

    let camera = host.cameras[0];
    assert_eq!(camera.position, DVec3::new(0.0, 8.0, 30.0));
    assert_eq!(camera.target, DVec3::new(0.0, 0.0, -20.0));
}

#[test]
fn latch_snapshot_drives_the_frame() {
    let mut latch = InputLatch::default();
    let mut sim = level_sim(FlightTuning::standard(), 200.0);
    let mut host = RecordingHost::default();

    latch.on_key_down("A");
    latch.on_key_down(" ");
    let controls = latch.snapshot();
    latch.on_key_up("a");
    sim.frame(&controls, &mut host).unwrap();

    let v = sim.vehicle();
    assert_eq!(v.forward_speed, 2.0);
    assert!((v.yaw - 0.02).abs() < 1e-12);
    assert!((v.roll - 0.01).abs() < 1e-12);
}

#[test]
fn overlay_reports_rounded_position() {
    let mut sim = level_sim(FlightTuning::standard(), 200.0);
    let mut host = RecordingHost::default();
    let boost = ControlState::holding(&[Control::Boost]);
    for _ in 0..3 {
        sim.frame(&boost, &mut host).unwrap();
    }
    assert_eq!(
        host.overlays.last().unwrap(),
        "Flight Simulator\nPosition: x=0, y=200, z=-6\nSpeed: 2.00"
    );
}
