//! Scene host: ground plane, airplane model, camera and the renderer behind them.

use crate::banner::window_title;
use engine_core::Transform;
use flight::{CameraState, SceneHost, Telemetry, VehicleState, Variant};
use glam::{Quat, Vec3};
use renderer::{hex_color, Camera, DrawBatch, InstanceData, Mesh, MeshData, RenderError, Renderer};
use std::sync::Arc;
use winit::window::Window;

const GROUND_EXTENT: f32 = 10000.0;
const GROUND_TILES: u32 = 50;

/// One box of the airplane model, placed in the airplane's local frame (nose toward -Z).
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub position: Vec3,
    pub size: Vec3,
    pub color: [f32; 4],
    /// Spins about the local Z axis with the propeller angle.
    pub propeller: bool,
}

impl Part {
    fn new(position: Vec3, size: Vec3, hex: u32) -> Self {
        Self {
            position,
            size,
            color: hex_color(hex),
            propeller: false,
        }
    }

    fn propeller(position: Vec3) -> Self {
        Self {
            propeller: true,
            ..Self::new(position, Vec3::new(0.3, 3.2, 0.15), 0x333333)
        }
    }

    fn local_transform(&self, propeller_angle: f32) -> Transform {
        let rotation = if self.propeller {
            Quat::from_rotation_z(propeller_angle)
        } else {
            Quat::IDENTITY
        };
        Transform::from_position_rotation(self.position, rotation).with_scale(self.size)
    }
}

/// Box-built airplane, detailed for the standard variant.
#[derive(Debug, Clone, PartialEq)]
pub struct AirplaneModel {
    pub parts: Vec<Part>,
}

impl AirplaneModel {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Standard => Self::detailed(),
            Variant::Basic => Self::simple(),
        }
    }

    fn detailed() -> Self {
        let parts = vec![
            Part::new(Vec3::ZERO, Vec3::new(2.0, 2.0, 10.0), 0xf0f0f0),
            Part::new(Vec3::new(0.0, 0.0, -5.8), Vec3::new(1.4, 1.4, 1.6), 0xcc2222),
            Part::new(Vec3::new(0.0, 1.2, -2.0), Vec3::new(1.2, 0.8, 2.2), 0x3366aa),
            Part::new(Vec3::new(0.0, 0.2, -0.5), Vec3::new(15.0, 0.4, 3.0), 0xe0e0e0),
            Part::new(Vec3::new(0.0, 0.4, 4.4), Vec3::new(6.0, 0.3, 1.5), 0xe0e0e0),
            Part::new(Vec3::new(0.0, 1.8, 4.4), Vec3::new(0.3, 2.6, 1.8), 0xcc2222),
            Part::new(Vec3::new(-4.0, -0.6, -1.0), Vec3::new(1.0, 1.0, 3.0), 0x888888),
            Part::new(Vec3::new(4.0, -0.6, -1.0), Vec3::new(1.0, 1.0, 3.0), 0x888888),
            Part::propeller(Vec3::new(-4.0, -0.6, -2.6)),
            Part::propeller(Vec3::new(4.0, -0.6, -2.6)),
        ];
        Self { parts }
    }

    fn simple() -> Self {
        let parts = vec![
            Part::new(Vec3::ZERO, Vec3::new(2.0, 2.0, 10.0), 0xf0f0f0),
            Part::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(15.0, 0.5, 3.0), 0xf0f0f0),
        ];
        Self { parts }
    }

    /// Instance data for every part under the given airplane node.
    pub fn instances(&self, node: &Transform, propeller_angle: f32) -> Vec<InstanceData> {
        self.parts
            .iter()
            .map(|part| {
                let model = node.child_matrix(&part.local_transform(propeller_angle));
                InstanceData::new(model.to_cols_array_2d(), part.color)
            })
            .collect()
    }
}

/// Everything the simulation draws into.
pub struct Stage {
    window: Arc<Window>,
    renderer: Renderer,
    camera: Camera,
    ground: Mesh,
    ground_instance: [InstanceData; 1],
    part_mesh: Mesh,
    airplane: AirplaneModel,
    airplane_node: Transform,
    propeller_angle: f32,
    overlay: String,
    title: String,
}

impl Stage {
    pub fn new(window: Arc<Window>, renderer: Renderer, variant: Variant) -> Self {
        let ground_colors = [hex_color(0x3d673c), hex_color(0x4a7847)];
        let ground = Mesh::from_data(
            renderer.device(),
            &MeshData::ground_grid(GROUND_EXTENT, GROUND_TILES, ground_colors),
        );
        let part_mesh = Mesh::from_data(renderer.device(), &MeshData::cuboid(Vec3::ONE));

        let mut camera = Camera::default();
        let (width, height) = renderer.dimensions();
        camera.set_aspect(width, height);

        Self {
            window,
            renderer,
            camera,
            ground,
            ground_instance: [InstanceData::new(
                Transform::default().to_matrix().to_cols_array_2d(),
                [1.0; 4],
            )],
            part_mesh,
            airplane: AirplaneModel::for_variant(variant),
            airplane_node: Transform::default(),
            propeller_angle: 0.0,
            overlay: String::new(),
            title: String::new(),
        }
    }

    /// Handle window resize.
    pub fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.renderer.resize(size);
        self.camera.set_aspect(size.width, size.height);
    }

    /// Update the window title with the overlay and banner; skips unchanged titles.
    pub fn refresh_title(&mut self, banner: Option<&str>) {
        let title = window_title(&self.overlay, banner);
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

impl SceneHost for Stage {
    type Error = RenderError;

    fn place_vehicle(&mut self, vehicle: &VehicleState) -> Result<(), RenderError> {
        self.airplane_node = vehicle.transform();
        self.propeller_angle = vehicle.propeller_angle as f32;
        Ok(())
    }

    fn place_camera(&mut self, camera: &CameraState) -> Result<(), RenderError> {
        self.camera.set_position(camera.position.as_vec3());
        self.camera.look_at(camera.target.as_vec3());
        Ok(())
    }

    fn show_telemetry(&mut self, telemetry: &Telemetry) {
        self.overlay = telemetry.one_line();
    }

    fn render(&mut self) -> Result<(), RenderError> {
        self.renderer.update_camera(&self.camera);
        let airplane = self
            .airplane
            .instances(&self.airplane_node, self.propeller_angle);
        self.renderer.render(&[
            DrawBatch {
                mesh: &self.ground,
                instances: &self.ground_instance,
            },
            DrawBatch {
                mesh: &self.part_mesh,
                instances: &airplane,
            },
        ])
    }
}
