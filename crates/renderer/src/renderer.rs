//! Main renderer managing wgpu state and rendering.

use crate::{
    camera::{Camera, CameraUniform},
    mesh::Mesh,
    pipeline::{create_camera_bind_group_layout, create_render_pipeline},
    texture::Texture,
    vertex::InstanceData,
};
use anyhow::Result;
use glam::Vec3;
use std::sync::Arc;
use thiserror::Error;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Instances the per-frame instance buffer can hold.
const MAX_INSTANCES: u32 = 1024;

/// A frame that could not be drawn. The renderer stays usable.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("surface unavailable: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("{requested} instances exceed the instance buffer capacity of {capacity}")]
    InstanceOverflow { requested: usize, capacity: u32 },
}

/// One mesh drawn with a set of instances.
pub struct DrawBatch<'a> {
    pub mesh: &'a Mesh,
    pub instances: &'a [InstanceData],
}

/// Main renderer.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,

    render_pipeline: wgpu::RenderPipeline,
    depth_texture: Texture,

    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,

    instance_buffer: wgpu::Buffer,
    max_instances: u32,

    /// Background color (linear).
    pub clear_color: wgpu::Color,
    /// Direction toward the sun.
    pub sun_direction: Vec3,
}

impl Renderer {
    /// Create a new renderer for the given window.
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        log::info!("Using GPU: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;

        // Prefer Mailbox (low-latency vsync) if available; otherwise AutoVsync.
        let present_mode = if vsync {
            surface_caps
                .present_modes
                .iter()
                .find(|m| matches!(m, wgpu::PresentMode::Mailbox))
                .copied()
                .unwrap_or(wgpu::PresentMode::AutoVsync)
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };
        surface.configure(&device, &config);

        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group_layout = create_camera_bind_group_layout(&device);
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let render_pipeline = create_render_pipeline(&device, &config, &camera_bind_group_layout);
        let depth_texture =
            Texture::create_depth_texture(&device, config.width, config.height, "Depth Texture");

        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (MAX_INSTANCES as usize * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            render_pipeline,
            depth_texture,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            instance_buffer,
            max_instances: MAX_INSTANCES,
            // 0x87ceeb in linear space.
            clear_color: wgpu::Color {
                r: 0.242,
                g: 0.617,
                b: 0.831,
                a: 1.0,
            },
            sun_direction: Vec3::new(0.5, 1.0, 0.3),
        })
    }

    /// Handle window resize.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = Texture::create_depth_texture(
                &self.device,
                self.config.width,
                self.config.height,
                "Depth Texture",
            );
        }
    }

    /// Update camera uniform.
    pub fn update_camera(&mut self, camera: &Camera) {
        self.camera_uniform.update(camera, self.sun_direction);
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
    }

    /// Draw all batches in one cleared pass and present.
    pub fn render(&mut self, batches: &[DrawBatch<'_>]) -> Result<(), RenderError> {
        let requested: usize = batches.iter().map(|b| b.instances.len()).sum();
        if requested > self.max_instances as usize {
            return Err(RenderError::InstanceOverflow {
                requested,
                capacity: self.max_instances,
            });
        }

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                // Reconfigure so the next frame has a fresh swap chain.
                self.resize(self.size);
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Pack every batch's instances back to back.
        let mut ranges = Vec::with_capacity(batches.len());
        let mut offset = 0u32;
        for batch in batches {
            let count = batch.instances.len() as u32;
            if count > 0 {
                let byte_offset = (offset as usize * std::mem::size_of::<InstanceData>()) as u64;
                self.queue.write_buffer(
                    &self.instance_buffer,
                    byte_offset,
                    bytemuck::cast_slice(batch.instances),
                );
            }
            ranges.push(offset..offset + count);
            offset += count;
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.render_pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for (batch, range) in batches.iter().zip(ranges) {
                if range.is_empty() {
                    continue;
                }
                pass.set_vertex_buffer(0, batch.mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(batch.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..batch.mesh.num_indices, 0, range);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Get window dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Access the device for mesh creation.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }
}
