//! Flight Simulator: chase-camera flight over an endless checkered field.

mod banner;
mod config;
mod scene;

use anyhow::Result;
use banner::Banner;
use engine_core::time::FrameClock;
use flight::Simulation;
use input::{key_identifier, ElementState, InputLatch};
use renderer::Renderer;
use scene::Stage;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

/// Everything alive while the window is open.
struct GameState {
    stage: Stage,
    sim: Simulation,
    input: InputLatch,
    clock: FrameClock,
    banner: Banner,
}

impl GameState {
    async fn new(window: Arc<Window>, config: &config::GameConfig) -> Result<Self> {
        let tuning = config.flight_tuning();
        let sim = Simulation::new(tuning)?;
        let renderer = Renderer::new(window.clone(), config.vsync).await?;
        let stage = Stage::new(window, renderer, config.variant);

        log::info!(
            "{:?} variant, spawn at {:?}",
            config.variant,
            sim.vehicle().position
        );

        Ok(Self {
            stage,
            sim,
            input: InputLatch::new(config.bindings()),
            clock: FrameClock::default(),
            banner: Banner::default(),
        })
    }

    /// Returns true when the app should exit.
    fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => return true,
            WindowEvent::Resized(size) => self.stage.resize(size),
            WindowEvent::Focused(false) => self.input.release_all(),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.logical_key == Key::Named(NamedKey::Escape)
                    && event.state == ElementState::Pressed
                {
                    return true;
                }
                if let Some(key) = key_identifier(&event.logical_key) {
                    match event.state {
                        ElementState::Pressed => self.input.on_key_down(&key),
                        ElementState::Released => self.input.on_key_up(&key),
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
        false
    }

    fn redraw(&mut self) {
        let controls = self.input.snapshot();
        let error = match self.sim.frame(&controls, &mut self.stage) {
            Ok(report) => {
                if let Some(fps) = self.clock.tick() {
                    log::debug!(
                        "frame {} | {:.1} fps | {}",
                        report.frame,
                        fps,
                        report.telemetry.one_line()
                    );
                }
                None
            }
            Err(e) => {
                log::error!("frame {} failed: {}", self.sim.frame_count(), e);
                Some(e.to_string())
            }
        };
        self.banner.next_frame(error);
        self.stage.refresh_title(self.banner.message());
        self.stage.request_redraw();
    }
}

/// Application handler for winit.
struct App {
    state: Option<GameState>,
}

impl App {
    fn new() -> Self {
        Self { state: None }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_none() {
            let config = config::GameConfig::load();
            let window_attrs = Window::default_attributes()
                .with_title("Flight Simulator")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    config.window_width,
                    config.window_height,
                ));

            let window = match event_loop.create_window(window_attrs) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    log::error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            match pollster::block_on(GameState::new(window.clone(), &config)) {
                Ok(s) => {
                    self.state = Some(s);
                    window.request_redraw();
                }
                Err(e) => {
                    log::error!("Failed to initialize flight simulator: {:#}", e);
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) {
                event_loop.exit();
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════════╗");
    println!("║               Flight Simulator               ║");
    println!("╠══════════════════════════════════════════════╣");
    println!("║  W / Up     - Throttle (Up also pitches up)  ║");
    println!("║  S / Down   - Brake (Down also pitches down) ║");
    println!("║  A / D      - Bank and turn left / right     ║");
    println!("║  Q / E      - Roll left / right              ║");
    println!("║  Space      - Boost to full speed            ║");
    println!("║  Escape     - Quit                           ║");
    println!("╚══════════════════════════════════════════════╝");

    log::info!("Starting Flight Simulator");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app)?;

    Ok(())
}
