// Application state and the winit event handling that drives each frame

use glam::Vec3;
use log::{debug, error, info, trace, warn};
use std::sync::Arc;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoopWindowTarget;
use winit::window::Window;

use crate::engine::game_loop::FrameClock;
use crate::engine::input::InputManager;
use crate::engine::physics::{PhysicsWorld, PointMass};
use crate::engine::renderer::{CircleMesh, GpuInitError, Renderer};
use crate::game::{AppConfig, Simulation};

/// How often (in frames) the FPS counter is logged
const FPS_LOG_INTERVAL: u64 = 300;

/// Owns the window, GPU state and simulation for the lifetime of the loop
///
/// GPU resources are released when the `App` is dropped, which happens
/// once the event loop returns regardless of why it stopped.
pub struct App {
    window: Arc<Window>,
    renderer: Renderer,
    input: InputManager,
    clock: FrameClock,
    simulation: Simulation,
}

impl App {
    /// Bring up the GPU and set the circle at rest in the middle of the view
    pub async fn new(window: Arc<Window>, config: &AppConfig) -> Result<Self, GpuInitError> {
        let mesh = CircleMesh::new(config.circle.radius, config.circle.segments);
        let renderer =
            Renderer::new(window.clone(), &mesh, &config.shaders, config.half_height).await?;

        let world = PhysicsWorld::new(config.physics, config.circle.radius)
            .with_body(PointMass::at(Vec3::ZERO));
        let simulation = Simulation::new(world, renderer.camera().viewport_bounds());

        Ok(Self {
            window,
            renderer,
            input: InputManager::new(),
            clock: FrameClock::new().with_max_delta(config.max_delta_time),
            simulation,
        })
    }

    /// Entry point for every event from the loop
    pub fn handle_event(&mut self, event: Event<()>, elwt: &EventLoopWindowTarget<()>) {
        match event {
            Event::WindowEvent { event, window_id } if window_id == self.window.id() => {
                self.handle_window_event(event, elwt);
            }
            Event::AboutToWait => {
                self.update(elwt);
                self.window.request_redraw();
            }
            Event::LoopExiting => {
                info!(
                    "Event loop exiting after {} frames ({:.1}s)",
                    self.clock.frame_count(),
                    self.clock.elapsed().as_secs_f32()
                );
            }
            _ => {}
        }
    }

    fn handle_window_event(&mut self, event: WindowEvent, elwt: &EventLoopWindowTarget<()>) {
        self.simulation.status_mut().apply_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if self.renderer.resize(physical_size) {
                    debug!(
                        "View extents now {:?}",
                        self.renderer.camera().half_extents()
                    );
                }
            }
            WindowEvent::Focused(false) => {
                // Releases that happen while unfocused never reach us
                self.input.reset();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.input.process_keyboard_event(&event);
            }
            WindowEvent::RedrawRequested => {
                self.render(elwt);
            }
            _ => {}
        }
    }

    /// Advance the clock and the simulation by one frame
    fn update(&mut self, elwt: &EventLoopWindowTarget<()>) {
        if let Some(minimized) = self.window.is_minimized() {
            self.simulation.status_mut().set_minimized(minimized);
        }

        let dt = self.clock.tick();
        let bounds = self.renderer.camera().viewport_bounds();
        let report = self.simulation.step(dt, &self.input, bounds);

        if report.settled {
            debug!("Viewport changed, circle settled");
        }
        if report.collision.any() {
            trace!("Bounce {:?}", report.collision);
        }

        if self.clock.frame_count() % FPS_LOG_INTERVAL == 0 {
            debug!("FPS: {:.1}", self.clock.fps());
        }

        if self.input.quit_requested() {
            info!("Quit requested, shutting down...");
            elwt.exit();
        }
    }

    fn render(&mut self, elwt: &EventLoopWindowTarget<()>) {
        let size = self.renderer.size();
        if self.simulation.status().is_minimized() || size.width == 0 || size.height == 0 {
            return;
        }

        match self.renderer.render(self.simulation.body().position) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of GPU memory, shutting down");
                elwt.exit();
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }
}
