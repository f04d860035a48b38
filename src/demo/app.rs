use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;
use log::{error, info};

use crate::config::DemoConfig;
use crate::demo::scene::{self, CUBE_POSITIONS};
use crate::demo::state::FrameClock;
use crate::engine::graphics::Renderer;
use crate::engine::window::WindowManager;

/// GL objects live as long as the context they were created in.
/// `renderer` is declared first so it is dropped while the context is still current.
struct GlState {
    renderer: Renderer,
    window: WindowManager,
}

pub struct App {
    config: DemoConfig,
    state: Option<GlState>,
    clock: FrameClock,
    aspect: f32,
}

impl App {
    pub fn new(config: DemoConfig) -> Self {
        let aspect = config.aspect_ratio();
        Self {
            config,
            state: None,
            clock: FrameClock::new(),
            aspect,
        }
    }

    fn init_gl(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn std::error::Error>> {
        let window = WindowManager::create(event_loop, &self.config)?;
        let renderer = Renderer::new(window.gl.clone(), &self.config)?;

        let size = window.size();
        renderer.resize(size.width, size.height);
        if size.height > 0 {
            self.aspect = size.width as f32 / size.height as f32;
        }

        window.request_redraw();
        self.state = Some(GlState { renderer, window });
        self.clock = FrameClock::new();
        Ok(())
    }

    fn redraw(&mut self) {
        let Some(state) = &self.state else {
            return;
        };

        let elapsed = self.clock.elapsed();
        let config = &self.config;
        let view = scene::orbit_view(elapsed, config.orbit_radius);
        let projection = scene::projection(config.fov_degrees, self.aspect, config.near, config.far);
        let models: Vec<_> = CUBE_POSITIONS
            .iter()
            .enumerate()
            .map(|(i, position)| scene::cube_model(i, *position, elapsed, config.spin_rate))
            .collect();

        state.renderer.render(view, projection, &models);
        if let Err(e) = state.window.swap_buffers() {
            error!("Failed to swap buffers: {:?}", e);
        }
        self.clock.tick();
        state.window.request_redraw();
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.aspect = new_size.width as f32 / new_size.height as f32;
        if let Some(state) = &self.state {
            state.window.resize(new_size);
            state.renderer.resize(new_size.width, new_size.height);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DemoConfig::default())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(e) = self.init_gl(event_loop) {
            error!("Failed to initialise renderer: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            WindowEvent::Resized(physical_size) => {
                self.resize(physical_size);
            }
            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // release GL objects while the context is still alive
        self.state = None;
    }
}
