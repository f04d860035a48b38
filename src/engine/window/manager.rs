//! Window and OpenGL context creation.

use std::num::NonZeroU32;
use std::rc::Rc;

use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext, Version};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{error, info, warn};
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::raw_window_handle::HasWindowHandle;
use winit::window::Window;

use crate::config::DemoConfig;

/// A window with a current OpenGL context and the `glow` function table.
///
/// Fields drop in declaration order; the surface must go before the window.
pub struct WindowManager {
    pub gl: Rc<glow::Context>,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl WindowManager {
    pub fn create(event_loop: &ActiveEventLoop, config: &DemoConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(false);

        let template = ConfigTemplateBuilder::new()
            .with_depth_size(config.depth_bits)
            .with_stencil_size(config.stencil_bits)
            .with_multisampling(config.samples);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(|e| {
                error!("Failed to create window: {:?}", e);
                e
            })?;
        let window = window.ok_or("display builder did not create a window")?;

        let raw_window_handle = window.window_handle().ok().map(|handle| handle.as_raw());
        let (major, minor) = config.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(raw_window_handle);

        let display = gl_config.display();
        let not_current = unsafe { display.create_context(&gl_config, &context_attributes)? };

        let surface_attributes = window.build_surface_attributes(Default::default())?;
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes)? };
        let context = not_current.make_current(&surface)?;

        if config.vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
                warn!("Failed to enable vsync: {:?}", e);
            }
        }

        let gl = unsafe { glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name)) };
        info!(
            "OpenGL {}.{} core context created ({} samples)",
            major,
            minor,
            gl_config.num_samples()
        );

        Ok(Self {
            gl: Rc::new(gl),
            surface,
            context,
            window,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.window.inner_size()
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub fn resize(&self, size: PhysicalSize<u32>) {
        if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
            self.surface.resize(&self.context, width, height);
        }
    }

    pub fn swap_buffers(&self) -> Result<(), glutin::error::Error> {
        self.surface.swap_buffers(&self.context)
    }
}

/// Prefer the configuration with the most samples.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, candidate| {
            if candidate.num_samples() > best.num_samples() {
                candidate
            } else {
                best
            }
        })
        .unwrap_or_else(|| {
            error!("No OpenGL framebuffer configuration available, exiting");
            std::process::exit(1);
        })
}
