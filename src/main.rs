//! Application entry point.

use winit::event_loop::{ControlFlow, EventLoop};
use log::{info, error};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    info!("Logger initialized");

    let event_loop = EventLoop::new().map_err(|e| {
        error!("Failed to create event loop: {:?}", e);
        e
    })?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = cubes::App::new(cubes::DemoConfig::from_env());
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("Application error: {:?}", e);
        return Err(Box::new(e));
    }

    Ok(())
}
