//! The cube demo built on the engine.

pub mod app;
pub mod camera;
pub mod scene;
pub mod state;

pub use app::App;
pub use camera::Camera;
