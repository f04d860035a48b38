//! Spinning textured cubes on OpenGL, built around a managed GLSL program.

pub mod config;
pub mod demo;
pub mod engine;

// Re-export main types for convenience
pub use config::DemoConfig;
pub use demo::App;
