//! Engine module containing graphics and window management.

pub mod graphics;
pub mod window;

// Re-export commonly used types
pub use graphics::{renderer::Renderer, shader::ShaderProgram, texture::Texture, vertex::Vertex};
