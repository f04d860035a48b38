pub mod renderer;
pub mod shader;
pub mod texture;
pub mod vertex;

pub use renderer::Renderer;
pub use shader::{ShaderProgram, ShaderStage};
pub use texture::Texture;
pub use vertex::Vertex;
