//! GLSL program management.
//!
//! [`ShaderProgram`] compiles individual stages, links them, and caches
//! uniform locations. It talks to the GPU only through [`ShaderDriver`];
//! [`GlowDriver`] is the OpenGL implementation used by the renderer.

pub mod driver;
pub mod error;
pub mod glow_driver;
#[cfg(test)]
pub(crate) mod mock;
pub mod program;
pub mod stage;
pub mod table;

pub use driver::{ShaderDriver, UniformValue, UNIFORM_NOT_FOUND};
pub use error::ProgramError;
pub use glow_driver::GlowDriver;
pub use program::{ProgramState, ShaderProgram, UNREGISTERED_UNIFORM};
pub use stage::ShaderStage;
pub use table::StageTable;
