use std::rc::Rc;

use glam::Mat4;
use glow::HasContext;
use log::info;

use crate::config::DemoConfig;
use crate::engine::graphics::shader::{GlowDriver, ShaderProgram, ShaderStage};
use crate::engine::graphics::texture::Texture;
use crate::engine::graphics::vertex::{Vertex, CUBE_VERTICES};

pub const MODEL_UNIFORM: &str = "model";
pub const VIEW_UNIFORM: &str = "view";
pub const PROJECTION_UNIFORM: &str = "projection";

/// Draws textured unit cubes with one shader program.
pub struct Renderer {
    gl: Rc<glow::Context>,
    pub program: ShaderProgram<GlowDriver>,
    pub texture: Texture,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    vertex_count: i32,
}

impl Renderer {
    pub fn new(gl: Rc<glow::Context>, config: &DemoConfig) -> Result<Self, Box<dyn std::error::Error>> {
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            let [r, g, b, a] = config.clear_color;
            gl.clear_color(r, g, b, a);
            gl.viewport(0, 0, config.width as i32, config.height as i32);
        }

        let mut program = ShaderProgram::new(GlowDriver::new(gl.clone()))?;
        program.compile_from_file(&config.vertex_shader, ShaderStage::Vertex)?;
        program.compile_from_file(&config.fragment_shader, ShaderStage::Fragment)?;
        program.link()?;
        program.register_uniforms(&[MODEL_UNIFORM, VIEW_UNIFORM, PROJECTION_UNIFORM]);

        let (vao, vbo) = unsafe {
            let vbo = gl.create_buffer()?;
            let vao = gl.create_vertex_array()?;
            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(CUBE_VERTICES),
                glow::STATIC_DRAW,
            );
            Vertex::apply_layout(&gl);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            (vao, vbo)
        };
        info!("Uploaded cube mesh: {} vertices", CUBE_VERTICES.len());

        let texture = Texture::load_or_default(gl.clone(), &config.texture)?;

        Ok(Self {
            gl,
            program,
            texture,
            vao,
            vbo,
            vertex_count: CUBE_VERTICES.len() as i32,
        })
    }

    pub fn resize(&self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            unsafe { self.gl.viewport(0, 0, width as i32, height as i32) }
        }
    }

    /// Clear the frame and draw one cube per model matrix.
    pub fn render(&self, view: Mat4, projection: Mat4, models: &[Mat4]) {
        unsafe {
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        self.program.bind();
        self.program.set_uniform(VIEW_UNIFORM, view);
        self.program.set_uniform(PROJECTION_UNIFORM, projection);
        self.texture.bind();

        for model in models {
            self.program.set_uniform(MODEL_UNIFORM, *model);
            unsafe {
                self.gl.bind_vertex_array(Some(self.vao));
                self.gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count);
                self.gl.bind_vertex_array(None);
            }
        }

        self.texture.unbind();
        self.program.unbind();
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::graphics::shader::mock::MockDriver;

    #[test]
    fn bundled_shaders_declare_renderer_uniforms() {
        let config = DemoConfig::default();
        let mut program = ShaderProgram::new(MockDriver::new()).unwrap();
        program
            .compile_from_files(&[
                (&config.vertex_shader, ShaderStage::Vertex),
                (&config.fragment_shader, ShaderStage::Fragment),
            ])
            .unwrap();
        program.link().unwrap();
        assert!(program.register_uniforms(&[MODEL_UNIFORM, VIEW_UNIFORM, PROJECTION_UNIFORM]));

        for name in [MODEL_UNIFORM, VIEW_UNIFORM, PROJECTION_UNIFORM] {
            assert!(program.find_uniform(name).is_some_and(|location| location >= 0));
        }
    }
}
