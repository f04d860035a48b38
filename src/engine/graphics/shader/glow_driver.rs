use std::rc::Rc;

use glow::HasContext;

use super::driver::{ShaderDriver, UniformValue, UNIFORM_NOT_FOUND};
use super::stage::ShaderStage;

/// [`ShaderDriver`] backed by a current OpenGL context.
///
/// The context is shared with the rest of the renderer; it must stay
/// current on this thread for as long as the driver is used.
#[derive(Clone)]
pub struct GlowDriver {
    gl: Rc<glow::Context>,
}

impl GlowDriver {
    pub fn new(gl: Rc<glow::Context>) -> Self {
        Self { gl }
    }

    pub fn context(&self) -> &glow::Context {
        &self.gl
    }
}

impl ShaderDriver for GlowDriver {
    type Program = glow::Program;
    type Shader = glow::Shader;

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { self.gl.create_shader(stage.gl_type()) }
    }

    fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool {
        unsafe {
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            self.gl.get_shader_compile_status(shader)
        }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.gl.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.detach_shader(program, shader) }
    }

    fn link_program(&self, program: Self::Program) -> bool {
        unsafe {
            self.gl.link_program(program);
            self.gl.get_program_link_status(program)
        }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.gl.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> i32 {
        unsafe { self.gl.get_uniform_location(program, name) }
            .map_or(UNIFORM_NOT_FOUND, |location| location.0 as i32)
    }

    fn set_uniform(&self, location: i32, value: UniformValue) {
        if location < 0 {
            return;
        }
        let location = glow::NativeUniformLocation(location as u32);
        let location = Some(&location);
        unsafe {
            match value {
                UniformValue::Float(v) => self.gl.uniform_1_f32(location, v),
                UniformValue::Vec3(v) => self.gl.uniform_3_f32(location, v.x, v.y, v.z),
                UniformValue::Vec4(v) => self.gl.uniform_4_f32(location, v.x, v.y, v.z, v.w),
                UniformValue::Mat2(m) => {
                    self.gl.uniform_matrix_2_f32_slice(location, false, &m.to_cols_array())
                }
                UniformValue::Mat3(m) => {
                    self.gl.uniform_matrix_3_f32_slice(location, false, &m.to_cols_array())
                }
                UniformValue::Mat4(m) => {
                    self.gl.uniform_matrix_4_f32_slice(location, false, &m.to_cols_array())
                }
            }
        }
    }
}
