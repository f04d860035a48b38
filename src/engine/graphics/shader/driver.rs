//! The graphics-driver contract the shader program is written against.

use std::fmt::Debug;
use std::hash::Hash;

use glam::{Mat2, Mat3, Mat4, Vec3, Vec4};

use super::stage::ShaderStage;

/// Location value the driver reports for a name that is not an active uniform.
pub const UNIFORM_NOT_FOUND: i32 = -1;

/// The subset of GL program/shader calls a [`ShaderProgram`](super::ShaderProgram) issues.
///
/// Every call is synchronous and returns as soon as the driver does.
/// Handles are opaque: only the driver knows what they mean.
pub trait ShaderDriver {
    type Program: Copy + Eq + Hash + Debug;
    type Shader: Copy + Eq + Debug;

    fn create_program(&self) -> Result<Self::Program, String>;
    fn delete_program(&self, program: Self::Program);

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    /// Upload `source` and compile it, returning the compile status.
    fn compile_shader(&self, shader: Self::Shader, source: &str) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    /// Link the program, returning the link status.
    fn link_program(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;

    fn use_program(&self, program: Option<Self::Program>);

    /// Resolve a uniform, or [`UNIFORM_NOT_FOUND`].
    fn uniform_location(&self, program: Self::Program, name: &str) -> i32;
    /// Upload a value to a resolved location of the program in use.
    fn set_uniform(&self, location: i32, value: UniformValue);
}

/// A value that can be uploaded to a uniform.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        UniformValue::Vec4(value)
    }
}

impl From<Mat2> for UniformValue {
    fn from(value: Mat2) -> Self {
        UniformValue::Mat2(value)
    }
}

impl From<Mat3> for UniformValue {
    fn from(value: Mat3) -> Self {
        UniformValue::Mat3(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        UniformValue::Mat4(value)
    }
}
