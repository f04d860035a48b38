//! Shader program lifecycle: compile stages, link them, cache uniform locations.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, error, info};

use super::driver::{ShaderDriver, UniformValue};
use super::error::ProgramError;
use super::stage::ShaderStage;
use super::table::StageTable;

/// Value returned by [`ShaderProgram::uniform_location`] for a name that was
/// never registered. A driver can legitimately resolve a uniform to `0` as
/// well; use [`ShaderProgram::find_uniform`] when the difference matters.
pub const UNREGISTERED_UNIFORM: i32 = 0;

/// Where a [`ShaderProgram`] is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProgramState {
    /// Program object exists, nothing compiled yet.
    Empty,
    /// At least one stage compiled and waiting for link.
    Compiling,
    /// Linked; compilation is closed for good.
    Linked,
    /// Program object deleted. Every operation is a no-op or a failure.
    Released,
}

/// A GL program object together with the stage shaders waiting to be linked
/// into it and the locations of its registered uniforms.
///
/// The program exclusively owns its driver handles. Each one is freed
/// exactly once: when a stage fails to compile, when a stage is recompiled,
/// when linking succeeds, or when the program is released.
pub struct ShaderProgram<D: ShaderDriver> {
    driver: D,
    handle: Option<D::Program>,
    stages: StageTable<D::Shader>,
    linked: bool,
    uniforms: HashMap<String, i32>,
}

impl<D: ShaderDriver> ShaderProgram<D> {
    /// Create an empty program object.
    pub fn new(driver: D) -> Result<Self, ProgramError> {
        let handle = driver.create_program().map_err(|message| {
            error!("Failed to create program object: {}", message);
            ProgramError::CreateProgram { message }
        })?;

        Ok(Self {
            driver,
            handle: Some(handle),
            stages: StageTable::new(),
            linked: false,
            uniforms: HashMap::new(),
        })
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The driver handle, or `None` once released.
    pub fn handle(&self) -> Option<D::Program> {
        self.handle
    }

    pub fn is_invalid_handle(&self) -> bool {
        self.handle.is_none()
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn state(&self) -> ProgramState {
        if self.handle.is_none() {
            ProgramState::Released
        } else if self.linked {
            ProgramState::Linked
        } else if self.stages.is_empty() {
            ProgramState::Empty
        } else {
            ProgramState::Compiling
        }
    }

    /// Compiled handle currently waiting in `stage`'s slot.
    pub fn stage_shader(&self, stage: ShaderStage) -> Option<D::Shader> {
        self.stages.get(stage)
    }

    pub fn pending_stages(&self) -> impl Iterator<Item = ShaderStage> + '_ {
        self.stages.iter().map(|(stage, _)| stage)
    }

    /// Compile `source` for `stage` and keep it for linking, replacing any
    /// shader already compiled for that stage.
    pub fn compile_from_source(&mut self, source: &str, stage: ShaderStage) -> Result<(), ProgramError> {
        self.ensure_compilable("compile_from_source")?;
        self.compile(source, stage)
    }

    /// Read the whole file at `path` and compile it for `stage`.
    pub fn compile_from_file(&mut self, path: impl AsRef<Path>, stage: ShaderStage) -> Result<(), ProgramError> {
        self.ensure_compilable("compile_from_file")?;
        let source = read_source(path.as_ref())?;
        self.compile(&source, stage)
    }

    /// Like [`compile_from_file`](Self::compile_from_file), taking the stage
    /// from the file extension.
    pub fn compile_file_auto(&mut self, path: impl AsRef<Path>) -> Result<(), ProgramError> {
        let path = path.as_ref();
        let stage = ShaderStage::from_path(path).ok_or_else(|| {
            error!("Cannot tell the shader stage of {}", path.display());
            ProgramError::InvalidState {
                operation: "compile_file_auto",
                reason: "unrecognised shader file extension",
            }
        })?;
        self.compile_from_file(path, stage)
    }

    /// Compile several files in order, stopping at the first failure.
    pub fn compile_from_files<P: AsRef<Path>>(&mut self, files: &[(P, ShaderStage)]) -> Result<(), ProgramError> {
        for (path, stage) in files {
            self.compile_from_file(path, *stage)?;
        }
        Ok(())
    }

    /// Link every compiled stage into the program.
    ///
    /// Linking an already linked program succeeds without calling the
    /// driver. On failure the stages stay compiled so a single broken stage
    /// can be recompiled and the link retried.
    pub fn link(&mut self) -> Result<(), ProgramError> {
        let Some(program) = self.handle else {
            error!("link: invalid program handle");
            return Err(ProgramError::InvalidState {
                operation: "link",
                reason: "program handle has been released",
            });
        };
        if self.linked {
            return Ok(());
        }

        for (_, shader) in self.stages.iter() {
            self.driver.attach_shader(program, shader);
        }

        if !self.driver.link_program(program) {
            let log = self.driver.program_info_log(program);
            error!("Failed to link program:\n{}", log);
            self.detach_stages(program);
            return Err(ProgramError::Link { log });
        }

        self.retire_stages(program);
        self.linked = true;
        info!("Shader program {:?} linked", program);
        Ok(())
    }

    /// Make this program current. Does nothing unless linked.
    pub fn bind(&self) {
        if let (Some(program), true) = (self.handle, self.linked) {
            self.driver.use_program(Some(program));
        }
    }

    /// Clear the current program. Does nothing unless linked.
    pub fn unbind(&self) {
        if self.handle.is_some() && self.linked {
            self.driver.use_program(None);
        }
    }

    /// Resolve `name` through the driver and cache the result, including the
    /// driver's not-found value. Returns `false` only when the program has
    /// been released.
    pub fn register_uniform(&mut self, name: &str) -> bool {
        let Some(program) = self.handle else {
            return false;
        };
        let location = self.driver.uniform_location(program, name);
        if location < 0 {
            debug!("Uniform '{}' is not active in program {:?}", name, program);
        }
        self.uniforms.insert(name.to_owned(), location);
        true
    }

    /// Register several uniforms, returning `false` if any registration failed.
    pub fn register_uniforms(&mut self, names: &[&str]) -> bool {
        names.iter().all(|name| self.register_uniform(name))
    }

    /// Cached location of `name`, or [`UNREGISTERED_UNIFORM`] if it was never
    /// registered. Never queries the driver.
    pub fn uniform_location(&self, name: &str) -> i32 {
        self.find_uniform(name).unwrap_or(UNREGISTERED_UNIFORM)
    }

    /// Cached location of `name`, or `None` if it was never registered.
    pub fn find_uniform(&self, name: &str) -> Option<i32> {
        self.uniforms.get(name).copied()
    }

    /// Upload `value` to a registered uniform of this program.
    ///
    /// Names that were never registered, or that the driver could not
    /// resolve, are skipped. The program should be bound.
    pub fn set_uniform(&self, name: &str, value: impl Into<UniformValue>) {
        if self.handle.is_none() {
            return;
        }
        match self.find_uniform(name) {
            Some(location) if location >= 0 => self.driver.set_uniform(location, value.into()),
            Some(_) => {}
            None => debug!("set_uniform: '{}' was never registered", name),
        }
    }

    /// Delete every GL object this program still owns. Idempotent.
    pub fn release(&mut self) {
        let Some(program) = self.handle.take() else {
            return;
        };
        for (stage, shader) in self.stages.take_all() {
            debug!("Releasing unlinked {} shader {:?}", stage, shader);
            self.driver.delete_shader(shader);
        }
        self.driver.delete_program(program);
        self.linked = false;
    }

    fn ensure_compilable(&self, operation: &'static str) -> Result<(), ProgramError> {
        if self.handle.is_none() || self.linked {
            error!("{}: invalid program state, already linked or invalid handle", operation);
            return Err(ProgramError::InvalidState {
                operation,
                reason: "already linked or invalid handle",
            });
        }
        Ok(())
    }

    fn compile(&mut self, source: &str, stage: ShaderStage) -> Result<(), ProgramError> {
        let shader = self.driver.create_shader(stage).map_err(|message| {
            error!("Failed to create {} shader: {}", stage, message);
            ProgramError::CreateShader { stage, message }
        })?;

        if !self.driver.compile_shader(shader, source) {
            let log = self.driver.shader_info_log(shader);
            error!("Failed to compile {} shader:\n{}", stage, log);
            self.discard_failed_shader(shader);
            return Err(ProgramError::Compile { stage, log });
        }

        if let Some(previous) = self.stages.replace(stage, shader) {
            debug!("Replacing compiled {} shader {:?}", stage, previous);
            self.driver.delete_shader(previous);
        }
        debug!("Compiled {} shader {:?}", stage, shader);
        Ok(())
    }

    /// A shader that failed to compile never enters the stage table.
    fn discard_failed_shader(&self, shader: D::Shader) {
        self.driver.delete_shader(shader);
    }

    /// Link failed: detach but keep every stage for a retry.
    fn detach_stages(&self, program: D::Program) {
        for (_, shader) in self.stages.iter() {
            self.driver.detach_shader(program, shader);
        }
    }

    /// Link succeeded: the stage shaders are not needed anymore.
    fn retire_stages(&mut self, program: D::Program) {
        for (_, shader) in self.stages.take_all() {
            self.driver.detach_shader(program, shader);
            self.driver.delete_shader(shader);
        }
    }
}

impl<D: ShaderDriver> Drop for ShaderProgram<D> {
    fn drop(&mut self) {
        self.release();
    }
}

fn read_source(path: &Path) -> Result<String, ProgramError> {
    let bytes = fs::read(path).map_err(|e| {
        error!("Failed to read shader source {}: {}", path.display(), e);
        ProgramError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    String::from_utf8(bytes).map_err(|_| {
        error!("Shader source {} is not valid UTF-8", path.display());
        ProgramError::InvalidSource {
            path: path.to_path_buf(),
        }
    })
}
