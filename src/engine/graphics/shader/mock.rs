//! In-memory [`ShaderDriver`] that records every call, for tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::driver::{ShaderDriver, UniformValue, UNIFORM_NOT_FOUND};
use super::stage::ShaderStage;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CreateProgram,
    DeleteProgram(u32),
    CreateShader(ShaderStage),
    CompileShader(u32),
    ShaderInfoLog(u32),
    DeleteShader(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    ProgramInfoLog(u32),
    UseProgram(Option<u32>),
    UniformLocation(u32, String),
    SetUniform(i32, UniformValue),
}

#[derive(Default)]
struct State {
    next_program: u32,
    next_shader: u32,
    programs: HashSet<u32>,
    shaders: HashMap<u32, String>,
    attached: HashMap<u32, Vec<u32>>,
    uniforms: HashMap<u32, HashMap<String, i32>>,
    overrides: HashMap<String, i32>,
    link_failure: Option<String>,
    refuse_shader: bool,
    calls: Vec<Call>,
}

/// Shares its state between clones so a test can keep one clone to inspect
/// what a [`ShaderProgram`](super::ShaderProgram) did with the other.
///
/// A source "compiles" when it contains `void main`. A successful link
/// assigns locations `0..` to the `uniform <type> <name>;` declarations of
/// the attached shaders, in attach order.
#[derive(Clone, Default)]
pub struct MockDriver {
    state: Rc<RefCell<State>>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn link_count(&self) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::LinkProgram(_)))
            .count()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn is_live_shader(&self, shader: u32) -> bool {
        self.state.borrow().shaders.contains_key(&shader)
    }

    pub fn source_of(&self, shader: u32) -> Option<String> {
        self.state.borrow().shaders.get(&shader).cloned()
    }

    pub fn fail_next_link(&self, log: &str) {
        self.state.borrow_mut().link_failure = Some(log.to_owned());
    }

    pub fn fail_next_create_shader(&self) {
        self.state.borrow_mut().refuse_shader = true;
    }

    /// Force the location reported for `name` from now on.
    pub fn override_uniform(&self, name: &str, location: i32) {
        self.state.borrow_mut().overrides.insert(name.to_owned(), location);
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

fn declared_uniforms(source: &str) -> impl Iterator<Item = &str> {
    source.lines().filter_map(|line| {
        let rest = line.trim().strip_prefix("uniform ")?;
        let name = rest.split_whitespace().nth(1)?;
        Some(name.trim_end_matches(';'))
    })
}

impl ShaderDriver for MockDriver {
    type Program = u32;
    type Shader = u32;

    fn create_program(&self) -> Result<u32, String> {
        self.record(Call::CreateProgram);
        let mut state = self.state.borrow_mut();
        state.next_program += 1;
        let id = state.next_program;
        state.programs.insert(id);
        Ok(id)
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
        let mut state = self.state.borrow_mut();
        state.programs.remove(&program);
        state.attached.remove(&program);
        state.uniforms.remove(&program);
    }

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        self.record(Call::CreateShader(stage));
        let mut state = self.state.borrow_mut();
        if std::mem::take(&mut state.refuse_shader) {
            return Err("out of shader objects".to_owned());
        }
        state.next_shader += 1;
        let id = state.next_shader;
        state.shaders.insert(id, String::new());
        Ok(id)
    }

    fn compile_shader(&self, shader: u32, source: &str) -> bool {
        self.record(Call::CompileShader(shader));
        self.state.borrow_mut().shaders.insert(shader, source.to_owned());
        source.contains("void main")
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.record(Call::ShaderInfoLog(shader));
        "0:1(1): error: syntax error, unexpected end of input".to_owned()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
        self.state.borrow_mut().attached.entry(program).or_default().push(shader);
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
        if let Some(list) = self.state.borrow_mut().attached.get_mut(&program) {
            list.retain(|&s| s != shader);
        }
    }

    fn link_program(&self, program: u32) -> bool {
        self.record(Call::LinkProgram(program));
        let mut state = self.state.borrow_mut();
        if state.link_failure.is_some() {
            return false;
        }

        let mut locations = HashMap::new();
        for shader in state.attached.get(&program).cloned().unwrap_or_default() {
            let source = state.shaders.get(&shader).cloned().unwrap_or_default();
            for name in declared_uniforms(&source) {
                let next = locations.len() as i32;
                locations.entry(name.to_owned()).or_insert(next);
            }
        }
        state.uniforms.insert(program, locations);
        true
    }

    fn program_info_log(&self, program: u32) -> String {
        self.record(Call::ProgramInfoLog(program));
        self.state.borrow_mut().link_failure.take().unwrap_or_default()
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn uniform_location(&self, program: u32, name: &str) -> i32 {
        self.record(Call::UniformLocation(program, name.to_owned()));
        let state = self.state.borrow();
        if let Some(&location) = state.overrides.get(name) {
            return location;
        }
        state
            .uniforms
            .get(&program)
            .and_then(|u| u.get(name).copied())
            .unwrap_or(UNIFORM_NOT_FOUND)
    }

    fn set_uniform(&self, location: i32, value: UniformValue) {
        self.record(Call::SetUniform(location, value));
    }
}
