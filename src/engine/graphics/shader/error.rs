use std::path::PathBuf;

use thiserror::Error;

use super::stage::ShaderStage;

/// Failure reported by a [`ShaderProgram`](super::ShaderProgram) operation.
///
/// None of these are fatal. After any of them the program is left in a
/// well-defined state that can still be inspected or retried.
#[derive(Debug, Error)]
pub enum ProgramError {
    /// The operation is not valid in the program's current lifecycle state.
    #[error("{operation}: invalid program state, {reason}")]
    InvalidState {
        operation: &'static str,
        reason: &'static str,
    },

    #[error("failed to read shader source {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shader source {} is not valid UTF-8", path.display())]
    InvalidSource { path: PathBuf },

    #[error("driver could not create a program object: {message}")]
    CreateProgram { message: String },

    #[error("driver could not create a {stage} shader: {message}")]
    CreateShader { stage: ShaderStage, message: String },

    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },

    #[error("failed to link program:\n{log}")]
    Link { log: String },
}

impl ProgramError {
    /// Driver diagnostics attached to a compile or link failure.
    pub fn info_log(&self) -> Option<&str> {
        match self {
            ProgramError::Compile { log, .. } | ProgramError::Link { log } => Some(log),
            _ => None,
        }
    }

    pub fn is_state_error(&self) -> bool {
        matches!(self, ProgramError::InvalidState { .. })
    }
}
