use std::fmt;

use crate::device::GpuError;

use super::source::Stage;

/// Why a shader program could not be built.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    /// A stage failed to compile. `log` is the compiler's diagnostic output.
    Compile { stage: Stage, log: String },

    /// The stages compiled but could not be linked into a program.
    Link { log: String },
}

impl ShaderError {
    pub(crate) fn compile(stage: Stage, log: impl Into<String>) -> Self {
        ShaderError::Compile { stage, log: log.into() }
    }

    pub(crate) fn link(log: impl Into<String>) -> Self {
        ShaderError::Link { log: log.into() }
    }

    /// Compiler/linker output.
    pub fn log(&self) -> &str {
        match self {
            ShaderError::Compile { log, .. } | ShaderError::Link { log } => log,
        }
    }

    pub(crate) fn compile_from_gpu(stage: Stage, err: GpuError) -> Self {
        Self::compile(stage, err.message)
    }

    pub(crate) fn link_from_gpu(err: GpuError) -> Self {
        Self::link(err.message)
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile:\n{log}")
            }
            ShaderError::Link { log } => write!(f, "shader program failed to link:\n{log}"),
        }
    }
}

impl std::error::Error for ShaderError {}
