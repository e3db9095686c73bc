//! Shader program builder.
//!
//! Each stage is compiled on its own from embedded WGSL (parse + validate,
//! keeping the compiler's diagnostics), then both are linked into one render
//! pipeline. Any failure is returned as a [`ShaderError`].

mod error;
mod program;
mod source;

pub use error::ShaderError;
pub use program::ShaderProgram;
pub use source::{
    compile, link_interface, CompiledStage, Stage, StageSource, VolumeBindings, FRAGMENT_ENTRY,
    VERTEX_ENTRY, VOLUME_SAMPLER_UNIFORM, VOLUME_UNIFORM,
};
