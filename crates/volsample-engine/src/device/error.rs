use std::fmt;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate.
    Fatal,
}

/// An error reported by the device while probing a group of GPU calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuError {
    /// Label of the probed step (e.g. "volume upload").
    pub stage: String,
    /// Driver description, or the error kind when the driver gave none.
    pub message: String,
}

impl GpuError {
    pub(crate) fn new(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self { stage: stage.into(), message: message.into() }
    }

    pub(crate) fn from_wgpu(stage: impl Into<String>, err: &wgpu::Error) -> Self {
        Self::new(stage, describe_error(&err.to_string(), error_kind(err)))
    }
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPU error in {}: {}", self.stage, self.message)
    }
}

impl std::error::Error for GpuError {}

/// Driver text when present, otherwise a kind-based fallback.
pub(crate) fn describe_error(text: &str, kind: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        format!("{kind} error (no description)")
    } else {
        text.to_string()
    }
}

#[allow(unreachable_patterns)]
fn error_kind(err: &wgpu::Error) -> &'static str {
    match err {
        wgpu::Error::OutOfMemory { .. } => "out-of-memory",
        wgpu::Error::Validation { .. } => "validation",
        wgpu::Error::Internal { .. } => "internal",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_text_is_kept() {
        assert_eq!(describe_error("  texture too large\n", "validation"), "texture too large");
    }

    #[test]
    fn empty_text_falls_back_to_kind() {
        assert_eq!(describe_error("", "out-of-memory"), "out-of-memory error (no description)");
    }

    #[test]
    fn display_names_stage() {
        let e = GpuError::new("volume upload", "bad extent");
        assert_eq!(e.to_string(), "GPU error in volume upload: bad extent");
    }
}
