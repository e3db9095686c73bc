use super::error::GpuError;

/// Synchronous error check around a group of GPU calls.
///
/// `begin` opens error scopes on the device; `finish` closes them and blocks
/// until the device reports whether anything inside failed. A pending error
/// is logged and returned; there is no recovery path.
///
/// ```ignore
/// let probe = ErrorProbe::begin(device, "volume upload");
/// queue.write_texture(...);
/// probe.finish()?;
/// ```
pub struct ErrorProbe {
    stage: String,
    // Innermost scope last; popped in reverse push order.
    scopes: Vec<wgpu::ErrorScopeGuard>,
}

impl ErrorProbe {
    pub fn begin(device: &wgpu::Device, stage: impl Into<String>) -> Self {
        let scopes = vec![
            device.push_error_scope(wgpu::ErrorFilter::OutOfMemory),
            device.push_error_scope(wgpu::ErrorFilter::Internal),
            device.push_error_scope(wgpu::ErrorFilter::Validation),
        ];

        Self { stage: stage.into(), scopes }
    }

    /// Runs `f` inside a probe.
    pub fn check<T>(
        device: &wgpu::Device,
        stage: impl Into<String>,
        f: impl FnOnce() -> T,
    ) -> Result<T, GpuError> {
        let probe = Self::begin(device, stage);
        let value = f();
        probe.finish()?;
        Ok(value)
    }

    /// Closes the scopes; returns the first reported error, if any.
    pub fn finish(mut self) -> Result<(), GpuError> {
        let mut first: Option<wgpu::Error> = None;

        // Every scope must be popped, even after an error was found.
        while let Some(scope) = self.scopes.pop() {
            if let Some(err) = pollster::block_on(scope.pop()) {
                first.get_or_insert(err);
            }
        }

        match first {
            None => Ok(()),
            Some(err) => {
                let err = GpuError::from_wgpu(&self.stage, &err);
                log::error!("encountered a GPU error in {}: {}", err.stage, err.message);
                Err(err)
            }
        }
    }
}
