use anyhow::{Context, Result};

/// Initialization parameters for the GPU layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends wgpu may pick from. `Backends::GL` restricts the demo to an
    /// OpenGL (core profile) context.
    pub backends: wgpu::Backends,

    pub power_preference: wgpu::PowerPreference,

    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO is broadly supported and matches a plain vsynced swap.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Features the device must have; device creation fails without them.
    pub required_features: wgpu::Features,

    /// Features requested only when the adapter offers them.
    ///
    /// `FLOAT32_FILTERABLE` lets the `R32Float` volume use linear filtering.
    pub optional_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            optional_features: wgpu::Features::FLOAT32_FILTERABLE,
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Features to request from `adapter`: all required ones plus the optional
    /// ones it supports.
    pub fn features_for(&self, adapter_features: wgpu::Features) -> wgpu::Features {
        self.required_features | (self.optional_features & adapter_features)
    }
}

/// Creates the logical device and queue for `adapter`.
///
/// Shared by the windowed [`Gpu`](super::Gpu) and headless callers.
pub async fn request_device(
    adapter: &wgpu::Adapter,
    init: &GpuInit,
) -> Result<(wgpu::Device, wgpu::Queue)> {
    let features = init.features_for(adapter.features());

    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("volsample device"),
            required_features: features,
            required_limits: init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")
}

/// One-line description of the graphics API in use.
pub fn describe_adapter(info: &wgpu::AdapterInfo) -> String {
    let driver = match (info.driver.is_empty(), info.driver_info.is_empty()) {
        (true, true) => "unknown driver".to_string(),
        (false, true) => info.driver.clone(),
        (true, false) => info.driver_info.clone(),
        (false, false) => format!("{} {}", info.driver, info.driver_info),
    };

    format!("{:?} on {} ({driver})", info.backend, info.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_features_filtered_by_adapter() {
        let init = GpuInit::default();
        assert_eq!(init.features_for(wgpu::Features::empty()), wgpu::Features::empty());
        assert!(init
            .features_for(wgpu::Features::FLOAT32_FILTERABLE)
            .contains(wgpu::Features::FLOAT32_FILTERABLE));
    }

    #[test]
    fn required_features_always_requested() {
        let init = GpuInit {
            required_features: wgpu::Features::DEPTH_CLIP_CONTROL,
            ..Default::default()
        };
        assert!(init
            .features_for(wgpu::Features::empty())
            .contains(wgpu::Features::DEPTH_CLIP_CONTROL));
    }
}
