use crate::device::{Gpu, DEPTH_FORMAT};

/// Renderer-facing context (device/queue + target formats + device features).
///
/// This is intentionally small and stable.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub color_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
    pub features: wgpu::Features,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            device,
            queue,
            color_format,
            depth_format: DEPTH_FORMAT,
            features: device.features(),
        }
    }

    pub fn from_gpu(gpu: &'a Gpu<'_>) -> Self {
        Self::new(gpu.device(), gpu.queue(), gpu.surface_format())
    }
}

/// Viewport size in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Values the color and depth attachments are cleared to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearValues {
    pub color: wgpu::Color,
    pub depth: f32,
}

impl Default for ClearValues {
    fn default() -> Self {
        Self {
            color: wgpu::Color::BLACK,
            depth: 1.0,
        }
    }
}

/// Target for drawing (color + depth views and the viewport covering them).
pub struct RenderTarget<'a> {
    pub color_view: &'a wgpu::TextureView,
    pub depth_view: &'a wgpu::TextureView,
    pub viewport: Viewport,
}
