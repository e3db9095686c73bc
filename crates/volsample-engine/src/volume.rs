//! Volume texture.
//!
//! A single-channel `R32Float` 3D texture, filled on the host and uploaded
//! once. It is bound at group 0 ("texture unit 0") next to its sampler, for
//! the fragment stage's `uVolume` uniform.

use crate::device::{ErrorProbe, GpuError};
use crate::render::RenderCtx;
use crate::shader::VolumeBindings;

pub const VOLUME_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R32Float;

/// Bytes per sample of [`VOLUME_FORMAT`].
const SAMPLE_SIZE: u32 = std::mem::size_of::<f32>() as u32;

/// Volume dimensions in samples.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VolumeExtent {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl VolumeExtent {
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self { width, height, depth }
    }

    pub fn sample_count(self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    pub fn bytes_per_row(self) -> u32 {
        self.width * SAMPLE_SIZE
    }

    pub fn to_wgpu(self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: self.depth,
        }
    }
}

/// What to allocate and how to fill it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VolumeDesc {
    pub extent: VolumeExtent,
    /// Value of every sample.
    pub fill: f32,
}

impl Default for VolumeDesc {
    fn default() -> Self {
        Self {
            extent: VolumeExtent::new(16, 256, 256),
            fill: 1.0,
        }
    }
}

/// Host-side samples, x fastest, then y, then z.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeData {
    extent: VolumeExtent,
    samples: Vec<f32>,
}

impl VolumeData {
    /// Allocates a flat volume: every sample equals `desc.fill`.
    pub fn new(desc: &VolumeDesc) -> Self {
        Self {
            extent: desc.extent,
            samples: vec![desc.fill; desc.extent.sample_count()],
        }
    }

    pub fn extent(&self) -> VolumeExtent {
        self.extent
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.samples)
    }
}

/// Filtering applied when sampling the volume.
///
/// `R32Float` is only filterable with `Features::FLOAT32_FILTERABLE`; without
/// it the volume is sampled with nearest filtering.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum VolumeFilter {
    Linear,
    Nearest,
}

impl VolumeFilter {
    pub fn for_features(features: wgpu::Features) -> Self {
        if features.contains(wgpu::Features::FLOAT32_FILTERABLE) {
            VolumeFilter::Linear
        } else {
            VolumeFilter::Nearest
        }
    }

    pub fn filter_mode(self) -> wgpu::FilterMode {
        match self {
            VolumeFilter::Linear => wgpu::FilterMode::Linear,
            VolumeFilter::Nearest => wgpu::FilterMode::Nearest,
        }
    }

    pub fn sample_type(self) -> wgpu::TextureSampleType {
        wgpu::TextureSampleType::Float {
            filterable: self == VolumeFilter::Linear,
        }
    }

    pub fn sampler_binding(self) -> wgpu::SamplerBindingType {
        match self {
            VolumeFilter::Linear => wgpu::SamplerBindingType::Filtering,
            VolumeFilter::Nearest => wgpu::SamplerBindingType::NonFiltering,
        }
    }
}

/// The uploaded volume and its group-0 bind group.
pub struct VolumeTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl VolumeTexture {
    /// Creates the texture, uploads `data`, and binds it against `layout`
    /// (the program's group-0 layout) at the slots `bindings` resolved from
    /// the fragment stage. Runs once at startup.
    pub fn upload(
        ctx: &RenderCtx<'_>,
        data: &VolumeData,
        layout: &wgpu::BindGroupLayout,
        bindings: VolumeBindings,
        filter: VolumeFilter,
    ) -> Result<Self, GpuError> {
        let extent = data.extent();

        let texture = ErrorProbe::check(ctx.device, "volume upload", || {
            let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("volsample volume"),
                size: extent.to_wgpu(),
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D3,
                format: VOLUME_FORMAT,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });

            ctx.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                data.as_bytes(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(extent.bytes_per_row()),
                    rows_per_image: Some(extent.height),
                },
                extent.to_wgpu(),
            );

            texture
        })?;

        let bind_group = ErrorProbe::check(ctx.device, "volume binding", || {
            let view = texture.create_view(&wgpu::TextureViewDescriptor {
                label: Some("volsample volume view"),
                dimension: Some(wgpu::TextureViewDimension::D3),
                ..Default::default()
            });

            let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("volsample volume sampler"),
                mag_filter: filter.filter_mode(),
                min_filter: filter.filter_mode(),
                ..Default::default()
            });

            ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("volsample volume bind group"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: bindings.texture,
                        resource: wgpu::BindingResource::TextureView(&view),
                    },
                    wgpu::BindGroupEntry {
                        binding: bindings.sampler,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            })
        })?;

        log::info!(
            "uploaded {}x{}x{} {:?} volume ({:?} filtering)",
            extent.width,
            extent.height,
            extent.depth,
            VOLUME_FORMAT,
            filter,
        );

        Ok(Self { texture, bind_group })
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_volume_is_flat_and_full_size() {
        let data = VolumeData::new(&VolumeDesc::default());
        assert_eq!(data.samples().len(), 16 * 256 * 256);
        assert_eq!(data.samples().len(), 1_048_576);
        assert!(data.samples().iter().all(|&s| s == 1.0));
    }

    #[test]
    fn byte_view_matches_sample_count() {
        let data = VolumeData::new(&VolumeDesc::default());
        assert_eq!(data.as_bytes().len(), 1_048_576 * 4);
    }

    #[test]
    fn rows_are_one_width_of_floats() {
        let extent = VolumeDesc::default().extent;
        assert_eq!(extent.bytes_per_row(), 64);
        assert_eq!(
            extent.to_wgpu(),
            wgpu::Extent3d { width: 16, height: 256, depth_or_array_layers: 256 }
        );
    }

    #[test]
    fn custom_fill() {
        let data = VolumeData::new(&VolumeDesc {
            extent: VolumeExtent::new(2, 3, 4),
            fill: 0.25,
        });
        assert_eq!(data.samples(), &[0.25; 24]);
    }

    #[test]
    fn filter_follows_float32_filterable() {
        assert_eq!(
            VolumeFilter::for_features(wgpu::Features::FLOAT32_FILTERABLE),
            VolumeFilter::Linear
        );
        assert_eq!(VolumeFilter::for_features(wgpu::Features::empty()), VolumeFilter::Nearest);
    }

    #[test]
    fn nearest_uses_non_filtering_bindings() {
        let f = VolumeFilter::Nearest;
        assert_eq!(f.sampler_binding(), wgpu::SamplerBindingType::NonFiltering);
        assert_eq!(f.sample_type(), wgpu::TextureSampleType::Float { filterable: false });
        assert_eq!(f.filter_mode(), wgpu::FilterMode::Nearest);
    }
}
