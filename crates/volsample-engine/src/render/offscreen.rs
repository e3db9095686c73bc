use anyhow::{Context, Result};

use crate::device::{create_depth_view, ErrorProbe};

use super::ctx::{ClearValues, RenderTarget, Viewport};
use super::frame::record_frame;

/// Color format of offscreen targets (one byte per channel, no sRGB encoding).
const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Texture-backed render target whose pixels can be copied back to the host.
///
/// Used to check a rendered frame without a window.
pub struct OffscreenTarget {
    color: wgpu::Texture,
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    viewport: Viewport,
}

impl OffscreenTarget {
    pub const FORMAT: wgpu::TextureFormat = OFFSCREEN_FORMAT;

    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("volsample offscreen color"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = create_depth_view(device, width, height);

        Self {
            color,
            color_view,
            depth_view,
            viewport: Viewport::new(width, height),
        }
    }

    /// Renders one frame into the target and returns its RGBA8 pixels,
    /// row-major, top row first.
    pub fn render_and_read<F>(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        clear: ClearValues,
        draw: F,
    ) -> Result<Vec<u8>>
    where
        F: FnOnce(&mut wgpu::RenderPass<'_>),
    {
        let Viewport { width, height } = self.viewport;
        let unpadded_row = width * 4;
        let padded_row = padded_bytes_per_row(unpadded_row);

        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("volsample offscreen readback"),
            size: u64::from(padded_row) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let probe = ErrorProbe::begin(device, "offscreen frame");

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("volsample offscreen encoder"),
        });

        let target = RenderTarget {
            color_view: &self.color_view,
            depth_view: &self.depth_view,
            viewport: self.viewport,
        };
        record_frame(&mut encoder, &target, clear, draw);

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.color,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        queue.submit(std::iter::once(encoder.finish()));
        probe.finish()?;

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        device
            .poll(wgpu::PollType::wait_indefinitely())
            .context("failed to wait for readback")?;
        rx.recv()
            .context("readback callback dropped")?
            .context("failed to map readback buffer")?;

        let mut pixels = Vec::with_capacity((unpadded_row * height) as usize);
        {
            let mapped = slice.get_mapped_range();
            for row in mapped.chunks(padded_row as usize) {
                pixels.extend_from_slice(&row[..unpadded_row as usize]);
            }
        }
        readback.unmap();

        Ok(pixels)
    }
}

/// Rounds a row size up to wgpu's copy alignment.
fn padded_bytes_per_row(unpadded: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_copy_alignment() {
        assert_eq!(padded_bytes_per_row(4), 256);
        assert_eq!(padded_bytes_per_row(256), 256);
        assert_eq!(padded_bytes_per_row(257), 512);
    }
}
