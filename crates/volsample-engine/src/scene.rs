//! Application state for the demo: everything created at startup and read
//! by every frame.

use anyhow::{Context, Result};

use crate::geometry::GeometryBuffer;
use crate::render::RenderCtx;
use crate::shader::ShaderProgram;
use crate::volume::{VolumeData, VolumeDesc, VolumeFilter, VolumeTexture};

/// Program, triangle and volume, built in that order.
///
/// Nothing here changes after [`build`](Self::build); every frame is a pure
/// function of this state.
pub struct VolumeScene {
    program: ShaderProgram,
    geometry: GeometryBuffer,
    volume: VolumeTexture,
}

impl VolumeScene {
    pub fn build(ctx: &RenderCtx<'_>, desc: &VolumeDesc) -> Result<Self> {
        let filter = VolumeFilter::for_features(ctx.features);
        if filter == VolumeFilter::Nearest {
            log::warn!("device lacks FLOAT32_FILTERABLE; sampling the volume with nearest filtering");
        }

        let program =
            ShaderProgram::volume(ctx, filter).context("failed to build shader program")?;

        let geometry = GeometryBuffer::upload(ctx.device).context("failed to upload triangle")?;

        let data = VolumeData::new(desc);
        let volume = VolumeTexture::upload(
            ctx,
            &data,
            program.volume_layout(),
            program.bindings(),
            filter,
        )
            .context("failed to upload volume texture")?;

        Ok(Self {
            program,
            geometry,
            volume,
        })
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    pub fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }

    pub fn volume(&self) -> &VolumeTexture {
        &self.volume
    }

    /// Records the single draw: 3 vertices as one triangle.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let group = self.program.bindings().group;

        pass.set_pipeline(self.program.pipeline());
        pass.set_bind_group(group, self.volume.bind_group(), &[]);
        pass.set_vertex_buffer(0, self.geometry.slice());
        pass.draw(0..self.geometry.vertex_count(), 0..1);
    }
}
