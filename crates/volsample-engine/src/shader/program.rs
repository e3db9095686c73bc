use crate::device::ErrorProbe;
use crate::geometry::Vertex;
use crate::render::RenderCtx;
use crate::volume::VolumeFilter;

use super::error::ShaderError;
use super::source::{compile, link_interface, CompiledStage, StageSource, VolumeBindings};

/// A linked vertex + fragment pair, ready to draw the volume triangle.
///
/// Built once at startup and never modified afterwards.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    volume_layout: wgpu::BindGroupLayout,
    bindings: VolumeBindings,
}

impl ShaderProgram {
    /// Builds the program from the embedded volume shaders.
    pub fn volume(ctx: &RenderCtx<'_>, filter: VolumeFilter) -> Result<Self, ShaderError> {
        Self::build(
            ctx,
            &StageSource::volume_vertex(),
            &StageSource::volume_fragment(),
            filter,
        )
    }

    /// Compiles both stages, checks their interface, and links them into a
    /// render pipeline targeting `ctx`'s color and depth formats.
    pub fn build(
        ctx: &RenderCtx<'_>,
        vertex: &StageSource,
        fragment: &StageSource,
        filter: VolumeFilter,
    ) -> Result<Self, ShaderError> {
        let vs = compile(vertex)?;
        let fs = compile(fragment)?;
        let bindings = link_interface(&vs, &fs)?;

        let vs_module = create_module(ctx.device, &vs)?;
        let fs_module = create_module(ctx.device, &fs)?;

        let (volume_layout, pipeline) = ErrorProbe::check(ctx.device, "shader link", || {
            let volume_layout =
                ctx.device
                    .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                        label: Some("volsample volume bgl"),
                        entries: &[
                            wgpu::BindGroupLayoutEntry {
                                binding: bindings.texture,
                                visibility: wgpu::ShaderStages::FRAGMENT,
                                ty: wgpu::BindingType::Texture {
                                    sample_type: filter.sample_type(),
                                    view_dimension: wgpu::TextureViewDimension::D3,
                                    multisampled: false,
                                },
                                count: None,
                            },
                            wgpu::BindGroupLayoutEntry {
                                binding: bindings.sampler,
                                visibility: wgpu::ShaderStages::FRAGMENT,
                                ty: wgpu::BindingType::Sampler(filter.sampler_binding()),
                                count: None,
                            },
                        ],
                    });

            let pipeline_layout =
                ctx.device
                    .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                        label: Some("volsample pipeline layout"),
                        bind_group_layouts: &[&volume_layout],
                        immediate_size: 0,
                    });

            let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("volsample pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &vs_module,
                    entry_point: Some(vs.stage.entry_point()),
                    compilation_options: Default::default(),
                    buffers: &[Vertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &fs_module,
                    entry_point: Some(fs.stage.entry_point()),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.color_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: Some(wgpu::DepthStencilState {
                    format: ctx.depth_format,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            });

            (volume_layout, pipeline)
        })
        .map_err(ShaderError::link_from_gpu)?;

        log::info!("shader program linked ({} + {})", vs.label, fs.label);

        Ok(Self {
            pipeline,
            volume_layout,
            bindings,
        })
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }

    /// Layout the volume bind group must be created against.
    pub fn volume_layout(&self) -> &wgpu::BindGroupLayout {
        &self.volume_layout
    }

    /// Resolved location of `uVolume` and its sampler.
    pub fn bindings(&self) -> VolumeBindings {
        self.bindings
    }
}

fn create_module(
    device: &wgpu::Device,
    stage: &CompiledStage,
) -> Result<wgpu::ShaderModule, ShaderError> {
    ErrorProbe::check(device, stage.label, || {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(stage.label),
            source: wgpu::ShaderSource::Wgsl(stage.wgsl.clone()),
        })
    })
    .map_err(|e| ShaderError::compile_from_gpu(stage.stage, e))
}
