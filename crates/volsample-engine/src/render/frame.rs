use super::ctx::{ClearValues, RenderTarget};

/// Records one frame into `encoder`.
///
/// Sets the viewport to the full target, clears color and depth, then hands
/// the pass to `draw`. The pass ends before this returns.
pub fn record_frame<F>(
    encoder: &mut wgpu::CommandEncoder,
    target: &RenderTarget<'_>,
    clear: ClearValues,
    draw: F,
) where
    F: FnOnce(&mut wgpu::RenderPass<'_>),
{
    let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("volsample frame pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear.color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: target.depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear.depth),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    if target.viewport.is_valid() {
        rpass.set_viewport(
            0.0,
            0.0,
            target.viewport.width as f32,
            target.viewport.height as f32,
            0.0,
            1.0,
        );
    }

    draw(&mut rpass);
}
