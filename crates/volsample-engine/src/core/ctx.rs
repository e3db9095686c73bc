use anyhow::{anyhow, Result};
use winit::window::Window;

use crate::device::{Gpu, SurfaceErrorAction};
use crate::render::{record_frame, ClearValues, RenderTarget, Viewport};

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Renders and presents one frame.
    ///
    /// Acquires the surface texture, sets a full-surface viewport, clears
    /// color and depth, lets `draw` record into the pass, then submits,
    /// probes for GPU errors and presents.
    ///
    /// Lost/outdated surfaces and timeouts skip the frame; out-of-memory is
    /// returned as an error.
    pub fn render<F>(&mut self, clear: ClearValues, draw: F) -> Result<()>
    where
        F: FnOnce(&mut wgpu::RenderPass<'_>),
    {
        let size = self.gpu.size();

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        Err(anyhow!("surface acquisition failed: out of memory"))
                    }
                    action => {
                        log::debug!("frame skipped ({action:?})");
                        Ok(())
                    }
                };
            }
        };

        {
            let target = RenderTarget {
                color_view: &frame.view,
                depth_view: self.gpu.depth_view(),
                viewport: Viewport::new(size.width, size.height),
            };
            record_frame(&mut frame.encoder, &target, clear, draw);
        }

        self.window.pre_present_notify();
        self.gpu.submit(frame)?;

        Ok(())
    }
}
