use anyhow::Result;

use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Application contract implemented by the demo.
///
/// Any `Err` returned here is fatal: the runtime stops the loop, tears the
/// window down and hands the error back from `Runtime::run`.
pub trait App {
    /// Called once, after the window and GPU context exist and before the
    /// first frame. GPU resources are created here.
    fn on_start(&mut self, gpu: &Gpu<'_>) -> Result<()>;

    /// Called once per loop iteration while the exit flag is clear.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<()>;
}
