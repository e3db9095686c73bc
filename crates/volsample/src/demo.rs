use anyhow::{anyhow, Result};

use volsample_engine::core::{App, FrameCtx};
use volsample_engine::device::Gpu;
use volsample_engine::render::{ClearValues, RenderCtx};
use volsample_engine::scene::VolumeScene;
use volsample_engine::volume::VolumeDesc;

/// The demo application: build the scene once, draw it every frame.
#[derive(Default)]
pub struct VolumeDemo {
    scene: Option<VolumeScene>,
}

impl App for VolumeDemo {
    fn on_start(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let ctx = RenderCtx::from_gpu(gpu);
        self.scene = Some(VolumeScene::build(&ctx, &VolumeDesc::default())?);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<()> {
        let scene = self
            .scene
            .as_ref()
            .ok_or_else(|| anyhow!("frame requested before the scene was built"))?;

        ctx.render(ClearValues::default(), |pass| scene.draw(pass))
    }
}
