use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, FrameCtx, FrameLoop, LoopState};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Window size in physical pixels.
    pub size: PhysicalSize<u32>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Testapp".to_string(),
            size: PhysicalSize::new(768, 768),
            resizable: false,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, runs `app` until an exit is requested, then tears
    /// the window and context down.
    ///
    /// Returns the first fatal error raised during setup or rendering.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to initialize the windowing system")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.shutdown()
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    frame_loop: FrameLoop,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            frame_loop: FrameLoop::new(),
            failure: None,
        }
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntry::try_new(window, |w| {
            pollster::block_on(Gpu::new(w, gpu_init)).context("failed to create rendering context")
        })
    }

    /// Window, context, then the application's GPU resources.
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let entry = self.create_window_entry(event_loop)?;
        entry.with_gpu(|gpu| self.app.on_start(gpu))?;
        self.entry = Some(entry);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.frame_loop.terminate();
        self.failure.get_or_insert(err);
        event_loop.exit();
    }

    fn render_frame(&mut self) -> Result<()> {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return Err(anyhow!("no window to render into"));
        };

        entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
            };
            app.on_frame(&mut ctx)
        })
    }

    /// Releases the window and context; reports how the loop ended.
    fn shutdown(&mut self) -> Result<()> {
        if self.entry.take().is_some() {
            log::info!("window and context released");
        }

        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.frame_loop.state() != LoopState::Uninitialized {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Poll);

        match self.start(event_loop) {
            Ok(()) => self.frame_loop.mark_ready(),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Delivery only; handled at the top of the next iteration.
        if let Some(ev) = translate_window_event(&event) {
            self.frame_loop.deliver(ev);
        }
    }

    /// One loop iteration: pending events have been dispatched, so check the
    /// exit flag, then render and present a frame.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.frame_loop.state() == LoopState::Uninitialized {
            return;
        }

        if !self.frame_loop.next_iteration() {
            event_loop.exit();
            return;
        }

        if let Err(e) = self.render_frame() {
            self.fail(event_loop, e.context("frame rendering failed"));
        }
    }
}
