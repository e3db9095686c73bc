//! Frame rendering.
//!
//! One pass per frame: full-surface viewport, clear, the caller's draw calls.
//! The same recording targets either the window surface or an offscreen
//! texture that can be read back.

mod ctx;
mod frame;
mod offscreen;

pub use ctx::{ClearValues, RenderCtx, RenderTarget, Viewport};
pub use frame::record_frame;
pub use offscreen::OffscreenTarget;
