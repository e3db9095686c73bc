//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the
//! application, the per-frame context, and the loop lifecycle.

mod app;
mod ctx;
mod lifecycle;

pub use app::App;
pub use ctx::FrameCtx;
pub use lifecycle::{FrameLoop, LoopState};
