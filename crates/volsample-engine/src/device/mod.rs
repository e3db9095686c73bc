//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) and its depth buffer
//! - acquiring and presenting frames
//! - probing the device for pending errors after GPU calls

mod error;
mod gpu;
mod init;
mod probe;

pub use error::{GpuError, SurfaceErrorAction};
pub use gpu::{Gpu, GpuFrame, DEPTH_FORMAT};
pub(crate) use gpu::create_depth_view;
pub use init::{describe_adapter, request_device, GpuInit};
pub use probe::ErrorProbe;
