//! volsample engine crate.
//!
//! Owns the window + GPU runtime pieces and the fixed 3D texture sampling
//! pipeline (shader program, triangle geometry, volume texture) used by the
//! `volsample` demo binary.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod shader;
pub mod geometry;
pub mod volume;
pub mod render;
pub mod scene;
