//! Host input events.
//!
//! Window callbacks only *deliver* events: the runtime translates platform
//! events into [`HostEvent`] records and pushes them into an [`EventQueue`].
//! *Handling* happens once per loop iteration, when the queue is drained and
//! folded into the [`ExitFlag`].

mod exit;
mod queue;
mod types;

pub mod platform;

pub use exit::ExitFlag;
pub use queue::EventQueue;
pub use types::{HostEvent, Key, KeyAction};
