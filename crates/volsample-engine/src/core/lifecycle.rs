use crate::input::{EventQueue, ExitFlag, HostEvent};

/// Whole-program state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    /// Nothing created yet.
    Uninitialized,
    /// Window, context and GPU resources exist; no frame rendered yet.
    Ready,
    Rendering,
    Terminated,
}

/// Drives the render loop from delivered host events.
///
/// The runtime calls [`deliver`](Self::deliver) from window callbacks and
/// [`next_iteration`](Self::next_iteration) once per loop turn, after pending
/// platform events were dispatched. The exit flag is only checked at the top
/// of an iteration, so an exit request never interrupts a frame in progress.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    queue: EventQueue,
    exit: ExitFlag,
    frames: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Uninitialized,
            queue: EventQueue::new(),
            exit: ExitFlag::new(),
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn exit_requested(&self) -> bool {
        self.exit.is_set()
    }

    /// Frames started so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Startup finished: window, context and GPU resources exist.
    pub fn mark_ready(&mut self) {
        if self.state == LoopState::Uninitialized {
            self.state = LoopState::Ready;
        }
    }

    /// Setup or a frame failed; no further iterations run.
    pub fn terminate(&mut self) {
        self.state = LoopState::Terminated;
    }

    /// Queues an event for handling at the next iteration.
    pub fn deliver(&mut self, ev: HostEvent) {
        self.queue.push(ev);
    }

    /// Handles queued events and decides whether to render another frame.
    ///
    /// Returns `true` when a frame should be rendered now.
    pub fn next_iteration(&mut self) -> bool {
        self.exit.fold(self.queue.drain());

        match self.state {
            LoopState::Uninitialized | LoopState::Terminated => false,
            LoopState::Ready | LoopState::Rendering => {
                if self.exit.is_set() {
                    log::info!("exit requested after {} frame(s)", self.frames);
                    self.state = LoopState::Terminated;
                    false
                } else {
                    self.state = LoopState::Rendering;
                    self.frames = self.frames.wrapping_add(1);
                    true
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyAction};

    fn ready() -> FrameLoop {
        let mut l = FrameLoop::new();
        l.mark_ready();
        l
    }

    #[test]
    fn no_frames_before_startup() {
        let mut l = FrameLoop::new();
        assert!(!l.next_iteration());
        assert_eq!(l.state(), LoopState::Uninitialized);
    }

    #[test]
    fn renders_while_flag_clear() {
        let mut l = ready();
        assert!(l.next_iteration());
        assert!(l.next_iteration());
        assert_eq!(l.frames(), 2);
        assert_eq!(l.state(), LoopState::Rendering);
    }

    #[test]
    fn close_request_stops_after_current_frame() {
        let mut l = ready();
        assert!(l.next_iteration());

        // Delivered while frame 1 is in flight.
        l.deliver(HostEvent::CloseRequested);

        assert!(!l.next_iteration());
        assert!(!l.next_iteration());
        assert_eq!(l.frames(), 1);
        assert_eq!(l.state(), LoopState::Terminated);
    }

    #[test]
    fn escape_press_stops_loop() {
        let mut l = ready();
        assert!(l.next_iteration());
        l.deliver(HostEvent::Key { key: Key::Escape, action: KeyAction::Press });
        assert!(!l.next_iteration());
        assert_eq!(l.frames(), 1);
    }

    #[test]
    fn ignored_events_keep_rendering() {
        let mut l = ready();
        l.deliver(HostEvent::Key { key: Key::Escape, action: KeyAction::Release });
        l.deliver(HostEvent::Key { key: Key::Unknown(42), action: KeyAction::Press });
        assert!(l.next_iteration());
        assert!(!l.exit_requested());
    }

    #[test]
    fn exit_before_first_frame_renders_nothing() {
        let mut l = ready();
        l.deliver(HostEvent::CloseRequested);
        assert!(!l.next_iteration());
        assert_eq!(l.frames(), 0);
    }

    #[test]
    fn terminated_loop_stays_down() {
        let mut l = ready();
        l.terminate();
        assert!(!l.next_iteration());
        assert_eq!(l.state(), LoopState::Terminated);
    }
}
