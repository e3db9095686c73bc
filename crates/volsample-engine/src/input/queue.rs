use super::types::HostEvent;

/// FIFO of host events awaiting handling.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<HostEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ev: HostEvent) {
        self.pending.push(ev);
    }

    /// Takes every pending event in arrival order.
    pub fn drain(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.pending)
    }
}
