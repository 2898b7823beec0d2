/// Frame scheduling seam between the engine and whatever drives it.
///
/// The engine asks for a next frame at the end of every playing frame and
/// cancels on every stop. A host polls its scheduler and calls
/// `Engine::frame` when a frame is due.

use std::cell::Cell;
use std::rc::Rc;

pub trait FrameScheduler {
    fn schedule_next_frame(&mut self);
    /// Drop any pending request. Idempotent.
    fn cancel_scheduled(&mut self);
}

/// Single-slot scheduler: at most one frame is ever pending.
///
/// Clones share the slot. The terminal host paces frames itself and calls
/// `take` once per tick; tests call it in a loop against a `ManualClock`.
#[derive(Clone, Debug, Default)]
pub struct PendingFrame {
    pending: Rc<Cell<bool>>,
    requested: Rc<Cell<u64>>,
}

impl PendingFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request, if any.
    pub fn take(&self) -> bool {
        self.pending.replace(false)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Total number of frames ever requested.
    pub fn requested(&self) -> u64 {
        self.requested.get()
    }
}

impl FrameScheduler for PendingFrame {
    fn schedule_next_frame(&mut self) {
        self.pending.set(true);
        self.requested.set(self.requested.get() + 1);
    }

    fn cancel_scheduled(&mut self) {
        self.pending.set(false);
    }
}
