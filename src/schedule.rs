//! Redraw coalescing.
//!
//! Any number of redraw requests between two animation frames collapse into
//! one frame callback. The callback paints from the owner's state as it is
//! when the frame runs, so it always sees the latest merged cells.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

/// Tracks whether an animation-frame redraw is already queued.
#[derive(Debug)]
pub struct RedrawScheduler {
    pending: bool,
    enabled: bool,
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RedrawScheduler {
    /// A scheduler that accepts requests immediately.
    #[must_use]
    pub fn new() -> Self {
        Self { pending: false, enabled: true }
    }

    /// Ask for a redraw. Returns `true` if the caller must queue a frame callback.
    pub fn request(&mut self) -> bool {
        if !self.enabled || self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Called from the frame callback. Returns `true` if the frame should paint.
    pub fn begin_frame(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        self.enabled
    }

    /// Undo a request whose frame callback could not be queued.
    pub fn abandon(&mut self) {
        self.pending = false;
    }

    /// Stop accepting requests. Any queued frame becomes a no-op.
    pub fn shutdown(&mut self) {
        self.enabled = false;
    }
}
