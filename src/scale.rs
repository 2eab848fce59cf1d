//! Display scaling and resize debouncing.
//!
//! The canvas backing store is always the configured size; only its CSS size
//! follows the viewport. [`canvas_sizing`] computes both from the viewport
//! width. [`Debouncer`] collapses bursts of resize notifications into a single
//! recompute once the viewport has been quiet for the configured period.

#[cfg(test)]
#[path = "scale_test.rs"]
mod scale_test;

use crate::config::GridConfig;
use crate::consts::MAX_DISPLAY_WIDTH;

/// Backing-store and display dimensions for the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSizing {
    /// Display size divided by backing size.
    pub scale: f64,
    pub backing_width: u32,
    pub backing_height: u32,
    /// CSS width in pixels.
    pub display_width: f64,
    /// CSS height in pixels.
    pub display_height: f64,
}

/// Scale that fits the configured canvas into the viewport, capped at the maximum display width.
#[must_use]
pub fn display_scale(config: &GridConfig, viewport_width: f64) -> f64 {
    viewport_width.clamp(0.0, MAX_DISPLAY_WIDTH) / config.width
}

/// Compute canvas dimensions for a viewport width.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn canvas_sizing(config: &GridConfig, viewport_width: f64) -> CanvasSizing {
    let scale = display_scale(config, viewport_width);
    CanvasSizing {
        scale,
        backing_width: config.width.round() as u32,
        backing_height: config.height.round() as u32,
        display_width: config.width * scale,
        display_height: config.height * scale,
    }
}

/// Handle for one debounce trigger. Only the most recent ticket can settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Trailing-edge debouncer.
///
/// Each [`Debouncer::trigger`] supersedes the previous one. The owner arms a
/// timer for [`Debouncer::quiet_ms`] carrying the returned ticket; when it
/// fires, [`Debouncer::settle`] says whether that ticket is still the latest,
/// so a burst of triggers yields a single recompute.
#[derive(Debug)]
pub struct Debouncer {
    quiet_ms: u32,
    generation: u64,
    pending: bool,
}

impl Debouncer {
    #[must_use]
    pub fn new(quiet_ms: u32) -> Self {
        Self { quiet_ms, generation: 0, pending: false }
    }

    /// Quiet period in milliseconds.
    #[must_use]
    pub fn quiet_ms(&self) -> u32 {
        self.quiet_ms
    }

    /// Register a notification, superseding any pending one.
    pub fn trigger(&mut self) -> DebounceTicket {
        self.generation += 1;
        self.pending = true;
        DebounceTicket(self.generation)
    }

    /// Timer callback for `ticket`. Returns `true` if the recompute should run now.
    pub fn settle(&mut self, ticket: DebounceTicket) -> bool {
        if ticket.0 != self.generation || !self.pending {
            return false;
        }
        self.pending = false;
        true
    }
}
