//! # Redraw Coalescing
//!
//! Pointer-move floods would otherwise trigger a full repaint per event. Mutations
//! only mark the surface dirty; the host calls `Surface::flush` from its frame loop
//! and a repaint happens at most once per interval. Every repaint is a full
//! clear-and-repaint, so the order of requests within a batch does not matter.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct RedrawScheduler {
    interval: Duration,
    dirty: bool,
    last_paint: Option<Instant>,
}

impl RedrawScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            dirty: false,
            last_paint: None,
        }
    }

    /// Marks the surface as needing a repaint.
    pub fn request(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True if a repaint is pending and the batch window since the last paint has passed.
    pub fn is_due(&self, now: Instant) -> bool {
        self.dirty
            && self
                .last_paint
                .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }

    /// Records that a full repaint happened at `now`.
    pub fn mark_painted(&mut self, now: Instant) {
        self.dirty = false;
        self.last_paint = Some(now);
    }
}
