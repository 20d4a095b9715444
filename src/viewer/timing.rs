//! Single-slot timer and frame bookkeeping.
//!
//! Both types are plain values driven by caller-supplied timestamps, so the
//! debounce and frame-coalescing rules can be exercised without a browser.
//! The DOM binding maps each slot onto at most one live `setTimeout` or
//! `requestAnimationFrame` handle.

/// A trailing-debounce timer with room for exactly one pending deadline.
///
/// Scheduling while a deadline is pending replaces it, so a burst of triggers
/// collapses into one firing `delay_ms` after the last trigger.
#[derive(Debug, Clone, Default)]
pub struct PendingTimer {
    deadline: Option<f64>,
}

impl PendingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)arm the timer. Returns the new deadline.
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64) -> f64 {
        let deadline = now_ms + delay_ms.max(0.0);
        self.deadline = Some(deadline);
        deadline
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Milliseconds until the deadline, or `None` when idle.
    pub fn remaining(&self, now_ms: f64) -> Option<f64> {
        self.deadline.map(|d| (d - now_ms).max(0.0))
    }

    /// Consume the deadline if it has passed.
    ///
    /// Returns `true` exactly once per armed deadline.
    pub fn fire_if_due(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Coalesces any number of requests into one pending animation frame.
#[derive(Debug, Clone, Default)]
pub struct FrameGate {
    requested: bool,
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a frame. Returns `true` only for the first request since the
    /// last frame, i.e. when the caller must actually schedule one.
    pub fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.requested, true)
    }

    /// Called at the start of a frame. Returns whether a request was pending.
    pub fn begin_frame(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    pub fn cancel(&mut self) {
        self.requested = false;
    }
}
