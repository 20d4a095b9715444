//! Header and nav height tracking.
//!
//! Header height is re-measured after a trailing debounce (mount, window
//! resize and header resize all share one timer slot) and published one
//! animation frame after the measurement. Nav height is only measured while
//! the nav is in normal flow.

use serde::Serialize;

use super::sticky::StickyState;
use super::timing::{FrameGate, PendingTimer};
use crate::types::GalleryConfig;

/// Source of live element measurements.
///
/// `None` means the value cannot be measured (element missing, capability
/// unsupported); the tracker then keeps its fallback.
pub trait LayoutProbe {
    /// Current rendered height of the header element.
    fn header_height(&self) -> Option<f64>;
    /// Current rendered height of the nav element.
    fn nav_height(&self) -> Option<f64>;
    /// Document-relative top of the nav element in its resting position.
    fn nav_top(&self) -> Option<f64>;
}

/// Published viewport metrics, read by the sticky controller and surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportMetrics {
    pub header_height: f64,
    pub nav_height: f64,
    /// Captured once per mount on the first tick after mounting
    pub initial_nav_top: Option<f64>,
}

/// What the owner must do after a timer callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerOutcome {
    /// Nothing pending
    Idle,
    /// The timer fired early; arm it again for this many milliseconds
    Reschedule(f64),
    /// A measurement was staged; schedule an animation frame to publish it
    RequestFrame,
}

#[derive(Debug, Clone)]
pub struct MetricsTracker {
    published: ViewportMetrics,
    staged_header: Option<f64>,
    debounce: PendingTimer,
    publish: FrameGate,
    /// The mount-time measurement has not fired yet
    awaiting_initial: bool,
    debounce_ms: f64,
    initial_delay_ms: f64,
    fallback_header: f64,
    fallback_nav: f64,
}

fn sanitize(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite()).map(|v| v.max(0.0))
}

impl MetricsTracker {
    pub fn new(config: &GalleryConfig) -> Self {
        let fallback_header = config.fallback_header_height.max(0.0);
        let fallback_nav = config.fallback_nav_height.max(0.0);
        Self {
            published: ViewportMetrics {
                header_height: fallback_header,
                nav_height: fallback_nav,
                initial_nav_top: None,
            },
            staged_header: None,
            debounce: PendingTimer::new(),
            publish: FrameGate::new(),
            awaiting_initial: false,
            debounce_ms: f64::from(config.resize_debounce_ms),
            initial_delay_ms: f64::from(config.initial_measure_delay_ms),
            fallback_header,
            fallback_nav,
        }
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.published
    }

    /// Start tracking. Forgets the captured nav origin and arms the initial
    /// measurement. Returns the delay to arm the timer with.
    pub fn mount(&mut self, now_ms: f64) -> f64 {
        self.published.initial_nav_top = None;
        self.staged_header = None;
        self.publish.cancel();
        self.awaiting_initial = true;
        self.debounce.schedule(now_ms, self.initial_delay_ms);
        self.initial_delay_ms
    }

    /// Window resize or header resize. Both share the same debounce slot.
    /// Returns the delay to arm the timer with.
    pub fn on_resize(&mut self, now_ms: f64) -> f64 {
        self.debounce.schedule(now_ms, self.debounce_ms);
        self.debounce_ms
    }

    /// Header element resized. Returns `None` while the mount-time
    /// measurement is still pending, since it reads the header anyway
    /// (a ResizeObserver reports every observed element once on observe).
    pub fn on_header_resize(&mut self, now_ms: f64) -> Option<f64> {
        if self.awaiting_initial {
            return None;
        }
        Some(self.on_resize(now_ms))
    }

    /// Timer callback. Measures the header once the quiet window has passed.
    pub fn on_timer(&mut self, now_ms: f64, probe: &dyn LayoutProbe) -> TimerOutcome {
        if self.debounce.fire_if_due(now_ms) {
            self.awaiting_initial = false;
            let height = sanitize(probe.header_height()).unwrap_or(self.fallback_header);
            self.staged_header = Some(height);
            self.publish.request();
            return TimerOutcome::RequestFrame;
        }
        match self.debounce.remaining(now_ms) {
            Some(remaining) => TimerOutcome::Reschedule(remaining),
            None => TimerOutcome::Idle,
        }
    }

    /// Whether a staged measurement is waiting for a frame.
    pub fn wants_frame(&self) -> bool {
        self.publish.is_requested()
    }

    /// Animation-frame callback. Publishes a staged header height and
    /// returns `true` if the published value changed.
    pub fn on_frame(&mut self) -> bool {
        if !self.publish.begin_frame() {
            return false;
        }
        let Some(height) = self.staged_header.take() else {
            return false;
        };
        let changed = (self.published.header_height - height).abs() > f64::EPSILON;
        self.published.header_height = height;
        if changed {
            tracing::debug!(header_height = height, "header height published");
        }
        changed
    }

    /// Capture the nav's resting position if it has not been captured since
    /// mount. Returns `true` when it was captured by this call.
    pub fn capture_nav_origin(&mut self, probe: &dyn LayoutProbe) -> bool {
        if self.published.initial_nav_top.is_some() {
            return false;
        }
        match sanitize(probe.nav_top()) {
            Some(top) => {
                self.published.initial_nav_top = Some(top);
                tracing::debug!(initial_nav_top = top, "nav origin captured");
                true
            }
            None => false,
        }
    }

    /// Re-measure the nav height. Ignored while pinned, when the fixed
    /// element's size says nothing about the flow space it left behind.
    pub fn refresh_nav_height(&mut self, probe: &dyn LayoutProbe, sticky: &StickyState) -> bool {
        if sticky.is_pinned() {
            return false;
        }
        let height = sanitize(probe.nav_height()).unwrap_or(self.fallback_nav);
        let changed = (self.published.nav_height - height).abs() > f64::EPSILON;
        self.published.nav_height = height;
        changed
    }

    /// Drop every pending timer and frame.
    pub fn unmount(&mut self) {
        self.debounce.cancel();
        self.publish.cancel();
        self.staged_header = None;
        self.awaiting_initial = false;
    }

    /// Whether the debounce slot is armed.
    pub fn timer_pending(&self) -> bool {
        self.debounce.is_pending()
    }
}
