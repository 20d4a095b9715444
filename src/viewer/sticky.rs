//! Sticky navigation state machine.
//!
//! The nav pins once continued scrolling would slide its resting position
//! under the fixed header. The resting position is the origin captured at
//! mount, never the live element, so pinning cannot feed back into itself.

use serde::Serialize;

use super::metrics::ViewportMetrics;
use super::suppression::SuppressionReader;
use super::timing::FrameGate;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum StickyState {
    #[default]
    Unpinned,
    /// Nav is fixed to the viewport; a spacer holds its old place in flow
    #[serde(rename_all = "camelCase")]
    Pinned { spacer_height: f64 },
}

impl StickyState {
    pub fn is_pinned(&self) -> bool {
        matches!(self, Self::Pinned { .. })
    }

    /// Height of the flow spacer, 0 while unpinned.
    pub fn spacer_height(&self) -> f64 {
        match self {
            Self::Pinned { spacer_height } => *spacer_height,
            Self::Unpinned => 0.0,
        }
    }
}

/// Everything one evaluation looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyInput {
    pub scroll_y: f64,
    pub header_height: f64,
    pub initial_nav_top: Option<f64>,
    pub nav_height: f64,
    pub suppressed: bool,
}

/// A state change the surface must apply to the DOM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StickyTransition {
    /// Fix the nav and insert a spacer of this height
    Pin { spacer_height: f64 },
    /// Return the nav to flow and remove the spacer
    Unpin,
}

/// Pure transition function.
pub fn next_state(current: StickyState, input: &StickyInput) -> StickyState {
    if input.suppressed {
        return current;
    }
    // Top of the page always unpins, even without a usable header.
    if input.scroll_y <= 0.0 {
        return StickyState::Unpinned;
    }
    let Some(nav_top) = input.initial_nav_top else {
        return current;
    };
    if !(input.header_height.is_finite() && input.header_height > 0.0) {
        return current;
    }
    let threshold = nav_top - input.header_height;
    if input.scroll_y >= threshold {
        match current {
            // Already pinned: keep the spacer measured when pinning began.
            StickyState::Pinned { .. } => current,
            StickyState::Unpinned => StickyState::Pinned {
                spacer_height: input.nav_height,
            },
        }
    } else {
        StickyState::Unpinned
    }
}

/// Owns the sticky state and coalesces scroll ticks into frames.
#[derive(Debug, Clone)]
pub struct StickyController {
    state: StickyState,
    latest_scroll_y: f64,
    frame: FrameGate,
    suppression: SuppressionReader,
}

impl StickyController {
    pub fn new(suppression: SuppressionReader) -> Self {
        Self {
            state: StickyState::Unpinned,
            latest_scroll_y: 0.0,
            frame: FrameGate::new(),
            suppression,
        }
    }

    pub fn state(&self) -> StickyState {
        self.state
    }

    pub fn latest_scroll_y(&self) -> f64 {
        self.latest_scroll_y
    }

    /// Record a scroll event. Returns `true` when a frame must be scheduled.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        if scroll_y.is_finite() {
            self.latest_scroll_y = scroll_y;
        }
        self.frame.request()
    }

    /// Ask for an evaluation against the latest scroll position without a
    /// new scroll event (e.g. after suppression clears).
    pub fn request_evaluation(&mut self) -> bool {
        self.frame.request()
    }

    pub fn wants_frame(&self) -> bool {
        self.frame.is_requested()
    }

    /// Frame callback. Evaluates once if any tick was requested since the
    /// last frame, or if `force` is set (metrics changed).
    pub fn on_frame(&mut self, metrics: &ViewportMetrics, force: bool) -> Option<StickyTransition> {
        let requested = self.frame.begin_frame();
        if !requested && !force {
            return None;
        }
        let input = StickyInput {
            scroll_y: self.latest_scroll_y,
            header_height: metrics.header_height,
            initial_nav_top: metrics.initial_nav_top,
            nav_height: metrics.nav_height,
            suppressed: self.suppression.is_suppressed(),
        };
        self.apply(&input)
    }

    /// Run the transition function and store the result.
    pub fn apply(&mut self, input: &StickyInput) -> Option<StickyTransition> {
        let next = next_state(self.state, input);
        let transition = match (self.state, next) {
            (StickyState::Unpinned, StickyState::Pinned { spacer_height }) => {
                Some(StickyTransition::Pin { spacer_height })
            }
            (StickyState::Pinned { .. }, StickyState::Unpinned) => Some(StickyTransition::Unpin),
            _ => None,
        };
        if let Some(t) = &transition {
            tracing::debug!(scroll_y = input.scroll_y, transition = ?t, "sticky transition");
        }
        self.state = next;
        transition
    }

    /// Return to the initial state and drop any pending frame.
    pub fn reset(&mut self) {
        self.state = StickyState::Unpinned;
        self.latest_scroll_y = 0.0;
        self.frame.cancel();
    }
}
