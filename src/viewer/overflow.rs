//! Scroll affordances for the horizontally scrolling nav strip on narrow
//! viewports.

use serde::Serialize;

/// Fraction of the visible strip width moved by one arrow press.
pub const SCROLL_STEP_FRACTION: f64 = 0.8;

/// Sub-pixel slack when deciding whether the strip reached its right end.
const RIGHT_EDGE_TOLERANCE_PX: f64 = 1.0;

/// Scroll geometry of the nav strip.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StripMetrics {
    /// Current `scrollLeft`
    pub scroll_offset: f64,
    /// Total `scrollWidth`
    pub scrollable_width: f64,
    /// Visible `clientWidth`
    pub visible_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollAffordances {
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
}

impl ScrollAffordances {
    /// Affordances for a strip at `metrics`, ignoring the breakpoint.
    pub fn for_strip(metrics: &StripMetrics) -> Self {
        let max_offset = metrics.scrollable_width - metrics.visible_width - RIGHT_EDGE_TOLERANCE_PX;
        Self {
            can_scroll_left: metrics.scroll_offset > 0.0,
            can_scroll_right: metrics.scroll_offset < max_offset,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverflowController {
    breakpoint: f64,
    viewport_width: f64,
    strip: StripMetrics,
    affordances: ScrollAffordances,
}

impl OverflowController {
    pub fn new(breakpoint: f64) -> Self {
        Self {
            breakpoint,
            viewport_width: 0.0,
            strip: StripMetrics::default(),
            affordances: ScrollAffordances::default(),
        }
    }

    /// Whether the viewport is narrow enough for the strip to scroll.
    pub fn is_active(&self) -> bool {
        self.viewport_width < self.breakpoint
    }

    pub fn affordances(&self) -> ScrollAffordances {
        self.affordances
    }

    pub fn on_viewport_resize(&mut self, viewport_width: f64, strip: StripMetrics) -> ScrollAffordances {
        self.viewport_width = viewport_width;
        self.recompute(strip)
    }

    pub fn on_strip_scroll(&mut self, strip: StripMetrics) -> ScrollAffordances {
        self.recompute(strip)
    }

    /// Strip entries were added or removed, so its scroll width changed.
    pub fn on_entries_changed(&mut self, strip: StripMetrics) -> ScrollAffordances {
        self.recompute(strip)
    }

    fn recompute(&mut self, strip: StripMetrics) -> ScrollAffordances {
        self.strip = strip;
        self.affordances = if self.is_active() {
            ScrollAffordances::for_strip(&strip)
        } else {
            ScrollAffordances::default()
        };
        self.affordances
    }

    /// Horizontal delta for one step left, or `None` above the breakpoint.
    pub fn scroll_left(&self) -> Option<f64> {
        self.is_active()
            .then(|| -(self.strip.visible_width * SCROLL_STEP_FRACTION))
    }

    /// Horizontal delta for one step right, or `None` above the breakpoint.
    pub fn scroll_right(&self) -> Option<f64> {
        self.is_active()
            .then(|| self.strip.visible_width * SCROLL_STEP_FRACTION)
    }
}
