//! Platform-neutral gallery surface.
//!
//! `Gallery` wires the sizer, packer, metrics tracker, sticky controller and
//! overflow controller together. It never touches the DOM: event entry
//! points take timestamps, scroll offsets and a [`LayoutProbe`], and the
//! results come back as values (delays to arm, frames to request, sticky
//! transitions to apply, intents to forward). The wasm binding in
//! [`crate::viewer`] maps those values onto browser APIs.

use serde::Serialize;

use crate::error::{GalleryError, Result};
use crate::layout::ColumnLayout;
use crate::types::{GalleryConfig, GalleryIntent, GalleryItem};
use crate::viewer::{
    LayoutProbe, MetricsTracker, OverflowController, ScrollAffordances, ScrollSuppression,
    StickyController, StickyState, StickyTransition, StripMetrics, SuppressionReader,
    TimerOutcome, ViewportMetrics,
};

/// One item as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderItem {
    pub id: String,
    pub span: u32,
    pub payload: serde_json::Value,
}

/// Everything the rendering surface consumes, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot {
    pub columns: Vec<Vec<RenderItem>>,
    pub pinned: bool,
    pub spacer_height: f64,
    #[serde(flatten)]
    pub affordances: ScrollAffordances,
    pub metrics: ViewportMetrics,
    pub categories: Vec<String>,
    pub active_category: Option<String>,
}

/// Columns of render items for a packed layout.
pub fn render_columns(layout: &ColumnLayout) -> Vec<Vec<RenderItem>> {
    layout
        .columns()
        .iter()
        .map(|members| {
            members
                .iter()
                .filter_map(|&idx| {
                    layout.item(idx).map(|item| RenderItem {
                        id: item.id.clone(),
                        span: layout.span_of(idx),
                        payload: item.payload.clone(),
                    })
                })
                .collect()
        })
        .collect()
}

/// Result of an animation-frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameOutcome {
    /// Sticky change to apply to the nav element
    pub transition: Option<StickyTransition>,
    /// Published metrics changed
    pub metrics_changed: bool,
    /// Viewport offset the pinned nav must sit at. Set on pin and whenever
    /// the header height changes while pinned.
    pub pinned_top: Option<f64>,
}

impl FrameOutcome {
    pub fn is_noop(&self) -> bool {
        self.transition.is_none() && !self.metrics_changed && self.pinned_top.is_none()
    }
}

pub struct Gallery {
    config: GalleryConfig,
    layout: ColumnLayout,
    tracker: MetricsTracker,
    sticky: StickyController,
    overflow: OverflowController,
    suppression: ScrollSuppression,
    categories: Vec<String>,
    active_category: Option<String>,
    viewport_width: f64,
    outbox: Vec<GalleryIntent>,
    mounted: bool,
}

impl Gallery {
    /// Create a gallery. The configuration is validated first.
    ///
    /// # Errors
    /// Returns `GalleryError::Config` for an inconsistent configuration.
    pub fn new(config: GalleryConfig) -> Result<Self> {
        config.validate()?;
        let columns = config.columns_for_width(0.0);
        let layout = ColumnLayout::empty(columns, config.span_rules)?;
        let suppression = ScrollSuppression::new();
        Ok(Self {
            tracker: MetricsTracker::new(&config),
            sticky: StickyController::new(suppression.reader()),
            overflow: OverflowController::new(config.mobile_breakpoint),
            layout,
            suppression,
            categories: Vec::new(),
            active_category: None,
            viewport_width: 0.0,
            outbox: Vec::new(),
            mounted: false,
            config,
        })
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn sticky_state(&self) -> StickyState {
        self.sticky.state()
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.tracker.metrics()
    }

    pub fn affordances(&self) -> ScrollAffordances {
        self.overflow.affordances()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// A read handle on the modal-open flag.
    pub fn suppression(&self) -> SuppressionReader {
        self.suppression.reader()
    }

    // ------------------------------------------------------------------
    // Data
    // ------------------------------------------------------------------

    /// Replace the item set wholesale and pack it.
    pub fn set_items(&mut self, items: Vec<GalleryItem>) {
        tracing::info!(items = items.len(), columns = self.layout.column_count(), "items replaced");
        self.layout.replace_items(items);
    }

    /// Record a late-arriving aspect ratio. Only that item's span changes.
    ///
    /// # Errors
    /// Returns `GalleryError::UnknownItem` if the id is not in the item set.
    pub fn set_aspect_ratio(&mut self, id: &str, aspect_ratio: Option<f64>) -> Result<bool> {
        self.layout.update_aspect_ratio(id, aspect_ratio)
    }

    /// Supply the category labels and the active one. The strip's entry
    /// count changes, so the overflow flags are recomputed.
    pub fn set_categories(&mut self, labels: Vec<String>, active: Option<String>, strip: StripMetrics) {
        self.active_category = active.filter(|a| labels.contains(a));
        self.overflow.on_entries_changed(strip);
        self.categories = labels;
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    // ------------------------------------------------------------------
    // Intents
    // ------------------------------------------------------------------

    /// Mark a category active and ask the host to switch to it.
    ///
    /// # Errors
    /// Returns `GalleryError::UnknownCategory` for a label that was never supplied.
    pub fn select_category(&mut self, label: &str) -> Result<()> {
        if !self.categories.iter().any(|c| c == label) {
            return Err(GalleryError::UnknownCategory(label.to_string()));
        }
        self.active_category = Some(label.to_string());
        self.outbox.push(GalleryIntent::SelectCategory {
            label: label.to_string(),
        });
        Ok(())
    }

    /// # Errors
    /// Returns `GalleryError::UnknownItem` if the id is not in the item set.
    pub fn select_image(&mut self, id: &str) -> Result<()> {
        self.item_intent(id, |id| GalleryIntent::SelectImage { id })
    }

    /// # Errors
    /// Returns `GalleryError::UnknownItem` if the id is not in the item set.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<()> {
        self.item_intent(id, |id| GalleryIntent::ToggleFavorite { id })
    }

    /// # Errors
    /// Returns `GalleryError::UnknownItem` if the id is not in the item set.
    pub fn download(&mut self, id: &str) -> Result<()> {
        self.item_intent(id, |id| GalleryIntent::Download { id })
    }

    fn item_intent(&mut self, id: &str, make: impl FnOnce(String) -> GalleryIntent) -> Result<()> {
        if self.layout.position(id).is_none() {
            return Err(GalleryError::UnknownItem(id.to_string()));
        }
        self.outbox.push(make(id.to_string()));
        Ok(())
    }

    /// Drain intents queued since the last call.
    pub fn take_intents(&mut self) -> Vec<GalleryIntent> {
        std::mem::take(&mut self.outbox)
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Start tracking. Returns the delay before the first header measurement.
    pub fn mount(&mut self, now_ms: f64) -> f64 {
        self.mounted = true;
        self.sticky.reset();
        self.tracker.mount(now_ms)
    }

    /// Stop tracking and drop all pending timers and frames. Events that
    /// arrive afterwards are ignored.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.tracker.unmount();
        self.sticky.reset();
    }

    /// Window resize. Re-packs when the breakpoint column count changes,
    /// refreshes strip affordances and re-arms the header debounce.
    ///
    /// Returns the debounce delay, or `None` when not mounted.
    pub fn on_resize(&mut self, now_ms: f64, viewport_width: f64, strip: StripMetrics) -> Option<f64> {
        if !self.mounted {
            return None;
        }
        self.set_viewport_width(viewport_width, strip);
        Some(self.tracker.on_resize(now_ms))
    }

    /// Header element resized. Shares the window-resize debounce; ignored
    /// until the first measurement after mount has fired.
    pub fn on_header_resize(&mut self, now_ms: f64) -> Option<f64> {
        if !self.mounted {
            return None;
        }
        self.tracker.on_header_resize(now_ms)
    }

    /// Apply a viewport width. Returns `true` if the columns were re-packed.
    pub fn set_viewport_width(&mut self, viewport_width: f64, strip: StripMetrics) -> bool {
        self.viewport_width = viewport_width;
        self.overflow.on_viewport_resize(viewport_width, strip);
        let columns = self.config.columns_for_width(viewport_width);
        if columns == self.layout.column_count() {
            return false;
        }
        tracing::info!(viewport_width, columns, "column count changed");
        // columns_for_width never returns 0.
        self.layout.repack(columns).is_ok()
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Window scroll. Returns `true` when an animation frame must be requested.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        self.mounted && self.sticky.on_scroll(scroll_y)
    }

    /// Nav strip scrolled horizontally.
    pub fn on_strip_scroll(&mut self, strip: StripMetrics) -> ScrollAffordances {
        self.overflow.on_strip_scroll(strip)
    }

    /// Open or close the full-screen modal. Closing requests a fresh sticky
    /// evaluation; returns `true` when a frame must be requested.
    pub fn set_modal_open(&mut self, open: bool) -> bool {
        if !self.suppression.set(open) {
            return false;
        }
        tracing::debug!(open, "scroll suppression changed");
        !open && self.mounted && self.sticky.request_evaluation()
    }

    /// Debounce timer callback.
    pub fn on_timer(&mut self, now_ms: f64, probe: &dyn LayoutProbe) -> TimerOutcome {
        if !self.mounted {
            return TimerOutcome::Idle;
        }
        self.tracker.on_timer(now_ms, probe)
    }

    /// Whether anything is waiting for an animation frame.
    pub fn wants_frame(&self) -> bool {
        self.mounted && (self.sticky.wants_frame() || self.tracker.wants_frame())
    }

    /// Animation-frame callback: publish staged metrics, capture the nav
    /// origin on the first tick, then run at most one sticky evaluation.
    pub fn on_frame(&mut self, probe: &dyn LayoutProbe) -> FrameOutcome {
        if !self.mounted {
            return FrameOutcome::default();
        }
        let mut metrics_changed = self.tracker.on_frame();
        let captured = self.tracker.capture_nav_origin(probe);
        metrics_changed |= captured;
        let state = self.sticky.state();
        metrics_changed |= self.tracker.refresh_nav_height(probe, &state);
        let transition = self.sticky.on_frame(&self.tracker.metrics(), metrics_changed);
        let pinned_top = (self.sticky.state().is_pinned() && (metrics_changed || transition.is_some()))
            .then(|| self.tracker.metrics().header_height);
        FrameOutcome {
            transition,
            metrics_changed,
            pinned_top,
        }
    }

    /// Strip scroll delta for the left arrow, `None` above the breakpoint.
    pub fn scroll_strip_left(&self) -> Option<f64> {
        self.overflow.scroll_left()
    }

    /// Strip scroll delta for the right arrow, `None` above the breakpoint.
    pub fn scroll_strip_right(&self) -> Option<f64> {
        self.overflow.scroll_right()
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> RenderSnapshot {
        let columns = render_columns(&self.layout);
        let state = self.sticky.state();
        RenderSnapshot {
            columns,
            pinned: state.is_pinned(),
            spacer_height: state.spacer_height(),
            affordances: self.overflow.affordances(),
            metrics: self.tracker.metrics(),
            categories: self.categories.clone(),
            active_category: self.active_category.clone(),
        }
    }
}
