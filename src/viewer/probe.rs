//! Live DOM measurements.

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions};

use super::{LayoutProbe, SharedState, StripMetrics};

/// Reads header and nav geometry from the page.
pub(crate) struct DomProbe {
    header: HtmlElement,
    nav: HtmlElement,
}

impl DomProbe {
    pub(crate) fn new(header: HtmlElement, nav: HtmlElement) -> Self {
        Self { header, nav }
    }

    pub(crate) fn header(&self) -> &HtmlElement {
        &self.header
    }

    pub(crate) fn nav(&self) -> &HtmlElement {
        &self.nav
    }
}

fn rendered_height(element: &HtmlElement) -> Option<f64> {
    if !element.is_connected() {
        return None;
    }
    Some(element.get_bounding_client_rect().height())
}

pub(crate) fn window_scroll_y() -> f64 {
    web_sys::window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

pub(crate) fn window_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

impl LayoutProbe for DomProbe {
    fn header_height(&self) -> Option<f64> {
        rendered_height(&self.header)
    }

    fn nav_height(&self) -> Option<f64> {
        rendered_height(&self.nav)
    }

    fn nav_top(&self) -> Option<f64> {
        if !self.nav.is_connected() {
            return None;
        }
        Some(self.nav.get_bounding_client_rect().top() + window_scroll_y())
    }
}

// `scrollLeft` is fractional on high-DPI screens; the typed getter truncates.
fn scroll_left_f64(element: &HtmlElement) -> f64 {
    Reflect::get(element.as_ref(), &JsValue::from_str("scrollLeft"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(f64::from(element.scroll_left()))
}

pub(crate) fn strip_metrics(strip: &HtmlElement) -> StripMetrics {
    StripMetrics {
        scroll_offset: scroll_left_f64(strip),
        scrollable_width: f64::from(strip.scroll_width()),
        visible_width: f64::from(strip.client_width()),
    }
}

pub(crate) fn smooth_scroll_by(strip: &HtmlElement, delta: f64) {
    let options = ScrollToOptions::new();
    options.set_left(delta);
    options.set_behavior(ScrollBehavior::Smooth);
    strip.scroll_by_with_scroll_to_options(&options);
}

impl SharedState {
    /// Current strip geometry, or all zeros when there is no strip.
    pub(crate) fn strip_metrics(&self) -> StripMetrics {
        self.strip.as_ref().map(strip_metrics).unwrap_or_default()
    }
}
