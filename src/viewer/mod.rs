//! Scroll synchronization and the browser-facing `GalleryView`.
//!
//! The submodules hold DOM-free state machines:
//! - `metrics`: header/nav height tracking behind a debounce
//! - `sticky`: pinned/unpinned nav state machine
//! - `overflow`: nav strip scroll affordances on narrow viewports
//! - `suppression`: the modal-open flag that freezes sticky transitions
//! - `timing`: single-slot timer and frame bookkeeping
//!
//! On wasm32, `GalleryView` binds them to real elements: it registers the
//! window, header and strip listeners itself, owns every timer and frame
//! handle, and tears all of them down in `unmount` (or on drop).

mod metrics;
mod overflow;
mod sticky;
mod suppression;
mod timing;

#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod probe;

pub use metrics::{LayoutProbe, MetricsTracker, TimerOutcome, ViewportMetrics};
pub use overflow::{OverflowController, ScrollAffordances, StripMetrics, SCROLL_STEP_FRACTION};
pub use sticky::{next_state, StickyController, StickyInput, StickyState, StickyTransition};
pub use suppression::{ScrollSuppression, SuppressionReader};
pub use timing::{FrameGate, PendingTimer};

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{HtmlDivElement, HtmlElement, ResizeObserver};

#[cfg(target_arch = "wasm32")]
use crate::gallery::Gallery;
#[cfg(target_arch = "wasm32")]
use crate::types::{GalleryConfig, GalleryItem};
#[cfg(target_arch = "wasm32")]
use probe::DomProbe;

// Timing helper.
#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

/// Shared state reachable from event handlers (wasm32 only).
///
/// Handlers hold a `Weak` to this, so once the view is dropped they stop
/// doing anything even if the browser still delivers a queued callback.
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) gallery: Gallery,
    pub(crate) probe: DomProbe,
    pub(crate) strip: Option<HtmlElement>,
    /// Flow placeholder inserted before the nav while pinned
    pub(crate) spacer: Option<HtmlDivElement>,
    pub(crate) render_callback: Option<Function>,
    pub(crate) intent_callback: Option<Function>,
    /// Live `setTimeout` handle for the metrics debounce
    pub(crate) timer: Option<i32>,
    pub(crate) timer_closure: Option<Closure<dyn FnMut()>>,
    /// Live `requestAnimationFrame` handle
    pub(crate) frame: Option<i32>,
    pub(crate) frame_closure: Option<Closure<dyn FnMut(f64)>>,
}

/// DOM listeners registered at mount, removed at unmount.
#[cfg(target_arch = "wasm32")]
pub(crate) struct Bindings {
    pub(crate) resize: Option<Closure<dyn FnMut(web_sys::Event)>>,
    pub(crate) scroll: Option<Closure<dyn FnMut(web_sys::Event)>>,
    pub(crate) strip_scroll: Option<Closure<dyn FnMut(web_sys::Event)>>,
    pub(crate) observer: Option<ResizeObserver>,
    pub(crate) observer_closure: Option<Closure<dyn FnMut(js_sys::Array)>>,
}

/// The gallery surface exported to JavaScript.
///
/// Every exported method takes `&self`: render and intent callbacks run
/// synchronously and may call back into the view (e.g. `snapshot()`).
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct GalleryView {
    state: Rc<RefCell<SharedState>>,
    bindings: RefCell<Option<Bindings>>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GalleryView {
    /// Create a view bound to the page header, the nav bar and (optionally)
    /// the horizontally scrolling category strip inside the nav.
    ///
    /// `config` may be `undefined` or a partial `GalleryConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(
        header: HtmlElement,
        nav: HtmlElement,
        strip: Option<HtmlElement>,
        config: JsValue,
    ) -> Result<GalleryView, JsValue> {
        console_error_panic_hook::set_once();

        let config: GalleryConfig = if config.is_undefined() || config.is_null() {
            GalleryConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?
        };
        let gallery = Gallery::new(config)?;

        let state = Rc::new(RefCell::new(SharedState {
            gallery,
            probe: DomProbe::new(header, nav),
            strip,
            spacer: None,
            render_callback: None,
            intent_callback: None,
            timer: None,
            timer_closure: None,
            frame: None,
            frame_closure: None,
        }));

        let view = GalleryView {
            state,
            bindings: RefCell::new(None),
        };
        view.mount();
        Ok(view)
    }

    /// Register listeners and start measuring. Called by the constructor;
    /// calling it again after `unmount` remounts and re-captures the nav origin.
    pub fn mount(&self) {
        if self.bindings.borrow().is_some() {
            return;
        }
        let (delay, needs_frame) = {
            let mut s = self.state.borrow_mut();
            let delay = s.gallery.mount(now_ms());
            let strip = s.strip_metrics();
            s.gallery.set_viewport_width(probe::window_width(), strip);
            // The page may already be scrolled (restoration, anchors, remount).
            let needs_frame = s.gallery.on_scroll(probe::window_scroll_y());
            (delay, needs_frame)
        };
        let bindings = Self::install_bindings(&self.state);
        *self.bindings.borrow_mut() = Some(bindings);
        Self::schedule_timer(&self.state, delay);
        if needs_frame {
            Self::schedule_frame(&self.state);
        }
        Self::notify_render(&self.state);
    }

    /// Remove every listener, observer, timer and frame request, and put
    /// the nav back into normal flow.
    pub fn unmount(&self) {
        let bindings = self.bindings.borrow_mut().take();
        if let Some(bindings) = bindings {
            Self::remove_bindings(&self.state, bindings);
        }
        Self::cancel_scheduled(&self.state);
        let mut s = self.state.borrow_mut();
        s.gallery.unmount();
        Self::restore_nav(&mut s);
    }

    /// Replace the item set. `items` is an array of `GalleryItem` objects.
    pub fn set_items(&self, items: JsValue) -> Result<(), JsValue> {
        let items: Vec<GalleryItem> = serde_wasm_bindgen::from_value(items)
            .map_err(|e| JsValue::from_str(&format!("Invalid items: {e}")))?;
        self.state.borrow_mut().gallery.set_items(items);
        Self::notify_render(&self.state);
        Ok(())
    }

    /// Record an aspect ratio measured after the item was handed over.
    pub fn set_aspect_ratio(&self, id: &str, aspect_ratio: Option<f64>) -> Result<(), JsValue> {
        let changed = self
            .state
            .borrow_mut()
            .gallery
            .set_aspect_ratio(id, aspect_ratio)?;
        if changed {
            Self::notify_render(&self.state);
        }
        Ok(())
    }

    pub fn set_categories(&self, labels: Vec<String>, active: Option<String>) {
        {
            let mut s = self.state.borrow_mut();
            let strip = s.strip_metrics();
            s.gallery.set_categories(labels, active, strip);
        }
        Self::notify_render(&self.state);
    }

    pub fn select_category(&self, label: &str) -> Result<(), JsValue> {
        self.state.borrow_mut().gallery.select_category(label)?;
        Self::flush_intents(&self.state);
        Self::notify_render(&self.state);
        Ok(())
    }

    pub fn select_image(&self, id: &str) -> Result<(), JsValue> {
        self.state.borrow_mut().gallery.select_image(id)?;
        Self::flush_intents(&self.state);
        Ok(())
    }

    pub fn toggle_favorite(&self, id: &str) -> Result<(), JsValue> {
        self.state.borrow_mut().gallery.toggle_favorite(id)?;
        Self::flush_intents(&self.state);
        Ok(())
    }

    pub fn download(&self, id: &str) -> Result<(), JsValue> {
        self.state.borrow_mut().gallery.download(id)?;
        Self::flush_intents(&self.state);
        Ok(())
    }

    /// Full-screen modal opened or closed.
    pub fn set_modal_open(&self, open: bool) {
        let needs_frame = self.state.borrow_mut().gallery.set_modal_open(open);
        if needs_frame {
            Self::schedule_frame(&self.state);
        }
    }

    /// Smoothly scroll the nav strip one step left.
    pub fn scroll_strip_left(&self) {
        let s = self.state.borrow();
        if let (Some(strip), Some(delta)) = (&s.strip, s.gallery.scroll_strip_left()) {
            probe::smooth_scroll_by(strip, delta);
        }
    }

    /// Smoothly scroll the nav strip one step right.
    pub fn scroll_strip_right(&self) {
        let s = self.state.borrow();
        if let (Some(strip), Some(delta)) = (&s.strip, s.gallery.scroll_strip_right()) {
            probe::smooth_scroll_by(strip, delta);
        }
    }

    /// Current render snapshot as a plain JS object.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.state.borrow().gallery.snapshot();
        serde_wasm_bindgen::to_value(&snapshot)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Called with no arguments whenever the snapshot changes.
    pub fn set_render_callback(&self, callback: Option<Function>) {
        self.state.borrow_mut().render_callback = callback;
    }

    /// Called with one intent object per user action.
    pub fn set_intent_callback(&self, callback: Option<Function>) {
        self.state.borrow_mut().intent_callback = callback;
    }

    pub fn is_pinned(&self) -> bool {
        self.state.borrow().gallery.sticky_state().is_pinned()
    }

    pub fn column_count(&self) -> usize {
        self.state.borrow().gallery.layout().column_count()
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for GalleryView {
    fn drop(&mut self) {
        self.unmount();
    }
}
