//! Listener registration, timer/frame scheduling and DOM effects for
//! `GalleryView`.
//!
//! All methods here are `pub(crate)` helpers called from the wasm-exported
//! API in `mod.rs`. Callbacks capture a `Weak` to the shared state and never
//! hold a borrow while calling back into JavaScript.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, HtmlDivElement, ResizeObserver};

use super::probe::{strip_metrics, window_scroll_y, window_width};
use super::{now_ms, Bindings, GalleryView, SharedState, StickyTransition, TimerOutcome};

fn event_closure(
    state: &Rc<RefCell<SharedState>>,
    handler: fn(&Rc<RefCell<SharedState>>),
) -> Closure<dyn FnMut(web_sys::Event)> {
    let weak_state = Rc::downgrade(state);
    Closure::wrap(Box::new(move |_event: web_sys::Event| {
        if let Some(state) = weak_state.upgrade() {
            handler(&state);
        }
    }) as Box<dyn FnMut(web_sys::Event)>)
}

impl GalleryView {
    pub(crate) fn install_bindings(state: &Rc<RefCell<SharedState>>) -> Bindings {
        let mut bindings = Bindings {
            resize: None,
            scroll: None,
            strip_scroll: None,
            observer: None,
            observer_closure: None,
        };
        let Some(window) = web_sys::window() else {
            tracing::warn!("no window; gallery runs without scroll tracking");
            return bindings;
        };

        let resize = event_closure(state, Self::handle_resize);
        match window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref()) {
            Ok(()) => bindings.resize = Some(resize),
            Err(_) => tracing::warn!("resize listener unavailable"),
        }

        // Passive so the browser never waits on us before scrolling.
        let scroll = event_closure(state, Self::handle_scroll);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        match window.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            scroll.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(()) => bindings.scroll = Some(scroll),
            Err(_) => tracing::warn!("scroll listener unavailable; nav stays unpinned"),
        }

        let strip = state.borrow().strip.clone();
        if let Some(strip) = strip {
            let strip_scroll = event_closure(state, Self::handle_strip_scroll);
            match strip.add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                strip_scroll.as_ref().unchecked_ref(),
                &options,
            ) {
                Ok(()) => bindings.strip_scroll = Some(strip_scroll),
                Err(_) => tracing::warn!("strip scroll listener unavailable"),
            }
        }

        // Header size changes without a window resize (fonts loading,
        // banners collapsing) arrive through a ResizeObserver.
        let weak_state = Rc::downgrade(state);
        let observer_closure = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
            if let Some(state) = weak_state.upgrade() {
                Self::handle_header_resize(&state);
            }
        }) as Box<dyn FnMut(js_sys::Array)>);
        match ResizeObserver::new(observer_closure.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(state.borrow().probe.header());
                bindings.observer = Some(observer);
                bindings.observer_closure = Some(observer_closure);
            }
            Err(_) => {
                tracing::warn!("ResizeObserver unavailable; header re-measured on window resize only");
            }
        }

        bindings
    }

    pub(crate) fn remove_bindings(state: &Rc<RefCell<SharedState>>, bindings: Bindings) {
        if let Some(window) = web_sys::window() {
            if let Some(resize) = &bindings.resize {
                let _ = window
                    .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
            }
            if let Some(scroll) = &bindings.scroll {
                let _ = window
                    .remove_event_listener_with_callback("scroll", scroll.as_ref().unchecked_ref());
            }
        }
        if let (Some(strip), Some(strip_scroll)) = (&state.borrow().strip, &bindings.strip_scroll) {
            let _ = strip
                .remove_event_listener_with_callback("scroll", strip_scroll.as_ref().unchecked_ref());
        }
        if let Some(observer) = &bindings.observer {
            observer.disconnect();
        }
        // Closures are dropped with `bindings` here, after every
        // registration pointing at them is gone.
    }

    // ------------------------------------------------------------------
    // Timer slot
    // ------------------------------------------------------------------

    pub(crate) fn schedule_timer(state: &Rc<RefCell<SharedState>>, delay_ms: f64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if let Some(timer_id) = s.timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        if s.timer_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            s.timer_closure = Some(Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    GalleryView::handle_timer(&state);
                }
            }) as Box<dyn FnMut()>));
        }
        let Some(callback) = s.timer_closure.as_ref() else {
            return;
        };
        // Delays are small configured millisecond values.
        #[allow(clippy::cast_possible_truncation)]
        let delay = delay_ms.ceil().clamp(0.0, f64::from(i32::MAX)) as i32;
        let timer = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay,
            )
            .ok();
        s.timer = timer;
    }

    pub(crate) fn handle_timer(state: &Rc<RefCell<SharedState>>) {
        let outcome = {
            let mut s = state.borrow_mut();
            s.timer = None;
            let SharedState { gallery, probe, .. } = &mut *s;
            gallery.on_timer(now_ms(), &*probe)
        };
        match outcome {
            TimerOutcome::Idle => {}
            TimerOutcome::Reschedule(remaining) => Self::schedule_timer(state, remaining),
            TimerOutcome::RequestFrame => Self::schedule_frame(state),
        }
    }

    // ------------------------------------------------------------------
    // Frame slot
    // ------------------------------------------------------------------

    pub(crate) fn schedule_frame(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if s.frame.is_some() {
            return;
        }
        if s.frame_closure.is_none() {
            let weak_state: Weak<RefCell<SharedState>> = Rc::downgrade(state);
            s.frame_closure = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
                if let Some(state) = weak_state.upgrade() {
                    GalleryView::handle_frame(&state);
                }
            }) as Box<dyn FnMut(f64)>));
        }
        let Some(callback) = s.frame_closure.as_ref() else {
            return;
        };
        let frame = window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok();
        s.frame = frame;
    }

    pub(crate) fn handle_frame(state: &Rc<RefCell<SharedState>>) {
        let outcome = {
            let mut s = state.borrow_mut();
            s.frame = None;
            let outcome = {
                let SharedState { gallery, probe, .. } = &mut *s;
                gallery.on_frame(&*probe)
            };
            if let Some(transition) = outcome.transition {
                Self::apply_transition(&mut *s, transition);
            }
            // Keep the fixed nav flush with a header that resized while pinned.
            if let Some(top) = outcome.pinned_top {
                let _ = s.probe.nav().style().set_property("top", &format!("{top}px"));
            }
            outcome
        };
        if !outcome.is_noop() {
            Self::notify_render(state);
        }
    }

    pub(crate) fn cancel_scheduled(state: &Rc<RefCell<SharedState>>) {
        let mut s = state.borrow_mut();
        let (timer, frame) = (s.timer.take(), s.frame.take());
        if let Some(window) = web_sys::window() {
            if let Some(timer_id) = timer {
                window.clear_timeout_with_handle(timer_id);
            }
            if let Some(frame_id) = frame {
                let _ = window.cancel_animation_frame(frame_id);
            }
        }
    }

    // ------------------------------------------------------------------
    // Event handlers
    // ------------------------------------------------------------------

    pub(crate) fn handle_resize(state: &Rc<RefCell<SharedState>>) {
        let (delay, changed) = {
            let mut s = state.borrow_mut();
            let strip = s.strip_metrics();
            let before = (s.gallery.layout().column_count(), s.gallery.affordances());
            let delay = s.gallery.on_resize(now_ms(), window_width(), strip);
            let after = (s.gallery.layout().column_count(), s.gallery.affordances());
            (delay, before != after)
        };
        if let Some(delay) = delay {
            Self::schedule_timer(state, delay);
        }
        if changed {
            Self::notify_render(state);
        }
    }

    pub(crate) fn handle_header_resize(state: &Rc<RefCell<SharedState>>) {
        let delay = state.borrow_mut().gallery.on_header_resize(now_ms());
        if let Some(delay) = delay {
            Self::schedule_timer(state, delay);
        }
    }

    pub(crate) fn handle_scroll(state: &Rc<RefCell<SharedState>>) {
        let needs_frame = state.borrow_mut().gallery.on_scroll(window_scroll_y());
        if needs_frame {
            Self::schedule_frame(state);
        }
    }

    pub(crate) fn handle_strip_scroll(state: &Rc<RefCell<SharedState>>) {
        let changed = {
            let mut s = state.borrow_mut();
            let Some(strip) = s.strip.as_ref().map(strip_metrics) else {
                return;
            };
            let before = s.gallery.affordances();
            before != s.gallery.on_strip_scroll(strip)
        };
        if changed {
            Self::notify_render(state);
        }
    }

    // ------------------------------------------------------------------
    // DOM effects
    // ------------------------------------------------------------------

    fn apply_transition(s: &mut SharedState, transition: StickyTransition) {
        match transition {
            StickyTransition::Pin { spacer_height } => {
                Self::insert_spacer(s, spacer_height);
                let style = s.probe.nav().style();
                let _ = style.set_property("position", "fixed");
                let _ = style.set_property("left", "0");
                let _ = style.set_property("right", "0");
                let _ = style.set_property("z-index", "10");
            }
            StickyTransition::Unpin => Self::restore_nav(s),
        }
    }

    fn insert_spacer(s: &mut SharedState, height: f64) {
        let nav = s.probe.nav();
        let Some(parent) = nav.parent_node() else {
            return;
        };
        if s.spacer.is_none() {
            s.spacer = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.create_element("div").ok())
                .and_then(|el| el.dyn_into::<HtmlDivElement>().ok());
        }
        let Some(spacer) = &s.spacer else {
            return;
        };
        let _ = spacer.set_attribute("data-galleryview-spacer", "");
        let _ = spacer.style().set_property("height", &format!("{height}px"));
        let _ = parent.insert_before(spacer, Some(nav));
    }

    pub(crate) fn restore_nav(s: &mut SharedState) {
        if let Some(spacer) = s.spacer.take() {
            spacer.remove();
        }
        let style = s.probe.nav().style();
        for property in ["position", "top", "left", "right", "z-index"] {
            let _ = style.remove_property(property);
        }
    }

    // ------------------------------------------------------------------
    // Callbacks into JavaScript
    // ------------------------------------------------------------------

    pub(crate) fn notify_render(state: &Rc<RefCell<SharedState>>) {
        let callback: Option<Function> = state.borrow().render_callback.clone();
        if let Some(callback) = callback {
            let _ = callback.call0(&JsValue::NULL);
        }
    }

    pub(crate) fn flush_intents(state: &Rc<RefCell<SharedState>>) {
        let (intents, callback) = {
            let mut s = state.borrow_mut();
            (s.gallery.take_intents(), s.intent_callback.clone())
        };
        let Some(callback) = callback else {
            tracing::debug!(dropped = intents.len(), "no intent callback registered");
            return;
        };
        for intent in intents {
            match serde_wasm_bindgen::to_value(&intent) {
                Ok(value) => {
                    let _ = callback.call1(&JsValue::NULL, &value);
                }
                Err(e) => tracing::error!(error = %e, "failed to serialize intent"),
            }
        }
    }
}
