//! Sticky navigation, metrics tracking and nav strip overflow tests
//!
//! Drives the DOM-free `Gallery` surface the way the browser binding does:
//! timestamps for timers, scroll offsets for scroll events, and a fixed
//! probe standing in for the header and nav elements.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{landscape, portrait, FixedProbe};
use galleryview::viewer::{
    next_state, OverflowController, ScrollAffordances, StickyInput, StickyState, StickyTransition,
    StripMetrics, TimerOutcome,
};
use galleryview::{Gallery, GalleryConfig};

const PROBE: FixedProbe = FixedProbe {
    header: Some(80.0),
    nav: Some(48.0),
    nav_top: Some(400.0),
};

/// Mount, let the initial measurement fire and publish.
fn ready_gallery(probe: &FixedProbe) -> Gallery {
    let mut gallery = Gallery::new(GalleryConfig::default()).unwrap();
    let delay = gallery.mount(0.0);
    assert_eq!(gallery.on_timer(delay, probe), TimerOutcome::RequestFrame);
    gallery.on_frame(probe);
    gallery
}

fn scroll_to(gallery: &mut Gallery, probe: &FixedProbe, y: f64) -> Option<StickyTransition> {
    gallery.on_scroll(y);
    gallery.on_frame(probe).transition
}

// =============================================================================
// THRESHOLD
// =============================================================================

#[test]
fn test_pins_exactly_at_threshold() {
    let mut gallery = ready_gallery(&PROBE);
    assert_eq!(scroll_to(&mut gallery, &PROBE, 319.0), None);
    assert_eq!(gallery.sticky_state(), StickyState::Unpinned);

    assert_eq!(
        scroll_to(&mut gallery, &PROBE, 320.0),
        Some(StickyTransition::Pin { spacer_height: 48.0 })
    );
    assert!(gallery.sticky_state().is_pinned());

    assert_eq!(scroll_to(&mut gallery, &PROBE, 0.0), Some(StickyTransition::Unpin));
    assert_eq!(gallery.sticky_state(), StickyState::Unpinned);
}

#[test]
fn test_top_of_page_unpins_even_below_threshold() {
    let input = StickyInput {
        scroll_y: 0.0,
        header_height: 500.0,
        initial_nav_top: Some(400.0),
        nav_height: 48.0,
        suppressed: false,
    };
    // threshold = -100, yet scroll 0 must not pin.
    assert_eq!(next_state(StickyState::Unpinned, &input), StickyState::Unpinned);
}

#[test]
fn test_no_evaluation_before_header_measured() {
    let mut gallery = Gallery::new(GalleryConfig::default()).unwrap();
    gallery.mount(0.0);
    // Scroll far past any plausible threshold before the header timer fires.
    assert_eq!(scroll_to(&mut gallery, &PROBE, 5_000.0), None);
    assert_eq!(gallery.sticky_state(), StickyState::Unpinned);
}

#[test]
fn test_mounted_while_scrolled_pins_after_first_measurement() {
    let mut gallery = Gallery::new(GalleryConfig::default()).unwrap();
    let delay = gallery.mount(0.0);
    // Restored scroll position reported right after mount.
    assert!(gallery.on_scroll(600.0));
    assert_eq!(gallery.on_frame(&PROBE).transition, None);

    assert_eq!(gallery.on_timer(delay, &PROBE), TimerOutcome::RequestFrame);
    assert_eq!(
        gallery.on_frame(&PROBE).transition,
        Some(StickyTransition::Pin { spacer_height: 48.0 })
    );
}

#[test]
fn test_top_of_page_unpins_after_header_vanishes() {
    let mut gallery = ready_gallery(&PROBE);
    scroll_to(&mut gallery, &PROBE, 600.0);
    assert!(gallery.sticky_state().is_pinned());

    // Responsive header hidden: it now measures 0.
    let headless = FixedProbe {
        header: Some(0.0),
        ..PROBE
    };
    let delay = gallery.on_header_resize(1_000.0).unwrap();
    gallery.on_timer(1_000.0 + delay, &headless);
    let outcome = gallery.on_frame(&headless);
    assert!(outcome.metrics_changed);
    assert_eq!(outcome.transition, None);

    assert_eq!(scroll_to(&mut gallery, &headless, 0.0), Some(StickyTransition::Unpin));
    assert_eq!(gallery.snapshot().spacer_height, 0.0);
}

#[test]
fn test_missing_header_element_never_pins() {
    let probe = FixedProbe {
        header: None,
        ..PROBE
    };
    let mut gallery = ready_gallery(&probe);
    assert_eq!(gallery.metrics().header_height, 0.0);
    assert_eq!(scroll_to(&mut gallery, &probe, 5_000.0), None);
}

// =============================================================================
// SUPPRESSION
// =============================================================================

#[test]
fn test_modal_freezes_sticky_state() {
    let mut gallery = ready_gallery(&PROBE);
    assert!(!gallery.set_modal_open(true));
    assert_eq!(scroll_to(&mut gallery, &PROBE, 900.0), None);
    assert_eq!(gallery.sticky_state(), StickyState::Unpinned);

    // Closing the modal asks for a frame that evaluates the current scroll.
    assert!(gallery.set_modal_open(false));
    assert_eq!(
        gallery.on_frame(&PROBE).transition,
        Some(StickyTransition::Pin { spacer_height: 48.0 })
    );
}

#[test]
fn test_modal_keeps_pinned_nav_pinned() {
    let mut gallery = ready_gallery(&PROBE);
    scroll_to(&mut gallery, &PROBE, 600.0);
    gallery.set_modal_open(true);
    assert_eq!(scroll_to(&mut gallery, &PROBE, 0.0), None);
    assert!(gallery.sticky_state().is_pinned());
}

// =============================================================================
// METRICS
// =============================================================================

#[test]
fn test_header_growth_moves_threshold() {
    let mut gallery = ready_gallery(&PROBE);
    assert_eq!(scroll_to(&mut gallery, &PROBE, 300.0), None);

    // Header grows to 120px: threshold drops to 280.
    let taller = FixedProbe {
        header: Some(120.0),
        ..PROBE
    };
    let delay = gallery.on_header_resize(1_000.0).unwrap();
    assert_eq!(gallery.on_timer(1_000.0 + delay, &taller), TimerOutcome::RequestFrame);
    let outcome = gallery.on_frame(&taller);
    assert!(outcome.metrics_changed);
    assert_eq!(outcome.transition, Some(StickyTransition::Pin { spacer_height: 48.0 }));
}

#[test]
fn test_pinned_nav_follows_header_resize() {
    let mut gallery = ready_gallery(&PROBE);
    gallery.on_scroll(600.0);
    let pinned = gallery.on_frame(&PROBE);
    assert_eq!(pinned.pinned_top, Some(80.0));

    // Scrolling while pinned leaves the nav where it is.
    gallery.on_scroll(650.0);
    assert_eq!(gallery.on_frame(&PROBE).pinned_top, None);

    let taller = FixedProbe {
        header: Some(120.0),
        ..PROBE
    };
    let delay = gallery.on_header_resize(1_000.0).unwrap();
    gallery.on_timer(1_000.0 + delay, &taller);
    let outcome = gallery.on_frame(&taller);
    assert_eq!(outcome.transition, None);
    assert_eq!(outcome.pinned_top, Some(120.0));
    assert!(!outcome.is_noop());
}

#[test]
fn test_initial_observer_report_keeps_mount_delay() {
    let mut gallery = Gallery::new(GalleryConfig::default()).unwrap();
    assert_eq!(gallery.mount(0.0), 100.0);
    assert_eq!(gallery.on_header_resize(1.0), None);
    assert_eq!(gallery.on_timer(100.0, &PROBE), TimerOutcome::RequestFrame);
}

#[test]
fn test_resize_and_observer_share_one_debounce() {
    let mut gallery = ready_gallery(&PROBE);
    gallery.on_resize(1_000.0, 1200.0, StripMetrics::default());
    gallery.on_header_resize(1_050.0);
    gallery.on_resize(1_100.0, 1200.0, StripMetrics::default());
    // Debounce is 150ms after the last trigger.
    assert_eq!(gallery.on_timer(1_150.0, &PROBE), TimerOutcome::Reschedule(100.0));
    assert_eq!(gallery.on_timer(1_250.0, &PROBE), TimerOutcome::RequestFrame);
    assert_eq!(gallery.on_timer(1_400.0, &PROBE), TimerOutcome::Idle);
}

#[test]
fn test_spacer_uses_unpinned_nav_height() {
    let mut gallery = ready_gallery(&PROBE);
    scroll_to(&mut gallery, &PROBE, 600.0);
    // A fixed nav may render at another height; that must not leak.
    let squashed = FixedProbe {
        nav: Some(30.0),
        ..PROBE
    };
    scroll_to(&mut gallery, &squashed, 650.0);
    assert_eq!(gallery.metrics().nav_height, 48.0);
    assert_eq!(gallery.snapshot().spacer_height, 48.0);
}

#[test]
fn test_remount_recaptures_nav_origin() {
    let mut gallery = ready_gallery(&PROBE);
    assert_eq!(gallery.metrics().initial_nav_top, Some(400.0));
    gallery.unmount();
    let moved = FixedProbe {
        nav_top: Some(250.0),
        ..PROBE
    };
    let delay = gallery.mount(5_000.0);
    gallery.on_timer(5_000.0 + delay, &moved);
    gallery.on_frame(&moved);
    assert_eq!(gallery.metrics().initial_nav_top, Some(250.0));
}

// =============================================================================
// NAV STRIP OVERFLOW
// =============================================================================

fn strip(offset: f64) -> StripMetrics {
    StripMetrics {
        scroll_offset: offset,
        scrollable_width: 1000.0,
        visible_width: 400.0,
    }
}

#[test]
fn test_overflow_flags_at_edges() {
    let mut controller = OverflowController::new(768.0);
    let at_start = controller.on_viewport_resize(375.0, strip(0.0));
    assert_eq!(
        at_start,
        ScrollAffordances {
            can_scroll_left: false,
            can_scroll_right: true
        }
    );
    let at_end = controller.on_strip_scroll(strip(599.0));
    assert!(at_end.can_scroll_left);
    assert!(!at_end.can_scroll_right);
}

#[test]
fn test_overflow_recomputed_on_category_change() {
    let mut gallery = ready_gallery(&PROBE);
    gallery.on_resize(10.0, 375.0, strip(0.0));
    assert!(gallery.affordances().can_scroll_right);

    // Fewer categories: strip no longer overflows.
    let fits = StripMetrics {
        scroll_offset: 0.0,
        scrollable_width: 400.0,
        visible_width: 400.0,
    };
    gallery.set_categories(vec!["All".into(), "Nature".into()], Some("All".into()), fits);
    assert_eq!(gallery.affordances(), ScrollAffordances::default());
    assert_eq!(gallery.active_category(), Some("All"));
}

#[test]
fn test_desktop_hides_affordances() {
    let mut gallery = ready_gallery(&PROBE);
    gallery.on_resize(10.0, 1440.0, strip(300.0));
    let snapshot = gallery.snapshot();
    assert!(!snapshot.affordances.can_scroll_left);
    assert!(!snapshot.affordances.can_scroll_right);
    assert_eq!(gallery.scroll_strip_right(), None);
}

// =============================================================================
// SURFACE
// =============================================================================

#[test]
fn test_snapshot_serializes_for_renderer() {
    let mut gallery = ready_gallery(&PROBE);
    gallery.set_viewport_width(1200.0, StripMetrics::default());
    gallery.set_items(vec![
        portrait("a", Some(0.67)),
        landscape("b", None),
        landscape("c", Some(2.0)),
    ]);
    let json = serde_json::to_value(gallery.snapshot()).unwrap();
    assert_eq!(json["columns"].as_array().unwrap().len(), 3);
    assert_eq!(json["columns"][0][0]["id"], "a");
    assert_eq!(json["columns"][0][0]["span"], 32);
    assert_eq!(json["columns"][2][0]["span"], 12);
    assert_eq!(json["pinned"], false);
    assert_eq!(json["canScrollRight"], false);
    assert_eq!(json["metrics"]["headerHeight"], 80.0);
}

#[test]
fn test_category_change_replaces_items_wholesale() {
    let mut gallery = ready_gallery(&PROBE);
    gallery.set_categories(vec!["A".into(), "B".into()], Some("A".into()), StripMetrics::default());
    gallery.set_items(vec![landscape("a1", None), landscape("a2", None)]);
    gallery.select_category("B").unwrap();
    gallery.set_items(vec![portrait("b1", None)]);
    assert_eq!(gallery.layout().len(), 1);
    assert!(gallery.select_image("a1").is_err());
    assert_eq!(gallery.take_intents().len(), 1);
}
