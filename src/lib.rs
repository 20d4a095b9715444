//! galleryview - masonry layout and sticky navigation for photo galleries
//!
//! Runs in the browser via WebAssembly and natively for tests and tooling:
//! - Aspect ratio to grid row-span sizing with configurable clamps
//! - Greedy shortest-column masonry packing, stable across refreshes
//! - Late aspect ratios update one item without re-packing
//! - Sticky nav that pins under a resizing header without layout thrash
//! - Scroll affordances for the nav strip on narrow viewports
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GalleryView } from 'galleryview';
//! await init();
//! const view = new GalleryView(header, nav, strip, { mobileBreakpoint: 768 });
//! view.set_render_callback(() => render(view.snapshot()));
//! view.set_intent_callback((intent) => dispatch(intent));
//! view.set_items(items);
//! ```

pub mod error;
pub mod gallery;
pub mod layout;
pub mod logging;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

pub use gallery::{FrameOutcome, Gallery, RenderItem, RenderSnapshot};
#[cfg(target_arch = "wasm32")]
pub use viewer::GalleryView;

pub use types::*;

/// Row span for one image.
///
/// `orientation` is `"portrait"` or `"landscape"`; anything else is treated
/// as portrait. A missing or unusable ratio gives the default span.
#[must_use]
#[wasm_bindgen]
pub fn span_for(orientation: &str, aspect_ratio: Option<f64>) -> u32 {
    let orientation = match orientation {
        "landscape" => Orientation::Landscape,
        _ => Orientation::Portrait,
    };
    layout::span_for(orientation, aspect_ratio)
}

/// Pack an array of items into `column_count` columns and return the
/// column layout as a JSON string.
///
/// # Errors
/// Returns an error for malformed items or a zero column count.
#[wasm_bindgen]
pub fn pack_items_json(items_json: &str, column_count: usize) -> Result<String, JsValue> {
    pack_json(items_json, column_count).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Native-friendly core of [`pack_items_json`].
///
/// # Errors
/// Returns an error for malformed items or a zero column count.
pub fn pack_json(items_json: &str, column_count: usize) -> error::Result<String> {
    if column_count == 0 {
        return Err(error::GalleryError::InvalidColumnCount);
    }
    let items: Vec<GalleryItem> = serde_json::from_str(items_json)?;
    let mut gallery = Gallery::new(GalleryConfig {
        column_breakpoints: vec![ColumnBreakpoint {
            min_width: 0.0,
            columns: column_count,
        }],
        ..GalleryConfig::default()
    })?;
    gallery.set_items(items);
    Ok(serde_json::to_string(&gallery.snapshot().columns)?)
}

/// Install the `tracing` subscriber that writes to the browser console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_logging(filter: Option<String>) {
    logging::init_with(filter.as_deref());
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
