//! Browser tests for the `GalleryView` DOM binding.
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use galleryview::GalleryView;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn element(tag: &str, height: &str) -> HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let el: HtmlElement = document.create_element(tag).unwrap().dyn_into().unwrap();
    el.style().set_property("height", height).unwrap();
    document.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn test_view_packs_items() {
    let header = element("header", "80px");
    let nav = element("nav", "48px");
    let view = GalleryView::new(header, nav, None, JsValue::UNDEFINED).unwrap();

    let items = serde_wasm_bindgen::to_value(&serde_json::json!([
        {"id": "a", "orientation": "portrait"},
        {"id": "b", "orientation": "landscape", "aspectRatio": 1.5}
    ]))
    .unwrap();
    view.set_items(items).unwrap();

    let snapshot = view.snapshot().unwrap();
    let columns = Reflect::get(&snapshot, &JsValue::from_str("columns")).unwrap();
    let columns: Array = columns.dyn_into().unwrap();
    assert_eq!(columns.length() as usize, view.column_count());
    assert!(!view.is_pinned());
}

#[wasm_bindgen_test]
fn test_unknown_item_intent_is_an_error() {
    let header = element("header", "80px");
    let nav = element("nav", "48px");
    let view = GalleryView::new(header, nav, None, JsValue::UNDEFINED).unwrap();
    assert!(view.select_image("missing").is_err());
}

#[wasm_bindgen_test]
fn test_unmount_restores_nav() {
    let header = element("header", "80px");
    let nav = element("nav", "48px");
    let view = GalleryView::new(header, nav.clone(), None, JsValue::UNDEFINED).unwrap();
    view.unmount();
    assert_eq!(nav.style().get_property_value("position").unwrap(), "");
    // A second unmount is a no-op.
    view.unmount();
}

/// Call a method on the JS wrapper object, going through wasm-bindgen's
/// borrow tracking the way page code does.
fn call(target: &JsValue, method: &str, args: &Array) -> Result<JsValue, JsValue> {
    let function: Function = Reflect::get(target, &JsValue::from_str(method))?.dyn_into()?;
    Reflect::apply(&function, target, args)
}

#[wasm_bindgen_test]
fn test_render_callback_can_read_snapshot() {
    let header = element("header", "80px");
    let nav = element("nav", "48px");
    let view = JsValue::from(GalleryView::new(header, nav, None, JsValue::UNDEFINED).unwrap());

    let make_callback = Function::new_with_args(
        "view",
        "return () => { view.renderedColumns = view.snapshot().columns.length; };",
    );
    let callback = make_callback.call1(&JsValue::NULL, &view).unwrap();
    call(&view, "set_render_callback", &Array::of1(&callback)).unwrap();

    let items = serde_wasm_bindgen::to_value(&serde_json::json!([
        {"id": "a", "orientation": "portrait"},
        {"id": "b", "orientation": "landscape"}
    ]))
    .unwrap();
    call(&view, "set_items", &Array::of1(&items)).unwrap();
    call(&view, "set_aspect_ratio", &Array::of2(&"b".into(), &JsValue::from_f64(2.0))).unwrap();

    let rendered = Reflect::get(&view, &JsValue::from_str("renderedColumns")).unwrap();
    assert!(rendered.as_f64().unwrap() >= 1.0);
    call(&view, "free", &Array::new()).unwrap();
}
