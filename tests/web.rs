//! Browser smoke tests for the WASM surface

#![cfg(target_arch = "wasm32")]

use page_composer::WasmComposer;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// `(markup, width, font) => height`: 20 units per 100 characters of markup
fn measure_callback() -> js_sys::Function {
    js_sys::Function::new_with_args("markup, width, font", "return markup.length / 5;")
}

#[wasm_bindgen_test]
fn paginates_with_js_oracle() {
    let mut composer = WasmComposer::new();
    composer.set_measure(measure_callback());
    assert!(composer
        .load_text("first paragraph\n\nsecond paragraph")
        .is_ok());

    assert_eq!(composer.update_layout().ok(), Some(true));
    assert_eq!(composer.get_page_count(), 1);
    let render = composer.get_render_data().ok().unwrap_or_default();
    assert!(render.contains("\"pages\""));
}

#[wasm_bindgen_test]
fn fails_without_measure_callback() {
    let mut composer = WasmComposer::new();
    assert!(composer.load_text("hello").is_ok());
    assert!(composer.update_layout().is_err());
    assert_eq!(composer.get_page_count(), 0);
}

#[wasm_bindgen_test]
fn drag_updates_region() {
    let mut composer = WasmComposer::new();
    assert!(composer.begin_drag(0.0, 0.0));
    assert!(composer.pointer_move(50.0, -30.0));
    composer.end_interaction();
    let region = composer.get_region().ok().unwrap_or_default();
    assert!(region.contains("\"x\":130"));
}

#[wasm_bindgen_test]
fn warnings_resolve_block_position() {
    let mut composer = WasmComposer::new();
    composer.set_measure(measure_callback());
    let blocks = format!(
        r#"[{{"kind": {{"type": "paragraph"}}, "text": "intro"}},
            {{"kind": {{"type": "other"}}, "content": "{}"}}]"#,
        "x".repeat(5000)
    );
    assert!(composer.load_blocks(&blocks).is_ok());
    assert_eq!(composer.update_layout().ok(), Some(true));

    let warnings = composer.get_warnings().ok().unwrap_or_default();
    assert!(warnings.contains("\"blockIndex\":1"));
    assert_eq!(composer.page_of_block(-1.0), None);
}
