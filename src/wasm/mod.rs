//! WASM bindings for the composer
//!
//! The browser host supplies the measurement function: it renders the given
//! markup in a hidden container of the given width and returns its height.

use crate::document::{BlockId, JsonImporter, PlainTextImporter};
use crate::error::{Error, Result};
use crate::layout::{BlockView, FontSpec, MeasurementOracle};
use crate::region::InteractionMode;
use crate::{Composer, ComposerConfig, Point, Rect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsError;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Oracle backed by a JS callback `(markup, width, fontJson) => height`
#[derive(Default)]
pub struct JsOracle {
    measure: Option<js_sys::Function>,
}

impl JsOracle {
    pub fn new(measure: js_sys::Function) -> Self {
        Self {
            measure: Some(measure),
        }
    }
}

impl MeasurementOracle for JsOracle {
    fn is_ready(&self) -> bool {
        self.measure.is_some()
    }

    fn measure(&self, items: &[BlockView<'_>], width: f32, font: &FontSpec) -> Result<f32> {
        let callback = self
            .measure
            .as_ref()
            .ok_or_else(|| Error::OracleUnavailable("no measure callback registered".into()))?;

        let markup: String = items.iter().map(|item| item.markup()).collect();
        let font_json = serde_json::to_string(font)?;

        let height = callback
            .call3(
                &JsValue::NULL,
                &JsValue::from_str(&markup),
                &JsValue::from_f64(width as f64),
                &JsValue::from_str(&font_json),
            )
            .map_err(|err| Error::OracleUnavailable(format!("measure callback threw: {:?}", err)))?;

        height
            .as_f64()
            .map(|h| h as f32)
            .ok_or_else(|| Error::OracleUnavailable("measure callback returned a non-number".into()))
    }
}

fn to_js(err: Error) -> JsError {
    JsError::new(&err.to_string())
}

/// WASM-exposed composer wrapper
#[wasm_bindgen]
pub struct WasmComposer {
    composer: Composer<JsOracle>,
}

#[wasm_bindgen]
impl WasmComposer {
    /// Create a composer with the default A4 frame and region
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            composer: Composer::with_oracle(JsOracle::default()),
        }
    }

    /// Create a composer from a JSON configuration
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> std::result::Result<WasmComposer, JsError> {
        let config = ComposerConfig::from_json(json).map_err(to_js)?;
        let composer = Composer::new(config, JsOracle::default()).map_err(to_js)?;
        Ok(Self { composer })
    }

    /// Register the measurement callback. Pagination fails until one is set.
    #[wasm_bindgen(js_name = setMeasure)]
    pub fn set_measure(&mut self, measure: js_sys::Function) {
        self.composer.set_oracle(JsOracle::new(measure));
    }

    /// Load serialized block nodes
    #[wasm_bindgen(js_name = loadBlocks)]
    pub fn load_blocks(&mut self, json: &str) -> std::result::Result<(), JsError> {
        self.composer
            .load(json.as_bytes(), &JsonImporter)
            .map_err(to_js)
    }

    /// Load plain text
    #[wasm_bindgen(js_name = loadText)]
    pub fn load_text(&mut self, text: &str) -> std::result::Result<(), JsError> {
        self.composer
            .load(text.as_bytes(), &PlainTextImporter)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = setFontSize)]
    pub fn set_font_size(&mut self, size: f32) -> std::result::Result<(), JsError> {
        self.composer.set_font_size(size).map_err(to_js)
    }

    #[wasm_bindgen(js_name = getFontSize)]
    pub fn get_font_size(&self) -> f32 {
        self.composer.font().size
    }

    #[wasm_bindgen(js_name = setRegion)]
    pub fn set_region(&mut self, x: f32, y: f32, width: f32, height: f32) -> bool {
        self.composer
            .set_region(Rect::new(x, y, width, height))
            .is_some()
    }

    /// Whether the pointer is over the region
    #[wasm_bindgen(js_name = containsPoint)]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        self.composer.region().contains(Point { x, y })
    }

    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(&mut self, x: f32, y: f32) -> bool {
        self.composer.begin_drag(Point { x, y })
    }

    #[wasm_bindgen(js_name = beginResize)]
    pub fn begin_resize(&mut self, x: f32, y: f32) -> bool {
        self.composer.begin_resize(Point { x, y })
    }

    /// Forward a global pointer move; returns whether the region changed
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.composer.pointer_move(Point { x, y }).is_some()
    }

    #[wasm_bindgen(js_name = endInteraction)]
    pub fn end_interaction(&mut self) {
        self.composer.end_interaction();
    }

    #[wasm_bindgen(js_name = setInteractive)]
    pub fn set_interactive(&mut self, enabled: bool) {
        self.composer.set_interactive(enabled);
    }

    #[wasm_bindgen(js_name = setBackground)]
    pub fn set_background(&mut self, background: Option<String>) {
        self.composer.set_background(background);
    }

    /// Repaginate if needed; returns whether new pages were produced
    #[wasm_bindgen(js_name = updateLayout)]
    pub fn update_layout(&mut self) -> std::result::Result<bool, JsError> {
        self.composer.update_layout().map_err(to_js)
    }

    /// Fit the font size to the configured target; returns the chosen size
    #[wasm_bindgen(js_name = autoFit)]
    pub fn auto_fit(&mut self) -> std::result::Result<f32, JsError> {
        self.composer
            .auto_fit()
            .map(|fit| fit.font_size)
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = getPageCount)]
    pub fn get_page_count(&self) -> usize {
        self.composer.page_count()
    }

    #[wasm_bindgen(js_name = isDirty)]
    pub fn is_dirty(&self) -> bool {
        self.composer.is_dirty()
    }

    /// Get render data for all pages (returns JSON)
    #[wasm_bindgen(js_name = getRenderData)]
    pub fn get_render_data(&self) -> std::result::Result<String, JsError> {
        self.composer.display_list().to_json().map_err(to_js)
    }

    /// Get region geometry and interaction state (returns JSON)
    #[wasm_bindgen(js_name = getRegion)]
    pub fn get_region(&self) -> std::result::Result<String, JsError> {
        let region = self.composer.region();
        let data = RegionData {
            rect: region.rect(),
            mode: region.mode(),
            enabled: region.is_enabled(),
        };
        serde_json::to_string(&data)
            .map_err(Error::from)
            .map_err(to_js)
    }

    /// Page on which a block starts, by the block ID from the render data
    #[wasm_bindgen(js_name = pageOfBlock)]
    pub fn page_of_block(&self, id: f64) -> Option<u32> {
        if !(id.is_finite() && id >= 0.0) {
            return None;
        }
        self.composer
            .page_of_block(BlockId(id as u64))
            .and_then(|page| u32::try_from(page).ok())
    }

    /// Get overflow warnings of the current pages (returns JSON)
    #[wasm_bindgen(js_name = getWarnings)]
    pub fn get_warnings(&self) -> std::result::Result<String, JsError> {
        let document = self.composer.document();
        let warnings: Vec<WarningData> = self
            .composer
            .pagination()
            .map(|p| {
                p.warnings()
                    .map(|w| WarningData {
                        page_index: w.page_index,
                        block: w.block,
                        block_index: document.position_of(w.block),
                        message: w.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        serde_json::to_string(&warnings)
            .map_err(Error::from)
            .map_err(to_js)
    }
}

impl Default for WasmComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegionData {
    #[serde(flatten)]
    rect: Rect,
    mode: InteractionMode,
    enabled: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WarningData {
    page_index: usize,
    block: BlockId,
    block_index: Option<usize>,
    message: String,
}
