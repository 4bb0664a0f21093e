//! Composer configuration

use crate::error::{Error, Result};
use crate::layout::{AutoFitOptions, FontSpec, WordSearch};
use crate::region::MIN_SIZE;
use crate::Rect;
use serde::{Deserialize, Serialize};

/// Fixed page canvas size, independent of the content budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageFrame {
    pub width: f32,
    pub height: f32,
}

impl PageFrame {
    /// A4 portrait at 96 DPI
    pub const A4: PageFrame = PageFrame {
        width: 794.0,
        height: 1123.0,
    };

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for PageFrame {
    fn default() -> Self {
        Self::A4
    }
}

/// Session configuration. Every field has a default, so a partial JSON
/// object is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComposerConfig {
    pub page_frame: PageFrame,
    /// Initial placement region
    pub region: Rect,
    pub min_region_size: f32,
    pub font: FontSpec,
    pub auto_fit: AutoFitOptions,
    pub word_search: WordSearch,
    /// Repaginate on every pointer move instead of once the interaction ends
    pub repaginate_during_interaction: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            page_frame: PageFrame::A4,
            region: Rect::new(80.0, 120.0, 630.0, 850.0),
            min_region_size: MIN_SIZE,
            font: FontSpec::default(),
            auto_fit: AutoFitOptions::default(),
            word_search: WordSearch::Binary,
            repaginate_during_interaction: false,
        }
    }
}

impl ComposerConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ComposerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !positive(self.page_frame.width) || !positive(self.page_frame.height) {
            return Err(Error::InvalidConfig(format!(
                "page frame {}x{} must be positive",
                self.page_frame.width, self.page_frame.height
            )));
        }
        if !positive(self.min_region_size) {
            return Err(Error::InvalidConfig(format!(
                "minimum region size {} must be positive",
                self.min_region_size
            )));
        }
        let r = &self.region;
        if !(r.x.is_finite() && r.y.is_finite() && positive(r.width) && positive(r.height)) {
            return Err(Error::InvalidConfig(format!(
                "region {}x{} at ({}, {}) must have a positive size",
                r.width, r.height, r.x, r.y
            )));
        }
        if !positive(self.font.size) || !positive(self.font.line_height) {
            return Err(Error::InvalidConfig(format!(
                "font size {} and line height {} must be positive",
                self.font.size, self.font.line_height
            )));
        }
        self.auto_fit.validate()
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}
