//! Font specification and metrics for measurement

use serde::{Deserialize, Serialize};

/// Font settings passed through to the measurement oracle.
///
/// The pagination engine never interprets these beyond forwarding them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontSpec {
    pub family: String,
    /// Font size in length units
    pub size: f32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "serif".to_string(),
            size: 16.0,
            line_height: 1.4,
        }
    }
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32, line_height: f32) -> Self {
        Self {
            family: family.into(),
            size,
            line_height,
        }
    }

    /// Copy of this spec at another size
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    /// Height of one line of body text
    pub fn line_height_px(&self) -> f32 {
        self.size * self.line_height
    }
}

/// Advance widths in ems, scaled by the font size at measurement time
#[derive(Debug, Clone)]
pub struct FontMetrics {
    /// Width of ASCII characters (0-127)
    pub char_widths: Vec<f32>,
    /// Default width for non-ASCII characters
    pub default_width: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        // Rough proportional widths for a serif face
        let default_width = 0.5;
        let mut char_widths = vec![default_width; 128];
        for c in ['i', 'j', 'l', '.', ',', ';', ':', '\'', '!', '|'] {
            char_widths[c as usize] = 0.28;
        }
        for c in ['f', 't', 'r', ' '] {
            char_widths[c as usize] = 0.33;
        }
        for c in ['m', 'w', 'M', 'W'] {
            char_widths[c as usize] = 0.78;
        }
        for c in 'A'..='Z' {
            if char_widths[c as usize] == default_width {
                char_widths[c as usize] = 0.67;
            }
        }

        Self {
            char_widths,
            default_width,
        }
    }
}

impl FontMetrics {
    pub fn new(char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            char_widths,
            default_width,
        }
    }

    /// Monospace metrics: every character has the same advance
    pub fn monospace(width: f32) -> Self {
        Self {
            char_widths: vec![width; 128],
            default_width: width,
        }
    }

    /// Get width of a character in ems
    pub fn width(&self, c: char) -> f32 {
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        self.default_width
    }

    /// Width of a grapheme cluster in ems
    pub fn grapheme_width(&self, grapheme: &str) -> f32 {
        if grapheme == "\t" {
            self.default_width * 4.0
        } else if grapheme.chars().all(|c| c.is_control()) {
            0.0
        } else {
            // Combining marks ride on their base character
            grapheme.chars().next().map(|c| self.width(c)).unwrap_or(0.0)
        }
    }
}
