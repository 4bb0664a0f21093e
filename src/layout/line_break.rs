//! Line breaking and the text-metrics measurement oracle

use crate::document::BlockKind;
use crate::error::Result;
use crate::layout::font::{FontMetrics, FontSpec};
use crate::layout::oracle::{BlockView, MeasurementOracle};
use unicode_linebreak::{linebreaks, BreakOpportunity};
use unicode_segmentation::UnicodeSegmentation;

/// Indentation width per list level, in ems
pub const INDENT_WIDTH: f32 = 1.5;

/// Greedy line breaker over Unicode line-break opportunities
#[derive(Debug, Clone, Default)]
pub struct LineBreaker {
    metrics: FontMetrics,
}

impl LineBreaker {
    pub fn new(metrics: FontMetrics) -> Self {
        Self { metrics }
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.graphemes(true)
            .map(|g| self.metrics.grapheme_width(g) * size)
            .sum()
    }

    /// Count the lines `text` occupies at `max_width` and font `size`.
    ///
    /// Empty text still occupies one line. A segment wider than the line is
    /// broken between grapheme clusters.
    pub fn count_lines(&self, text: &str, max_width: f32, size: f32) -> usize {
        let mut lines = 1;
        let mut x: f32 = 0.0;
        let mut segment_start = 0;

        for (break_idx, opportunity) in linebreaks(text) {
            let segment = &text[segment_start..break_idx];
            segment_start = break_idx;

            let body = segment.trim_end();
            let body_width = self.text_width(body, size);
            let segment_width = body_width + self.text_width(&segment[body.len()..], size);

            // Check for soft wrap
            if x > 0.0 && x + body_width > max_width {
                lines += 1;
                x = 0.0;
            }

            if body_width > max_width {
                // Emergency break inside the segment
                for grapheme in body.graphemes(true) {
                    let w = self.metrics.grapheme_width(grapheme) * size;
                    if x > 0.0 && x + w > max_width {
                        lines += 1;
                        x = 0.0;
                    }
                    x += w;
                }
                x += segment_width - body_width;
            } else {
                x += segment_width;
            }

            if opportunity == BreakOpportunity::Mandatory && break_idx < text.len() {
                lines += 1;
                x = 0.0;
            }
        }

        lines
    }
}

/// Deterministic oracle computing heights from character advance widths.
///
/// Stands in for browser layout when pagination runs natively.
#[derive(Debug, Clone, Default)]
pub struct TextMetricsOracle {
    breaker: LineBreaker,
}

impl TextMetricsOracle {
    pub fn new(metrics: FontMetrics) -> Self {
        Self {
            breaker: LineBreaker::new(metrics),
        }
    }

    /// Height of a single item at `width`
    pub fn item_height(&self, item: &BlockView<'_>, width: f32, font: &FontSpec) -> f32 {
        let kind = &item.block.kind;

        if let BlockKind::Image {
            width: intrinsic_w,
            height: intrinsic_h,
        } = *kind
        {
            // Images shrink to the container width, keeping aspect ratio
            let scale = if intrinsic_w > width {
                width / intrinsic_w
            } else {
                1.0
            };
            return intrinsic_h * scale;
        }

        let scale = kind.line_height_multiplier();
        let available = match kind {
            BlockKind::ListItem { .. } => (width - INDENT_WIDTH * font.size).max(1.0),
            _ => width,
        };

        let lines = self
            .breaker
            .count_lines(&item.text(), available, font.size * scale);
        lines as f32 * font.line_height_px() * scale + kind.spacing_after() * font.size
    }
}

impl MeasurementOracle for TextMetricsOracle {
    fn measure(&self, items: &[BlockView<'_>], width: f32, font: &FontSpec) -> Result<f32> {
        let height = items
            .iter()
            .map(|item| self.item_height(item, width, font))
            .sum();
        log::trace!("measured {} items at width {}: {}", items.len(), width, height);
        Ok(height)
    }
}
