//! Measurement oracle interface

use crate::document::BlockNode;
use crate::error::Result;
use crate::layout::font::FontSpec;
use std::borrow::Cow;
use std::ops::Range;

/// Borrowed view of one item on a page: a whole block, or a word range of a
/// paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockView<'a> {
    pub block: &'a BlockNode,
    /// `None` for the whole block
    pub words: Option<Range<usize>>,
}

impl<'a> BlockView<'a> {
    pub fn whole(block: &'a BlockNode) -> Self {
        Self { block, words: None }
    }

    pub fn fragment(block: &'a BlockNode, words: Range<usize>) -> Self {
        Self {
            block,
            words: Some(words),
        }
    }

    pub fn is_fragment(&self) -> bool {
        self.words.is_some()
    }

    /// Number of words this view covers
    pub fn word_count(&self) -> usize {
        match &self.words {
            Some(range) => range.end - range.start,
            None => self.block.word_count(),
        }
    }

    /// Plain text to measure.
    ///
    /// Paragraph text is always whitespace-collapsed so that a whole paragraph
    /// and a fragment covering all of its words measure the same.
    pub fn text(&self) -> Cow<'a, str> {
        match &self.words {
            Some(range) => Cow::Owned(self.block.text_for_words(range.clone())),
            None if self.block.is_splittable() => {
                Cow::Owned(self.block.text_for_words(0..self.block.word_count()))
            }
            None => Cow::Borrowed(self.block.text.as_str()),
        }
    }

    /// Renderable markup for this view.
    ///
    /// Whole blocks render their opaque content. Fragments render their word
    /// range as text inside the paragraph's own opening tag, or a bare `<p>`
    /// when the content does not start with an element.
    pub fn markup(&self) -> Cow<'a, str> {
        match &self.words {
            None => Cow::Borrowed(self.block.renderable()),
            Some(range) => {
                let text = escape_html(&self.block.text_for_words(range.clone()));
                let (open, name) = opening_tag(&self.block.content).unwrap_or(("<p>", "p"));
                Cow::Owned(format!("{}{}</{}>", open, text, name))
            }
        }
    }
}

/// Opening tag of the element `content` starts with, and the element name
fn opening_tag(content: &str) -> Option<(&str, &str)> {
    let content = content.trim_start();
    let rest = content.strip_prefix('<')?;
    let name_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(rest.len());
    if name_len == 0 {
        return None;
    }

    let mut quote = None;
    for (idx, ch) in content.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None if ch == '>' => {
                let tag = &content[..=idx];
                return (!tag.ends_with("/>")).then_some((tag, &rest[..name_len]));
            }
            None => {}
        }
    }
    None
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Source of truth for rendered content height.
///
/// `measure` returns the height of `items` rendered one after another in a
/// container of the given width. Implementations must be deterministic for
/// identical arguments and monotonic non-decreasing as words are appended.
pub trait MeasurementOracle {
    /// Whether the oracle can answer queries right now
    fn is_ready(&self) -> bool {
        true
    }

    fn measure(&self, items: &[BlockView<'_>], width: f32, font: &FontSpec) -> Result<f32>;
}

impl<T: MeasurementOracle + ?Sized> MeasurementOracle for &T {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn measure(&self, items: &[BlockView<'_>], width: f32, font: &FontSpec) -> Result<f32> {
        (**self).measure(items, width, font)
    }
}

impl<T: MeasurementOracle + ?Sized> MeasurementOracle for Box<T> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn measure(&self, items: &[BlockView<'_>], width: f32, font: &FontSpec) -> Result<f32> {
        (**self).measure(items, width, font)
    }
}
