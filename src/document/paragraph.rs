//! Paragraph words and fragments

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Identifier of a block, independent of its position in the document
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BlockId(pub u64);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

/// Byte ranges of the whitespace-separated words in `text`.
///
/// Any run of whitespace separates two words; leading and trailing
/// whitespace produce no empty words.
pub fn word_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push(s..idx);
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }

    if let Some(s) = start {
        spans.push(s..text.len());
    }

    spans
}

/// Where a fragment sits in its paragraph's split sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FragmentPosition {
    First,
    Middle,
    Last,
}

/// A contiguous word range of an original paragraph.
///
/// Fragments never copy text: they point back at the paragraph by its index
/// in the document and carry the word range to render.
///
/// A fragment renders as its words only. The paragraph element's opening
/// tag is carried over, but inline markup inside it is flattened to text:
/// a split paragraph keeps its block styling and loses its inline styling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphFragment {
    /// Identity of the originating paragraph
    pub origin: BlockId,
    /// Index of the originating paragraph in the document
    pub block_index: usize,
    /// Word range within the originating paragraph
    pub words: Range<usize>,
    pub position: FragmentPosition,
}

impl ParagraphFragment {
    /// Number of words in this fragment
    pub fn len(&self) -> usize {
        self.words.end - self.words.start
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Split the word range `words` of a paragraph after `count` words.
    ///
    /// `words` must end at the paragraph's last word. Returns the head that
    /// stays on the current page and the rest that moves on; the rest runs
    /// to the paragraph end, so it is always `Last`.
    pub fn split(
        origin: BlockId,
        block_index: usize,
        words: Range<usize>,
        count: usize,
    ) -> (ParagraphFragment, ParagraphFragment) {
        debug_assert!(count >= 1 && count < words.end - words.start);
        let mid = words.start + count;
        let head = ParagraphFragment {
            origin,
            block_index,
            words: words.start..mid,
            position: if words.start == 0 {
                FragmentPosition::First
            } else {
                FragmentPosition::Middle
            },
        };
        let rest = ParagraphFragment {
            origin,
            block_index,
            words: mid..words.end,
            position: FragmentPosition::Last,
        };
        (head, rest)
    }
}
