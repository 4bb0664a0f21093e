//! Block-level content nodes

use crate::document::paragraph::{word_spans, BlockId};
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// Type of list marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListMarker {
    Bullet,
    Numbered { ordinal: u32 },
}

impl ListMarker {
    /// Get the display string for this marker
    pub fn display(&self) -> String {
        match self {
            ListMarker::Bullet => "•".to_string(),
            ListMarker::Numbered { ordinal } => format!("{}.", ordinal),
        }
    }
}

/// The kind of block element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockKind {
    /// Regular paragraph, the only kind that may be split across pages
    #[default]
    Paragraph,
    /// Heading with level (1-6)
    Heading { level: u8 },
    /// List item
    ListItem { marker: ListMarker },
    /// Image with intrinsic size
    Image { width: f32, height: f32 },
    /// Table, never split
    Table,
    /// Any other atomic block
    Other,
}

impl BlockKind {
    /// Get the line height multiplier for this block kind
    pub fn line_height_multiplier(&self) -> f32 {
        match self {
            BlockKind::Heading { level } => match level {
                1 => 1.5,
                2 => 1.4,
                3 => 1.3,
                _ => 1.2,
            },
            _ => 1.0,
        }
    }

    /// Get the spacing after this block (in ems)
    pub fn spacing_after(&self) -> f32 {
        match self {
            BlockKind::Paragraph | BlockKind::Table | BlockKind::Other => 1.0,
            BlockKind::Heading { .. } => 0.5,
            BlockKind::ListItem { .. } => 0.25,
            BlockKind::Image { .. } => 0.0,
        }
    }

    /// Whether blocks of this kind may be split at word boundaries
    pub fn is_splittable(&self) -> bool {
        matches!(self, BlockKind::Paragraph)
    }

    /// Check if this is a heading
    pub fn is_heading(&self) -> bool {
        matches!(self, BlockKind::Heading { .. })
    }

    /// Check if this is an image
    pub fn is_image(&self) -> bool {
        matches!(self, BlockKind::Image { .. })
    }

    /// Name used by the presentation layer
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading { .. } => "heading",
            BlockKind::ListItem { .. } => "list-item",
            BlockKind::Image { .. } => "image",
            BlockKind::Table => "table",
            BlockKind::Other => "other",
        }
    }
}

/// One unit of document content.
///
/// `text` is the plain text used for word splitting and measurement;
/// `content` is the opaque renderable fragment (markup from the import
/// service). When `content` is empty the presentation layer falls back to
/// `text`. `key` is the import service's own identifier for the node, if it
/// has one; the document derives the block's ID from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNode {
    #[serde(skip)]
    id: BlockId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub kind: BlockKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub content: String,
    #[serde(skip)]
    words: Vec<Range<usize>>,
}

impl BlockNode {
    /// Create a block of the given kind from plain text
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        let mut node = Self {
            id: BlockId::default(),
            key: None,
            kind,
            text: text.into(),
            content: String::new(),
            words: Vec::new(),
        };
        node.reindex_words();
        node
    }

    /// Create a paragraph block
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph, text)
    }

    /// Create a heading block
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::new(BlockKind::Heading { level: level.clamp(1, 6) }, text)
    }

    /// Create a list item block
    pub fn list_item(marker: ListMarker, text: impl Into<String>) -> Self {
        Self::new(BlockKind::ListItem { marker }, text)
    }

    /// Create an image block with intrinsic size
    pub fn image(width: f32, height: f32) -> Self {
        Self::new(BlockKind::Image { width, height }, String::new())
    }

    /// Attach opaque renderable content
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Attach the import service's identifier
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Identity assigned by the owning document
    pub fn id(&self) -> BlockId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: BlockId) {
        self.id = id;
    }

    /// Hash of the key, or of kind and content for unkeyed blocks.
    ///
    /// Independent of the block's position, so an unchanged block keeps its
    /// hash when blocks are inserted or removed around it.
    pub(crate) fn identity_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        if let Some(key) = &self.key {
            key.hash(&mut hasher);
            return hasher.finish();
        }

        self.kind.name().hash(&mut hasher);
        match self.kind {
            BlockKind::Heading { level } => level.hash(&mut hasher),
            BlockKind::ListItem { marker } => marker.hash(&mut hasher),
            BlockKind::Image { width, height } => {
                width.to_bits().hash(&mut hasher);
                height.to_bits().hash(&mut hasher);
            }
            _ => {}
        }
        self.text.hash(&mut hasher);
        self.content.hash(&mut hasher);
        hasher.finish()
    }

    /// Recompute word spans; only paragraphs carry words
    pub(crate) fn reindex_words(&mut self) {
        self.words = if self.kind.is_splittable() {
            word_spans(&self.text)
        } else {
            Vec::new()
        };
    }

    /// Number of words (zero for non-paragraph blocks)
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Get a single word by index
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(|span| &self.text[span.clone()])
    }

    /// Iterate over the words in a range
    pub fn words_in(&self, range: Range<usize>) -> impl Iterator<Item = &str> + '_ {
        let end = range.end.min(self.words.len());
        let start = range.start.min(end);
        self.words[start..end]
            .iter()
            .map(move |span| &self.text[span.clone()])
    }

    /// Text of a word range, with interior whitespace collapsed to one space
    pub fn text_for_words(&self, range: Range<usize>) -> String {
        let mut out = String::new();
        for (i, word) in self.words_in(range).enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(word);
        }
        out
    }

    /// Whether this block can be split at word boundaries
    pub fn is_splittable(&self) -> bool {
        self.kind.is_splittable() && !self.words.is_empty()
    }

    /// Renderable content, falling back to the plain text
    pub fn renderable(&self) -> &str {
        if self.content.is_empty() {
            &self.text
        } else {
            &self.content
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind() {
        let para = BlockKind::Paragraph;
        assert!(para.is_splittable());
        assert!(!para.is_heading());

        let heading = BlockKind::Heading { level: 1 };
        assert!(heading.is_heading());
        assert!(!heading.is_splittable());

        let image = BlockKind::Image {
            width: 10.0,
            height: 10.0,
        };
        assert!(image.is_image());
        assert!(!image.is_splittable());
    }

    #[test]
    fn test_list_marker_display() {
        assert_eq!(ListMarker::Bullet.display(), "•");
        assert_eq!(ListMarker::Numbered { ordinal: 1 }.display(), "1.");
        assert_eq!(ListMarker::Numbered { ordinal: 10 }.display(), "10.");
    }

    #[test]
    fn test_paragraph_words_collapse_whitespace() {
        let node = BlockNode::paragraph("  one \t two\n\nthree  ");
        assert_eq!(node.word_count(), 3);
        assert_eq!(node.word(1), Some("two"));
        assert_eq!(node.text_for_words(0..3), "one two three");
        assert_eq!(node.text_for_words(1..3), "two three");
    }

    #[test]
    fn test_atomic_blocks_have_no_words() {
        let heading = BlockNode::heading(2, "A title with words");
        assert_eq!(heading.word_count(), 0);
        assert!(!heading.is_splittable());

        let empty = BlockNode::paragraph("   ");
        assert!(!empty.is_splittable());
    }

    #[test]
    fn test_heading_level_clamped() {
        let heading = BlockNode::heading(9, "x");
        assert_eq!(heading.kind, BlockKind::Heading { level: 6 });
    }

    #[test]
    fn test_renderable_falls_back_to_text() {
        let plain = BlockNode::paragraph("hello");
        assert_eq!(plain.renderable(), "hello");

        let rich = BlockNode::paragraph("hello").with_content("<p><b>hello</b></p>");
        assert_eq!(rich.renderable(), "<p><b>hello</b></p>");
    }

    #[test]
    fn test_identity_hash_follows_key_then_content() {
        let a = BlockNode::paragraph("same words");
        assert_eq!(a.identity_hash(), BlockNode::paragraph("same words").identity_hash());
        assert_ne!(a.identity_hash(), BlockNode::paragraph("other words").identity_hash());
        assert_ne!(
            a.identity_hash(),
            BlockNode::heading(1, "same words").identity_hash()
        );

        let keyed = BlockNode::paragraph("v1").with_key("p-7");
        let edited = BlockNode::paragraph("v2 rewritten").with_key("p-7");
        assert_eq!(keyed.identity_hash(), edited.identity_hash());
    }

    #[test]
    fn test_deserialize_block_kinds() {
        let json = r#"[
            {"kind": {"type": "paragraph"}, "text": "a b"},
            {"kind": {"type": "heading", "level": 2}, "text": "T"},
            {"kind": {"type": "listItem", "marker": "bullet"}, "text": "item"},
            {"kind": {"type": "image", "width": 100.0, "height": 50.0}}
        ]"#;
        let nodes: Vec<BlockNode> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[1].kind, BlockKind::Heading { level: 2 });
        assert_eq!(
            nodes[2].kind,
            BlockKind::ListItem {
                marker: ListMarker::Bullet
            }
        );
        assert!(nodes[3].kind.is_image());
    }
}
