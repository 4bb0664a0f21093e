//! Display list: render-ready representation of a pagination

use crate::config::PageFrame;
use crate::document::{BlockId, BlockKind, DocumentModel, FragmentPosition, ListMarker};
use crate::layout::{FitWarning, PageItem, Pagination};
use crate::region::PlacementRegion;
use crate::Rect;
use serde::Serialize;
use std::ops::Range;

/// Unique identifier for a display item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayItemId {
    pub block: BlockId,
    /// First word covered; 0 for whole blocks
    pub first_word: usize,
}

impl DisplayItemId {
    pub fn new(block: BlockId, first_word: usize) -> Self {
        Self { block, first_word }
    }
}

/// Display representation of a list marker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "label", rename_all = "camelCase")]
pub enum ListMarkerDisplay {
    Bullet,
    Number(String),
}

impl From<&ListMarker> for ListMarkerDisplay {
    fn from(marker: &ListMarker) -> Self {
        match marker {
            ListMarker::Bullet => ListMarkerDisplay::Bullet,
            ListMarker::Numbered { .. } => ListMarkerDisplay::Number(marker.display()),
        }
    }
}

/// A display item to render inside a page's content box
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DisplayItem {
    /// A whole block, rendered from its opaque content
    #[serde(rename_all = "camelCase")]
    Block {
        id: DisplayItemId,
        kind: BlockKind,
        markup: String,
        marker: Option<ListMarkerDisplay>,
    },
    /// A word range of a split paragraph
    #[serde(rename_all = "camelCase")]
    Fragment {
        id: DisplayItemId,
        position: FragmentPosition,
        words: Range<usize>,
        markup: String,
    },
}

impl DisplayItem {
    pub fn id(&self) -> DisplayItemId {
        match self {
            DisplayItem::Block { id, .. } | DisplayItem::Fragment { id, .. } => *id,
        }
    }

    pub fn markup(&self) -> &str {
        match self {
            DisplayItem::Block { markup, .. } | DisplayItem::Fragment { markup, .. } => markup,
        }
    }

    fn from_page_item(item: &PageItem, document: &DocumentModel) -> Option<Self> {
        let view = item.view(document)?;
        let block = view.block;
        let markup = view.markup().into_owned();

        Some(match item {
            PageItem::Block { .. } => DisplayItem::Block {
                id: DisplayItemId::new(block.id(), 0),
                kind: block.kind.clone(),
                markup,
                marker: match &block.kind {
                    BlockKind::ListItem { marker } => Some(marker.into()),
                    _ => None,
                },
            },
            PageItem::Fragment(fragment) => DisplayItem::Fragment {
                id: DisplayItemId::new(fragment.origin, fragment.words.start),
                position: fragment.position,
                words: fragment.words.clone(),
                markup,
            },
        })
    }
}

/// Display list for a single page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPage {
    pub page_index: usize,
    /// Page canvas, stacked vertically in document space
    pub frame: Rect,
    /// Placement region, relative to the page frame
    pub content_box: Rect,
    pub items: Vec<DisplayItem>,
    pub overflow: Option<FitWarning>,
    /// Whether the region on this page accepts drag and resize
    pub interactive: bool,
    /// Template image drawn behind the content box
    pub background: Option<String>,
}

/// Complete display list for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayList {
    /// Generation of the inputs the pages were computed for
    pub version: u64,
    pub pages: Vec<DisplayPage>,
}

impl DisplayList {
    /// Build the display list for a pagination.
    ///
    /// Only the first page is interactive, and only while the region is
    /// enabled. Every page shares the same content box and background.
    pub fn build(
        document: &DocumentModel,
        pagination: &Pagination,
        frame: PageFrame,
        region: &PlacementRegion,
        background: Option<&str>,
        version: u64,
    ) -> Self {
        let content_box = region.rect();

        let pages = pagination
            .pages
            .iter()
            .map(|page| DisplayPage {
                page_index: page.index,
                frame: Rect::new(
                    0.0,
                    page.index as f32 * frame.height,
                    frame.width,
                    frame.height,
                ),
                content_box,
                items: page
                    .items
                    .iter()
                    .filter_map(|item| DisplayItem::from_page_item(item, document))
                    .collect(),
                overflow: page.overflow.clone(),
                interactive: page.index == 0 && region.is_enabled(),
                background: background.map(str::to_string),
            })
            .collect();

        DisplayList { version, pages }
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
