//! Pagination: greedy page fill with word-level paragraph splitting

use crate::document::{BlockId, DocumentModel, FragmentPosition, ParagraphFragment};
use crate::error::{Error, Result};
use crate::layout::font::FontSpec;
use crate::layout::oracle::{BlockView, MeasurementOracle};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::fmt;
use std::ops::Range;

/// Content capacity of one page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub width: f32,
    pub height: f32,
}

impl Budget {
    /// Create a validated budget
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let budget = Self { width, height };
        budget.validate()?;
        Ok(budget)
    }

    /// Reject non-positive or non-finite dimensions
    pub fn validate(&self) -> Result<()> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(Error::InvalidBudget {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// How the largest fitting word count is searched for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WordSearch {
    /// Bisect over the word count
    #[default]
    Binary,
    /// Grow the word count one word at a time
    Linear,
}

/// One entry of a page: a whole block or a paragraph fragment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageItem {
    Block { index: usize },
    Fragment(ParagraphFragment),
}

impl PageItem {
    /// Position of the underlying block in the document
    pub fn block_index(&self) -> usize {
        match self {
            PageItem::Block { index } => *index,
            PageItem::Fragment(fragment) => fragment.block_index,
        }
    }

    /// Resolve against the document for measurement or rendering
    pub fn view<'a>(&self, document: &'a DocumentModel) -> Option<BlockView<'a>> {
        match self {
            PageItem::Block { index } => document.get(*index).map(BlockView::whole),
            PageItem::Fragment(fragment) => document
                .get(fragment.block_index)
                .map(|block| BlockView::fragment(block, fragment.words.clone())),
        }
    }

    /// Word range this item covers, if it is a splittable paragraph
    fn word_range(&self, document: &DocumentModel) -> Option<Range<usize>> {
        match self {
            PageItem::Block { index } => document
                .get(*index)
                .filter(|block| block.is_splittable())
                .map(|block| 0..block.word_count()),
            PageItem::Fragment(fragment) => Some(fragment.words.clone()),
        }
    }
}

/// The nodes committed to the page being filled.
///
/// Measuring never mutates the accumulator: a candidate is measured together
/// with the committed items and only pushed once it is known to fit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageAccumulator {
    items: Vec<PageItem>,
}

impl PageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[PageItem] {
        &self.items
    }

    pub fn push(&mut self, item: PageItem) {
        self.items.push(item);
    }

    pub fn into_items(self) -> Vec<PageItem> {
        self.items
    }

    /// Height of the committed items followed by `candidate`
    pub fn measure_with<O: MeasurementOracle + ?Sized>(
        &self,
        document: &DocumentModel,
        candidate: Option<&PageItem>,
        width: f32,
        font: &FontSpec,
        oracle: &O,
    ) -> Result<f32> {
        let views: SmallVec<[BlockView<'_>; 16]> = self
            .items
            .iter()
            .chain(candidate)
            .filter_map(|item| item.view(document))
            .collect();
        oracle.measure(&views, width, font)
    }
}

/// Why content was placed on a page it overflows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FitFailure {
    /// An unsplittable block is taller than an empty page
    AtomicTooLarge,
    /// Not even one word of a paragraph fits an empty page
    WordTooLarge,
}

/// Warning attached to a page whose content exceeds the budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitWarning {
    pub page_index: usize,
    pub block: BlockId,
    pub kind: FitFailure,
    /// Measured height of the overflowing page
    pub height: f32,
}

impl fmt::Display for FitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            FitFailure::AtomicTooLarge => "block is taller than the page",
            FitFailure::WordTooLarge => "a single word does not fit the page",
        };
        write!(
            f,
            "page {}: block {} overflows ({}, height {})",
            self.page_index + 1,
            self.block,
            what,
            self.height
        )
    }
}

/// One produced page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub index: usize,
    pub items: Vec<PageItem>,
    /// Set when the page knowingly exceeds the budget
    pub overflow: Option<FitWarning>,
}

impl Page {
    /// Resolve all items against the document
    pub fn views<'a>(&self, document: &'a DocumentModel) -> Vec<BlockView<'a>> {
        self.items
            .iter()
            .filter_map(|item| item.view(document))
            .collect()
    }

    pub fn is_overflowing(&self) -> bool {
        self.overflow.is_some()
    }
}

/// Result of one pagination run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub pages: Vec<Page>,
    pub budget: Budget,
    pub font: FontSpec,
}

impl Pagination {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// All fit warnings in page order
    pub fn warnings(&self) -> impl Iterator<Item = &FitWarning> + '_ {
        self.pages.iter().filter_map(|page| page.overflow.as_ref())
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    /// Index of the first page holding any part of block `id`
    pub fn page_of(&self, document: &DocumentModel, id: BlockId) -> Option<usize> {
        let position = document.position_of(id)?;
        self.pages
            .iter()
            .find(|page| page.items.iter().any(|item| item.block_index() == position))
            .map(|page| page.index)
    }
}

/// Paginate `document` into pages of at most `budget.height` each.
///
/// Fails only for an invalid budget, an unready oracle, or an oracle error.
/// Content that cannot fit even an empty page is placed anyway and flagged
/// on its page.
pub fn paginate<O: MeasurementOracle + ?Sized>(
    document: &DocumentModel,
    budget: Budget,
    font: &FontSpec,
    oracle: &O,
    search: WordSearch,
) -> Result<Pagination> {
    Paginator {
        document,
        budget,
        font,
        oracle,
        search,
    }
    .run()
}

struct Paginator<'a, O: ?Sized> {
    document: &'a DocumentModel,
    budget: Budget,
    font: &'a FontSpec,
    oracle: &'a O,
    search: WordSearch,
}

impl<O: MeasurementOracle + ?Sized> Paginator<'_, O> {
    fn run(&self) -> Result<Pagination> {
        self.budget.validate()?;
        if !self.oracle.is_ready() {
            return Err(Error::OracleUnavailable(
                "measurement oracle is not ready".to_string(),
            ));
        }

        let mut queue: VecDeque<PageItem> = (0..self.document.len())
            .map(|index| PageItem::Block { index })
            .collect();
        let mut pages = Vec::new();

        while !queue.is_empty() {
            let page = self.fill_page(pages.len(), &mut queue)?;
            log::debug!(
                "page {} committed with {} items, {} queued",
                page.index + 1,
                page.items.len(),
                queue.len()
            );
            pages.push(page);
        }

        Ok(Pagination {
            pages,
            budget: self.budget,
            font: self.font.clone(),
        })
    }

    fn measure(&self, page: &PageAccumulator, candidate: Option<&PageItem>) -> Result<f32> {
        page.measure_with(
            self.document,
            candidate,
            self.budget.width,
            self.font,
            self.oracle,
        )
    }

    fn fits(&self, page: &PageAccumulator, candidate: &PageItem) -> Result<bool> {
        // NaN never fits
        Ok(self.measure(page, Some(candidate))? <= self.budget.height)
    }

    /// Fill one page from the front of the queue. Always consumes at least
    /// one item or one word.
    fn fill_page(&self, page_index: usize, queue: &mut VecDeque<PageItem>) -> Result<Page> {
        let mut page = PageAccumulator::new();

        while let Some(item) = queue.pop_front() {
            if self.fits(&page, &item)? {
                page.push(item);
                continue;
            }

            if let Some(words) = self.word_range(&item) {
                let count = self.fit_words(&page, &item, words.clone())?;
                if count >= 1 {
                    let (head, rest) = self.split(&item, words, count);
                    page.push(PageItem::Fragment(head));
                    queue.push_front(PageItem::Fragment(rest));
                    break;
                }
            }

            if !page.is_empty() {
                // Retry on a fresh page
                queue.push_front(item);
                break;
            }

            let overflow = self.place_oversized(page_index, &mut page, item, queue)?;
            return Ok(Page {
                index: page_index,
                items: page.into_items(),
                overflow: Some(overflow),
            });
        }

        Ok(Page {
            index: page_index,
            items: page.into_items(),
            overflow: None,
        })
    }

    /// Place an item that does not fit an empty page: atomic blocks go in
    /// whole, paragraphs give up only their first word.
    fn place_oversized(
        &self,
        page_index: usize,
        page: &mut PageAccumulator,
        item: PageItem,
        queue: &mut VecDeque<PageItem>,
    ) -> Result<FitWarning> {
        let (placed, kind) = match self.word_range(&item) {
            Some(words) if words.len() > 1 => {
                let (head, rest) = self.split(&item, words, 1);
                queue.push_front(PageItem::Fragment(rest));
                (PageItem::Fragment(head), FitFailure::WordTooLarge)
            }
            Some(_) => (item, FitFailure::WordTooLarge),
            None => (item, FitFailure::AtomicTooLarge),
        };

        let warning = FitWarning {
            page_index,
            block: self.origin(&placed),
            kind,
            height: self.measure(page, Some(&placed))?,
        };
        log::warn!("{}", warning);
        page.push(placed);
        Ok(warning)
    }

    fn word_range(&self, item: &PageItem) -> Option<Range<usize>> {
        item.word_range(self.document).filter(|words| !words.is_empty())
    }

    fn origin(&self, item: &PageItem) -> BlockId {
        match item {
            PageItem::Fragment(fragment) => fragment.origin,
            PageItem::Block { index } => self
                .document
                .get(*index)
                .map(|block| block.id())
                .unwrap_or_default(),
        }
    }

    fn split(
        &self,
        item: &PageItem,
        words: Range<usize>,
        count: usize,
    ) -> (ParagraphFragment, ParagraphFragment) {
        ParagraphFragment::split(self.origin(item), item.block_index(), words, count)
    }

    /// Candidate holding the first `count` words of `words`
    fn prefix(&self, item: &PageItem, words: &Range<usize>, count: usize) -> PageItem {
        PageItem::Fragment(ParagraphFragment {
            origin: self.origin(item),
            block_index: item.block_index(),
            words: words.start..words.start + count,
            position: if words.start == 0 {
                FragmentPosition::First
            } else {
                FragmentPosition::Middle
            },
        })
    }

    /// Largest word count below the full range whose prefix still fits after
    /// the committed items. Zero means not even one word fits.
    fn fit_words(
        &self,
        page: &PageAccumulator,
        item: &PageItem,
        words: Range<usize>,
    ) -> Result<usize> {
        // The full range is already known not to fit
        let max = words.len() - 1;

        match self.search {
            WordSearch::Binary => {
                let (mut lo, mut hi) = (0, max);
                while lo < hi {
                    let mid = lo + (hi - lo + 1) / 2;
                    if self.fits(page, &self.prefix(item, &words, mid))? {
                        lo = mid;
                    } else {
                        hi = mid - 1;
                    }
                }
                Ok(lo)
            }
            WordSearch::Linear => {
                let mut count = 0;
                while count < max && self.fits(page, &self.prefix(item, &words, count + 1))? {
                    count += 1;
                }
                Ok(count)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BlockNode;
    use crate::layout::line_break::TextMetricsOracle;
    use crate::layout::oracle::testing::{OfflineOracle, WordOracle};

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    fn budget(width: f32, height: f32) -> Budget {
        Budget::new(width, height).unwrap()
    }

    /// Words of all paragraph items in page order
    fn flatten_words(doc: &DocumentModel, pagination: &Pagination) -> Vec<String> {
        pagination
            .pages
            .iter()
            .flat_map(|page| page.views(doc))
            .flat_map(|view| {
                let range = view.words.clone().unwrap_or(0..view.block.word_count());
                view.block
                    .words_in(range)
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    #[test]
    fn test_budget_validation() {
        assert!(Budget::new(630.0, 850.0).is_ok());
        assert!(matches!(
            Budget::new(0.0, 850.0),
            Err(Error::InvalidBudget { .. })
        ));
        assert!(Budget::new(630.0, -1.0).is_err());
        assert!(Budget::new(f32::NAN, 10.0).is_err());
        assert!(Budget::new(f32::INFINITY, 10.0).is_err());
    }

    #[test]
    fn test_empty_document() {
        let doc = DocumentModel::new();
        let oracle = WordOracle::new(2.0);
        let result = paginate(
            &doc,
            budget(630.0, 850.0),
            &FontSpec::default(),
            &oracle,
            WordSearch::Binary,
        )
        .unwrap();
        assert!(result.is_empty());
        assert_eq!(oracle.calls.get(), 0);
    }

    #[test]
    fn test_invalid_budget_rejected_before_measuring() {
        let doc = DocumentModel::from_blocks(vec![BlockNode::paragraph("a")]);
        let oracle = WordOracle::new(2.0);
        let invalid = Budget {
            width: 630.0,
            height: 0.0,
        };
        let result = paginate(&doc, invalid, &FontSpec::default(), &oracle, WordSearch::Binary);
        assert!(matches!(result, Err(Error::InvalidBudget { .. })));
        assert_eq!(oracle.calls.get(), 0);
    }

    #[test]
    fn test_unready_oracle() {
        let doc = DocumentModel::from_blocks(vec![BlockNode::paragraph("a")]);
        let result = paginate(
            &doc,
            budget(630.0, 850.0),
            &FontSpec::default(),
            &OfflineOracle,
            WordSearch::Binary,
        );
        assert!(matches!(result, Err(Error::OracleUnavailable(_))));
    }

    #[test]
    fn test_everything_fits_one_page() {
        let doc = DocumentModel::from_blocks(vec![
            BlockNode::heading(1, "Title"),
            BlockNode::paragraph(words(20)),
            BlockNode::image(100.0, 100.0),
        ]);
        let result = paginate(
            &doc,
            budget(630.0, 850.0),
            &FontSpec::default(),
            &WordOracle::new(2.0),
            WordSearch::Binary,
        )
        .unwrap();

        assert_eq!(result.page_count(), 1);
        assert_eq!(
            result.pages[0].items,
            vec![
                PageItem::Block { index: 0 },
                PageItem::Block { index: 1 },
                PageItem::Block { index: 2 },
            ]
        );
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_long_paragraph_splits_at_word() {
        let doc = DocumentModel::from_blocks(vec![BlockNode::paragraph(words(500))]);
        let result = paginate(
            &doc,
            budget(630.0, 850.0),
            &FontSpec::default(),
            &WordOracle::new(2.0),
            WordSearch::Binary,
        )
        .unwrap();

        assert_eq!(result.page_count(), 2);
        let first = match &result.pages[0].items[0] {
            PageItem::Fragment(f) => f.clone(),
            other => panic!("expected fragment, got {:?}", other),
        };
        assert_eq!(first.words, 0..425);
        assert_eq!(first.position, FragmentPosition::First);

        let last = match &result.pages[1].items[0] {
            PageItem::Fragment(f) => f.clone(),
            other => panic!("expected fragment, got {:?}", other),
        };
        assert_eq!(last.words, 425..500);
        assert_eq!(last.position, FragmentPosition::Last);
        assert_eq!(last.origin, doc.get(0).unwrap().id());
    }

    #[test]
    fn test_middle_fragments() {
        let doc = DocumentModel::from_blocks(vec![BlockNode::paragraph(words(100))]);
        let result = paginate(
            &doc,
            budget(630.0, 60.0),
            &FontSpec::default(),
            &WordOracle::new(2.0),
            WordSearch::Binary,
        )
        .unwrap();

        // 30 words per page
        assert_eq!(result.page_count(), 4);
        let positions: Vec<_> = result
            .pages
            .iter()
            .map(|page| match &page.items[0] {
                PageItem::Fragment(f) => f.position,
                other => panic!("expected fragment, got {:?}", other),
            })
            .collect();
        assert_eq!(
            positions,
            vec![
                FragmentPosition::First,
                FragmentPosition::Middle,
                FragmentPosition::Middle,
                FragmentPosition::Last,
            ]
        );
        assert_eq!(flatten_words(&doc, &result).len(), 100);
    }

    #[test]
    fn test_paragraph_continues_after_previous_block() {
        let doc = DocumentModel::from_blocks(vec![
            BlockNode::image(100.0, 40.0),
            BlockNode::paragraph(words(50)),
        ]);
        let result = paginate(
            &doc,
            budget(630.0, 100.0),
            &FontSpec::default(),
            &WordOracle::new(2.0),
            WordSearch::Binary,
        )
        .unwrap();

        // 40 + 2 * 30 = 100
        assert_eq!(result.pages[0].items.len(), 2);
        match &result.pages[0].items[1] {
            PageItem::Fragment(f) => assert_eq!(f.words, 0..30),
            other => panic!("expected fragment, got {:?}", other),
        }
        assert_eq!(result.page_count(), 2);
    }

    #[test]
    fn test_atomic_block_moves_to_next_page() {
        let doc = DocumentModel::from_blocks(vec![
            BlockNode::paragraph(words(10)),
            BlockNode::image(100.0, 90.0),
        ]);
        let result = paginate(
            &doc,
            budget(630.0, 100.0),
            &FontSpec::default(),
            &WordOracle::new(2.0),
            WordSearch::Binary,
        )
        .unwrap();

        assert_eq!(result.page_count(), 2);
        assert_eq!(result.pages[0].items, vec![PageItem::Block { index: 0 }]);
        assert_eq!(result.pages[1].items, vec![PageItem::Block { index: 1 }]);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_oversized_image_is_flagged() {
        let doc = DocumentModel::from_blocks(vec![
            BlockNode::paragraph(words(10)),
            BlockNode::image(100.0, 5000.0),
            BlockNode::paragraph(words(10)),
        ]);
        let oracle = WordOracle::new(2.0);
        let result = paginate(
            &doc,
            budget(630.0, 850.0),
            &FontSpec::default(),
            &oracle,
            WordSearch::Binary,
        )
        .unwrap();

        assert_eq!(result.page_count(), 3);
        assert_eq!(result.pages[1].items, vec![PageItem::Block { index: 1 }]);
        let warning = result.pages[1].overflow.as_ref().unwrap();
        assert_eq!(warning.kind, FitFailure::AtomicTooLarge);
        assert_eq!(doc.position_of(warning.block), Some(1));
        assert_eq!(result.page_of(&doc, warning.block), Some(1));
        assert_eq!(result.page_of(&doc, doc.get(2).unwrap().id()), Some(2));
        assert_eq!(result.page_of(&doc, BlockId(u64::MAX)), None);
        assert_eq!(warning.height, 5000.0);
        assert_eq!(result.warnings().count(), 1);
        assert!(oracle.calls.get() < 10);
    }

    #[test]
    fn test_word_too_large_places_one_word_per_page() {
        let doc = DocumentModel::from_blocks(vec![BlockNode::paragraph("alpha beta gamma")]);
        let result = paginate(
            &doc,
            budget(630.0, 850.0),
            &FontSpec::default(),
            &WordOracle::new(1000.0),
            WordSearch::Binary,
        )
        .unwrap();

        assert_eq!(result.page_count(), 3);
        assert!(result
            .pages
            .iter()
            .all(|p| p.overflow.as_ref().map(|w| w.kind) == Some(FitFailure::WordTooLarge)));
        assert_eq!(
            flatten_words(&doc, &result),
            vec!["alpha", "beta", "gamma"]
        );
    }

    #[test]
    fn test_word_too_large_after_content_retries_on_fresh_page() {
        let doc = DocumentModel::from_blocks(vec![
            BlockNode::image(10.0, 10.0),
            BlockNode::paragraph("huge"),
        ]);
        let result = paginate(
            &doc,
            budget(630.0, 850.0),
            &FontSpec::default(),
            &WordOracle::new(1000.0),
            WordSearch::Binary,
        )
        .unwrap();

        assert_eq!(result.page_count(), 2);
        assert!(result.pages[0].overflow.is_none());
        assert_eq!(result.pages[1].items, vec![PageItem::Block { index: 1 }]);
        assert!(result.pages[1].is_overflowing());
    }

    #[test]
    fn test_binary_and_linear_search_agree() {
        let doc = DocumentModel::from_blocks(vec![
            BlockNode::heading(2, "Chapter"),
            BlockNode::paragraph(words(240)),
            BlockNode::image(300.0, 120.0),
            BlockNode::paragraph(words(90)),
        ]);
        let oracle = TextMetricsOracle::default();
        let font = FontSpec::default();

        for height in [150.0, 233.0, 400.0, 850.0] {
            let b = budget(320.0, height);
            let binary = paginate(&doc, b, &font, &oracle, WordSearch::Binary).unwrap();
            let linear = paginate(&doc, b, &font, &oracle, WordSearch::Linear).unwrap();
            assert_eq!(binary, linear, "searches disagree at height {}", height);
        }
    }

    #[test]
    fn test_pages_respect_budget() {
        let doc = DocumentModel::from_blocks(vec![
            BlockNode::paragraph(words(300)),
            BlockNode::heading(1, "Next"),
            BlockNode::paragraph(words(300)),
        ]);
        let oracle = TextMetricsOracle::default();
        let font = FontSpec::default();
        let b = budget(400.0, 500.0);
        let result = paginate(&doc, b, &font, &oracle, WordSearch::Binary).unwrap();

        for page in &result.pages {
            assert!(!page.items.is_empty());
            let height = oracle.measure(&page.views(&doc), b.width, &font).unwrap();
            assert!(height <= b.height, "page {} is {} tall", page.index, height);
        }

        let expected: Vec<String> = doc
            .iter()
            .flat_map(|block| block.words_in(0..block.word_count()).map(str::to_string))
            .collect();
        assert_eq!(flatten_words(&doc, &result), expected);
    }

    #[test]
    fn test_nan_height_terminates() {
        struct NanOracle;
        impl MeasurementOracle for NanOracle {
            fn measure(&self, _: &[BlockView<'_>], _: f32, _: &FontSpec) -> Result<f32> {
                Ok(f32::NAN)
            }
        }

        let doc = DocumentModel::from_blocks(vec![
            BlockNode::image(1.0, 1.0),
            BlockNode::image(1.0, 1.0),
        ]);
        let result = paginate(
            &doc,
            budget(100.0, 100.0),
            &FontSpec::default(),
            &NanOracle,
            WordSearch::Binary,
        )
        .unwrap();
        assert_eq!(result.page_count(), 2);
        assert_eq!(result.warnings().count(), 2);
    }

    #[test]
    fn test_accumulator_measure_is_pure() {
        let doc = DocumentModel::from_blocks(vec![BlockNode::paragraph(words(10))]);
        let oracle = WordOracle::new(2.0);
        let font = FontSpec::default();
        let mut acc = PageAccumulator::new();
        acc.push(PageItem::Block { index: 0 });

        let candidate = PageItem::Block { index: 0 };
        let with = acc
            .measure_with(&doc, Some(&candidate), 100.0, &font, &oracle)
            .unwrap();
        let without = acc.measure_with(&doc, None, 100.0, &font, &oracle).unwrap();
        assert_eq!(with, 40.0);
        assert_eq!(without, 20.0);
        assert_eq!(acc.len(), 1);
    }
}
