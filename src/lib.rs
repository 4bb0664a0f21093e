//! Page Composer: repaginate flowed documents into fixed page frames
//!
//! This crate provides the core composition engine with:
//! - Greedy page fill with word-level paragraph splitting
//! - A pluggable measurement oracle as the only source of rendered heights
//! - An interactive placement region whose size is the page content budget
//! - Font-size auto-fit to a target page count
//! - Stale-run rejection so the most recent input change always wins

pub mod config;
pub mod document;
pub mod error;
pub mod layout;
pub mod region;
pub mod render;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmComposer;

// Re-export primary types
pub use config::{ComposerConfig, PageFrame};
pub use document::{
    BlockId, BlockKind, BlockNode, DocumentImporter, DocumentModel, JsonImporter, ListMarker,
    PlainTextImporter,
};
pub use error::{ConversionError, Error, Result};
pub use layout::{
    AutoFit, AutoFitOptions, Budget, FitFailure, FitWarning, FontSpec, MeasurementOracle, Page,
    PageItem, Pagination, PaginationJob, RunOutcome, RunTicket, TextMetricsOracle, WordSearch,
};
pub use region::{GeometryChange, InteractionMode, PlacementRegion};
pub use render::{DisplayItem, DisplayList, DisplayPage, ExportPipeline};

use layout::PaginationState;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Canvas rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// The composition session: document, region, font, oracle and pages.
///
/// Any change to the document, the font or the region size invalidates the
/// current pages; [`Composer::update_layout`] recomputes them. Moving the
/// region only changes where the content box is drawn.
pub struct Composer<O: MeasurementOracle> {
    config: ComposerConfig,
    document: DocumentModel,
    region: PlacementRegion,
    font: FontSpec,
    oracle: O,
    state: PaginationState,
    background: Option<String>,
    /// A budget change is waiting for the current interaction to end
    deferred: bool,
}

impl<O: MeasurementOracle> Composer<O> {
    /// Create a session with a validated configuration
    pub fn new(config: ComposerConfig, oracle: O) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, oracle))
    }

    /// Create a session with the default configuration
    pub fn with_oracle(oracle: O) -> Self {
        Self::build(ComposerConfig::default(), oracle)
    }

    fn build(config: ComposerConfig, oracle: O) -> Self {
        Self {
            region: PlacementRegion::with_min_size(config.region, config.min_region_size),
            font: config.font.clone(),
            document: DocumentModel::new(),
            state: PaginationState::new(),
            background: None,
            deferred: false,
            oracle,
            config,
        }
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn document(&self) -> &DocumentModel {
        &self.document
    }

    pub fn region(&self) -> &PlacementRegion {
        &self.region
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Replace the measurement oracle; existing pages are invalidated
    pub fn set_oracle(&mut self, oracle: O) {
        self.oracle = oracle;
        self.state.invalidate();
    }

    pub fn budget(&self) -> Budget {
        self.region.budget()
    }

    /// Latest successful pagination, possibly older than the inputs
    pub fn pagination(&self) -> Option<&Arc<Pagination>> {
        self.state.pages()
    }

    pub fn page_count(&self) -> usize {
        self.state.page_count()
    }

    /// Whether the pages are missing or older than the inputs
    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    /// Page on which block `id` starts in the latest pagination
    pub fn page_of_block(&self, id: BlockId) -> Option<usize> {
        self.pagination()?.page_of(&self.document, id)
    }

    /// Import a document. On failure the current document and pages are kept.
    pub fn load<I: DocumentImporter + ?Sized>(&mut self, bytes: &[u8], importer: &I) -> Result<()> {
        let blocks = importer.convert(bytes)?;
        log::debug!("loaded document with {} blocks", blocks.len());
        self.set_document(DocumentModel::from_blocks(blocks));
        Ok(())
    }

    /// Replace the document. Handing back the current document is a no-op.
    pub fn set_document(&mut self, document: DocumentModel) {
        if self.document.same_content(&document) {
            return;
        }
        self.document = document;
        self.state.invalidate();
    }

    pub fn set_font_size(&mut self, size: f32) -> Result<()> {
        self.set_font(self.font.with_size(size))
    }

    pub fn set_font(&mut self, font: FontSpec) -> Result<()> {
        if !(font.size.is_finite() && font.size > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "font size {} must be positive",
                font.size
            )));
        }
        if font != self.font {
            self.font = font;
            self.state.invalidate();
        }
        Ok(())
    }

    /// Opaque template asset drawn behind every page
    pub fn set_background(&mut self, background: Option<String>) {
        self.background = background;
    }

    /// Set region geometry directly. Ends any interaction in progress.
    pub fn set_region(&mut self, rect: Rect) -> Option<GeometryChange> {
        let change = self.region.set_rect(rect);
        if change.is_some_and(|c| c.budget_changed()) {
            self.deferred = true;
        }
        self.settle();
        change
    }

    pub fn begin_drag(&mut self, pointer: Point) -> bool {
        self.region.begin_drag(pointer)
    }

    pub fn begin_resize(&mut self, pointer: Point) -> bool {
        self.region.begin_resize(pointer)
    }

    /// Forward a pointer move to the region.
    ///
    /// A size change invalidates the pages immediately when
    /// `repaginate_during_interaction` is set, otherwise once the
    /// interaction ends.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<GeometryChange> {
        let change = self.region.on_pointer_move(pointer)?;
        if change.budget_changed() {
            if self.config.repaginate_during_interaction {
                self.state.invalidate();
            } else {
                self.deferred = true;
            }
        }
        Some(change)
    }

    pub fn end_interaction(&mut self) {
        self.region.end_interaction();
        self.settle();
    }

    /// Enable or freeze the region
    pub fn set_interactive(&mut self, enabled: bool) {
        if enabled {
            self.region.enable();
        } else {
            self.region.disable();
            self.settle();
        }
    }

    /// Apply a deferred budget change once no interaction is active
    fn settle(&mut self) {
        if self.deferred && !self.region.is_interacting() {
            log::debug!("applying deferred region change");
            self.deferred = false;
            self.state.invalidate();
        }
    }

    /// Snapshot the current inputs as a self-contained run
    pub fn begin_pagination(&self) -> PaginationJob {
        PaginationJob {
            ticket: self.state.ticket(),
            document: self.document.clone(),
            budget: self.region.budget(),
            font: self.font.clone(),
            search: self.config.word_search,
        }
    }

    /// Offer a finished run; results for outdated inputs are dropped
    pub fn finish_pagination(
        &mut self,
        ticket: RunTicket,
        result: Result<Pagination>,
    ) -> Result<RunOutcome> {
        self.state.finish(ticket, result)
    }

    /// Repaginate if the inputs changed since the last successful run.
    ///
    /// Returns whether a new page set was applied. On error the previous
    /// pages stay in place.
    pub fn update_layout(&mut self) -> Result<bool> {
        if !self.state.is_dirty() {
            return Ok(false);
        }
        let job = self.begin_pagination();
        let result = job.run(&self.oracle);
        let outcome = self.finish_pagination(job.ticket, result)?;
        Ok(outcome == RunOutcome::Applied)
    }

    /// Fit the font size to the configured target page count
    pub fn auto_fit(&mut self) -> Result<AutoFit> {
        let options = self.config.auto_fit;
        self.auto_fit_with(&options)
    }

    /// Fit the font size and adopt the result as the current pages
    pub fn auto_fit_with(&mut self, options: &AutoFitOptions) -> Result<AutoFit> {
        let fit = layout::fit_font_size(
            &self.document,
            self.region.budget(),
            &self.font,
            &self.oracle,
            self.config.word_search,
            options,
        )?;
        log::debug!(
            "auto-fit chose size {} ({} pages, target met: {})",
            fit.font_size,
            fit.pagination.page_count(),
            fit.met_target
        );

        self.set_font_size(fit.font_size)?;
        let ticket = self.state.ticket();
        self.state.finish(ticket, Ok(fit.pagination.clone()))?;
        Ok(fit)
    }

    /// Build the display list for the latest pages
    pub fn display_list(&self) -> DisplayList {
        match self.state.pages() {
            Some(pagination) => DisplayList::build(
                &self.document,
                pagination,
                self.config.page_frame,
                &self.region,
                self.background.as_deref(),
                self.state.generation(),
            ),
            None => DisplayList {
                version: self.state.generation(),
                pages: Vec::new(),
            },
        }
    }

    /// Export every page through `pipeline`.
    ///
    /// The region is frozen for the duration and its previous state restored
    /// afterwards, also on failure. Pages are brought up to date first.
    pub fn export<P: ExportPipeline + ?Sized>(&mut self, pipeline: &mut P) -> Result<P::Output> {
        let was_enabled = self.region.is_enabled();
        self.set_interactive(false);

        let result = self.update_layout().and_then(|_| {
            let list = self.display_list();
            render::export_pages(&list, self.config.page_frame, pipeline)
        });
        if was_enabled {
            self.region.enable();
        }
        result
    }
}
