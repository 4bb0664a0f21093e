//! Font-size search for a target page count

use crate::document::DocumentModel;
use crate::error::{Error, Result};
use crate::layout::font::FontSpec;
use crate::layout::oracle::MeasurementOracle;
use crate::layout::pagination::{paginate, Budget, Pagination, WordSearch};
use serde::{Deserialize, Serialize};

/// Bounds for the font-size search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoFitOptions {
    pub min_font: f32,
    pub max_font: f32,
    /// Bisection steps after the bounds are checked
    pub iterations: u32,
    pub target_pages: usize,
}

impl Default for AutoFitOptions {
    fn default() -> Self {
        Self {
            min_font: 10.0,
            max_font: 40.0,
            iterations: 8,
            target_pages: 1,
        }
    }
}

impl AutoFitOptions {
    pub fn validate(&self) -> Result<()> {
        if !(self.min_font.is_finite() && self.max_font.is_finite() && self.min_font > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "auto-fit font range {}..{} must be positive",
                self.min_font, self.max_font
            )));
        }
        if self.min_font > self.max_font {
            return Err(Error::InvalidConfig(format!(
                "auto-fit minimum font {} exceeds maximum {}",
                self.min_font, self.max_font
            )));
        }
        if self.iterations == 0 {
            return Err(Error::InvalidConfig(
                "auto-fit needs at least one iteration".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a font-size search
#[derive(Debug, Clone, PartialEq)]
pub struct AutoFit {
    /// Largest size found that meets the target, or the minimum if none does
    pub font_size: f32,
    /// Whether `font_size` meets the target page count
    pub met_target: bool,
    /// Pagination at `font_size`
    pub pagination: Pagination,
    /// Number of full pagination runs performed
    pub runs: u32,
}

/// Search for the largest font size whose pagination has at most
/// `options.target_pages` pages.
///
/// Each trial is a full [`paginate`] run, so the result agrees with what the
/// engine produces at the chosen size.
pub fn fit_font_size<O: MeasurementOracle + ?Sized>(
    document: &DocumentModel,
    budget: Budget,
    font: &FontSpec,
    oracle: &O,
    search: WordSearch,
    options: &AutoFitOptions,
) -> Result<AutoFit> {
    options.validate()?;

    let mut runs = 0;
    let mut run_at = |size: f32| -> Result<Pagination> {
        runs += 1;
        paginate(document, budget, &font.with_size(size), oracle, search)
    };
    let meets = |pagination: &Pagination| pagination.page_count() <= options.target_pages;

    let largest = run_at(options.max_font)?;
    if meets(&largest) {
        return Ok(AutoFit {
            font_size: options.max_font,
            met_target: true,
            pagination: largest,
            runs,
        });
    }

    let smallest = run_at(options.min_font)?;
    if !meets(&smallest) {
        log::debug!(
            "auto-fit: {} pages even at {}, target {}",
            smallest.page_count(),
            options.min_font,
            options.target_pages
        );
        return Ok(AutoFit {
            font_size: options.min_font,
            met_target: false,
            pagination: smallest,
            runs,
        });
    }

    // Invariant: `lo` meets the target, `hi` does not
    let (mut lo, mut hi) = (options.min_font, options.max_font);
    let mut best = smallest;

    for _ in 0..options.iterations {
        let mid = (lo + hi) / 2.0;
        let pagination = run_at(mid)?;
        log::debug!(
            "auto-fit: size {} gives {} pages",
            mid,
            pagination.page_count()
        );
        if meets(&pagination) {
            lo = mid;
            best = pagination;
        } else {
            hi = mid;
        }
    }

    Ok(AutoFit {
        font_size: lo,
        met_target: true,
        pagination: best,
        runs,
    })
}
