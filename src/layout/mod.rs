//! Layout: measurement, pagination and font fitting

mod autofit;
mod engine;
pub mod font;
mod line_break;
mod oracle;
mod pagination;

pub use autofit::{fit_font_size, AutoFit, AutoFitOptions};
pub use engine::{PaginationJob, PaginationState, RunOutcome, RunTicket};
pub use font::{FontMetrics, FontSpec};
pub use line_break::{LineBreaker, TextMetricsOracle, INDENT_WIDTH};
pub use oracle::{BlockView, MeasurementOracle};
pub use pagination::{
    paginate, Budget, FitFailure, FitWarning, Page, PageAccumulator, PageItem, Pagination,
    WordSearch,
};

#[cfg(test)]
pub(crate) use oracle::testing;
