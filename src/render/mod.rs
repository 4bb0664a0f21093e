//! Render output: display list and export

mod display;
mod export;

pub use display::{DisplayItem, DisplayItemId, DisplayList, DisplayPage, ListMarkerDisplay};
pub use export::{export_pages, ExportPipeline};

#[cfg(test)]
pub(crate) use export::testing;
