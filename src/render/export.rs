//! Export: rasterize rendered pages and assemble them into one output

use crate::config::PageFrame;
use crate::error::{Error, Result};
use crate::render::display::{DisplayList, DisplayPage};

/// External rasterization and assembly service.
///
/// `rasterize` is called once per page, in page order, and never
/// concurrently. `assemble` receives every image in the same order.
pub trait ExportPipeline {
    type Image;
    type Output;

    fn rasterize(&mut self, page: &DisplayPage, frame: PageFrame) -> Result<Self::Image>;

    fn assemble(&mut self, images: Vec<Self::Image>, frame: PageFrame) -> Result<Self::Output>;
}

/// Run every page of `list` through `pipeline`.
///
/// The list should be built from a frozen session: no page may still be
/// interactive.
pub fn export_pages<P: ExportPipeline + ?Sized>(
    list: &DisplayList,
    frame: PageFrame,
    pipeline: &mut P,
) -> Result<P::Output> {
    if list.is_empty() {
        return Err(Error::Export("nothing to export".to_string()));
    }
    if let Some(page) = list.pages.iter().find(|p| p.interactive) {
        return Err(Error::Export(format!(
            "page {} is still interactive",
            page.page_index + 1
        )));
    }

    let mut images = Vec::with_capacity(list.pages.len());
    for page in &list.pages {
        log::debug!("rasterizing page {}/{}", page.page_index + 1, list.pages.len());
        images.push(pipeline.rasterize(page, frame)?);
    }
    pipeline.assemble(images, frame)
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingPipeline;
    use super::*;
    use crate::Rect;

    fn page(index: usize, interactive: bool) -> DisplayPage {
        DisplayPage {
            page_index: index,
            frame: PageFrame::A4.rect(),
            content_box: Rect::new(80.0, 120.0, 630.0, 850.0),
            items: Vec::new(),
            overflow: None,
            interactive,
            background: None,
        }
    }

    #[test]
    fn test_exports_pages_in_order() {
        let list = DisplayList {
            version: 0,
            pages: vec![page(0, false), page(1, false), page(2, false)],
        };
        let mut pipeline = RecordingPipeline::default();
        let output = export_pages(&list, PageFrame::A4, &mut pipeline).unwrap();
        assert_eq!(pipeline.rasterized, vec![0, 1, 2]);
        assert_eq!(output.len(), 3);
    }

    #[test]
    fn test_rejects_interactive_pages() {
        let list = DisplayList {
            version: 0,
            pages: vec![page(0, true)],
        };
        let result = export_pages(&list, PageFrame::A4, &mut RecordingPipeline::default());
        assert!(matches!(result, Err(Error::Export(_))));
    }

    #[test]
    fn test_rejects_empty_list() {
        let list = DisplayList {
            version: 0,
            pages: Vec::new(),
        };
        let result = export_pages(&list, PageFrame::A4, &mut RecordingPipeline::default());
        assert!(matches!(result, Err(Error::Export(_))));
    }

    #[test]
    fn test_rasterize_failure_stops_export() {
        let list = DisplayList {
            version: 0,
            pages: vec![page(0, false), page(1, false), page(2, false)],
        };
        let mut pipeline = RecordingPipeline {
            fail_on: Some(1),
            ..Default::default()
        };
        assert!(export_pages(&list, PageFrame::A4, &mut pipeline).is_err());
        assert_eq!(pipeline.rasterized, vec![0]);
    }
}
