//! Import service interface and the built-in converters

use crate::document::{BlockKind, BlockNode, ListMarker};
use crate::error::ConversionError;

/// Converts raw document bytes into an ordered block sequence.
///
/// Binary word-processing formats are converted by an external service that
/// implements this trait; the crate ships converters for serialized block
/// lists and plain text.
pub trait DocumentImporter {
    fn convert(&self, bytes: &[u8]) -> Result<Vec<BlockNode>, ConversionError>;
}

impl<F> DocumentImporter for F
where
    F: Fn(&[u8]) -> Result<Vec<BlockNode>, ConversionError>,
{
    fn convert(&self, bytes: &[u8]) -> Result<Vec<BlockNode>, ConversionError> {
        self(bytes)
    }
}

/// Reads a JSON array of block nodes
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonImporter;

impl DocumentImporter for JsonImporter {
    fn convert(&self, bytes: &[u8]) -> Result<Vec<BlockNode>, ConversionError> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(ConversionError::Empty);
        }

        let blocks: Vec<BlockNode> = serde_json::from_slice(bytes)?;

        for (idx, block) in blocks.iter().enumerate() {
            match block.kind {
                BlockKind::Image { width, height } => {
                    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
                        return Err(ConversionError::Malformed(format!(
                            "block {} has invalid image size {}x{}",
                            idx, width, height
                        )));
                    }
                }
                BlockKind::Heading { level } if !(1..=6).contains(&level) => {
                    return Err(ConversionError::Malformed(format!(
                        "block {} has heading level {}",
                        idx, level
                    )));
                }
                _ => {}
            }
        }

        Ok(blocks)
    }
}

/// Reads plain text: blank lines separate blocks, `#` lines are headings,
/// `- `/`* ` and `N. ` lines are list items.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextImporter;

impl DocumentImporter for PlainTextImporter {
    fn convert(&self, bytes: &[u8]) -> Result<Vec<BlockNode>, ConversionError> {
        let text = std::str::from_utf8(bytes)?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        let mut blocks = Vec::new();
        let mut paragraph: Vec<&str> = Vec::new();

        for line in text.split('\n') {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                flush_paragraph(&mut paragraph, &mut blocks);
                continue;
            }

            if let Some((level, title)) = parse_heading(trimmed) {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.push(BlockNode::heading(level, title));
            } else if let Some((marker, item)) = parse_list_item(trimmed) {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.push(BlockNode::list_item(marker, item));
            } else {
                paragraph.push(trimmed);
            }
        }
        flush_paragraph(&mut paragraph, &mut blocks);

        Ok(blocks)
    }
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<BlockNode>) {
    if !lines.is_empty() {
        blocks.push(BlockNode::paragraph(lines.join(" ")));
        lines.clear();
    }
}

fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(' ') {
        return None;
    }
    Some((hashes as u8, rest.trim()))
}

fn parse_list_item(line: &str) -> Option<(ListMarker, &str)> {
    if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some((ListMarker::Bullet, item.trim()));
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let item = line[digits..].strip_prefix(". ")?;
    let ordinal = line[..digits].parse().ok()?;
    Some((ListMarker::Numbered { ordinal }, item.trim()))
}
