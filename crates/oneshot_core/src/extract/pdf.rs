//! PDF text extractor backed by `pdf-extract`.

use super::{normalize_newlines, ExtractionError, TextExtractor, PAGE_SEPARATOR};
use std::path::Path;

/// Form feed emitted by `pdf-extract` between pages.
const PAGE_BREAK: char = '\x0C';

/// Extracts page text from PDF files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn extract(&self, input: &Path) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(input).map_err(|source| ExtractionError::Read {
            path: input.to_path_buf(),
            source,
        })?;
        let raw = pdf_extract::extract_text_from_mem(&bytes).map_err(|err| {
            ExtractionError::Decode {
                path: input.to_path_buf(),
                message: err.to_string(),
            }
        })?;
        Ok(join_pages(&raw))
    }
}

/// Splits on form feeds, drops blank pages and joins pages with a blank line.
fn join_pages(raw: &str) -> String {
    normalize_newlines(raw)
        .split(PAGE_BREAK)
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}
