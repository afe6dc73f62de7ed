//! Plain-text passthrough extractor.

use super::{normalize_newlines, ExtractionError, TextExtractor};
use std::path::Path;

/// Reads UTF-8 text files as already-extracted input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn extract(&self, input: &Path) -> Result<String, ExtractionError> {
        let bytes = std::fs::read(input).map_err(|source| ExtractionError::Read {
            path: input.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|err| ExtractionError::Decode {
            path: input.to_path_buf(),
            message: format!("input is not valid UTF-8: {err}"),
        })?;
        Ok(normalize_newlines(&text))
    }
}
