//! Paragraph segmenter.

use crate::model::chunk::Paragraph;
use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid blank-line regex"));

/// Splits `text` on one or more blank lines and trims each piece.
///
/// Lines holding only whitespace count as blank. Pieces that are empty after
/// trimming are dropped, so blank input yields an empty vector.
pub fn split_paragraphs(text: &str) -> Vec<Paragraph> {
    BLANK_LINE_RUN_RE
        .split(text)
        .filter_map(Paragraph::new)
        .collect()
}
