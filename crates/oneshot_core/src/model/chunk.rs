//! Paragraph and chunk value types.
//!
//! # Responsibility
//! - Represent trimmed paragraph units and the word-bounded chunks built from them.
//!
//! # Invariants
//! - A `Paragraph` is never empty and never carries leading/trailing whitespace.
//! - A `Chunk` holds at least one paragraph; `word_count` equals the sum of its
//!   paragraphs' word counts.
//! - Chunk text is its paragraphs joined by `PARAGRAPH_SEPARATOR`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Separator used when paragraphs are joined back into chunk text.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Counts maximal runs of alphanumeric/underscore characters.
pub fn count_words(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

/// One trimmed, non-empty block of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    text: String,
    word_count: usize,
}

impl Paragraph {
    /// Trims `raw`; returns `None` when nothing remains.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            text: trimmed.to_string(),
            word_count: count_words(trimmed),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

/// Ordered group of whole paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    paragraphs: Vec<Paragraph>,
    word_count: usize,
}

impl Chunk {
    /// Builds a chunk from an ordered, non-empty paragraph list.
    ///
    /// Returns `None` for an empty list so that no empty chunk can exist.
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Option<Self> {
        if paragraphs.is_empty() {
            return None;
        }
        let word_count = paragraphs.iter().map(Paragraph::word_count).sum();
        Some(Self {
            paragraphs,
            word_count,
        })
    }

    /// Appends every paragraph of `other` after this chunk's paragraphs.
    pub fn absorb(&mut self, other: Chunk) {
        self.word_count += other.word_count;
        self.paragraphs.extend(other.paragraphs);
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Rendered chunk text.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::as_str)
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR)
    }
}
