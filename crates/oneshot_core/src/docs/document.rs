//! Atomic document synthesis.

use crate::classify::classify;
use crate::config::{MetadataConfig, SlugConfig};
use crate::model::chunk::Chunk;
use crate::model::front_matter::{FrontMatter, SourceRef};
use crate::slug::slugify_with;
use std::collections::HashSet;

/// First lines longer than this many characters are shortened to a word prefix.
pub const MAX_TITLE_LINE_CHARS: usize = 80;
/// Number of words kept when a first line is too long to be a title.
pub const TITLE_PREFIX_WORDS: usize = 6;
/// Slugs that would shadow the tree's own top-level files.
pub const RESERVED_SLUGS: &[&str] = &["index", "readme"];

/// Per-run values shared by every atomic document.
#[derive(Debug, Clone, Copy)]
pub struct DocumentContext<'a> {
    /// Product name and base of the docs directory name.
    pub base: &'a str,
    /// Display name of the originating document.
    pub source_name: &'a str,
    pub slug: &'a SlugConfig,
    pub metadata: &'a MetadataConfig,
}

/// One rendered unit of the docs tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicDocument {
    /// 1-based chunk position.
    pub index: usize,
    pub title: String,
    pub filename: String,
    pub front_matter: FrontMatter,
    pub body: String,
}

impl AtomicDocument {
    /// Builds the document for the `index`-th chunk (1-based).
    ///
    /// `taken` holds filenames already used in this run; the chosen filename
    /// is inserted before returning.
    pub fn from_chunk(
        index: usize,
        chunk: &Chunk,
        context: &DocumentContext<'_>,
        taken: &mut HashSet<String>,
    ) -> Self {
        let text = chunk.text();
        let title = derive_title(&text, index);
        let filename = unique_filename(&slugify_with(&title, context.slug), index, taken);

        let mut front_matter = FrontMatter::new(
            title.as_str(),
            classify(&text),
            SourceRef::pdf(context.source_name, format!("chunk-{index}")),
        );
        front_matter.product = Some(context.base.to_string());
        front_matter.vendor = non_empty(&context.metadata.vendor);
        front_matter.language = non_empty(&context.metadata.language);
        front_matter.domain = non_empty(&context.metadata.domain);
        front_matter.tags = context.metadata.tags.clone();

        let body = format!("# {title}\n\n{text}\n");
        Self {
            index,
            title,
            filename,
            front_matter,
            body,
        }
    }

    /// Front-matter block followed by the body.
    pub fn render(&self) -> String {
        let mut rendered = self.front_matter.render();
        rendered.push_str(&self.body);
        rendered
    }
}

/// Blank metadata values are treated as absent.
fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Derives a title from the chunk's first line.
///
/// Lines up to `MAX_TITLE_LINE_CHARS` characters are used whole; longer lines
/// are cut to their first `TITLE_PREFIX_WORDS` words. Empty results fall back
/// to `unit-<index>`.
pub fn derive_title(chunk_text: &str, index: usize) -> String {
    let first_line = chunk_text.split('\n').next().unwrap_or_default().trim();
    let title = if first_line.chars().count() <= MAX_TITLE_LINE_CHARS {
        first_line.to_string()
    } else {
        first_line
            .split_whitespace()
            .take(TITLE_PREFIX_WORDS)
            .collect::<Vec<_>>()
            .join(" ")
    };
    if title.is_empty() {
        format!("unit-{index}")
    } else {
        title
    }
}

/// Picks a filename not yet used in this run.
///
/// Empty or reserved slugs become `unit-<index>`; taken names get the chunk
/// index appended, then a counter if still taken.
fn unique_filename(slug: &str, index: usize, taken: &mut HashSet<String>) -> String {
    let stem = if slug.is_empty() || RESERVED_SLUGS.contains(&slug) {
        format!("unit-{index}")
    } else {
        slug.to_string()
    };

    let mut candidate = format!("{stem}.md");
    if taken.contains(&candidate) {
        candidate = format!("{stem}-{index}.md");
        let mut counter = 2usize;
        while taken.contains(&candidate) {
            candidate = format!("{stem}-{index}-{counter}.md");
            counter += 1;
        }
    }
    taken.insert(candidate.clone());
    candidate
}
