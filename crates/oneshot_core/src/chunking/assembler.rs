//! Word-count-bounded chunk assembler.
//!
//! # Invariants
//! - Chunks are sealed as soon as their word count reaches `target_words`.
//! - After the merge pass, only the first chunk may stay below `min_words`,
//!   and only when it has no predecessor to merge into.

use crate::config::ChunkingConfig;
use crate::model::chunk::{Chunk, Paragraph};
use log::debug;

/// Groups ordered paragraphs into chunks.
///
/// Paragraphs accumulate greedily until the pending word count reaches
/// `target_words`; leftovers form a final chunk. A second pass merges every
/// chunk below `min_words` into the chunk immediately before it.
pub fn assemble_chunks(paragraphs: Vec<Paragraph>, config: &ChunkingConfig) -> Vec<Chunk> {
    let paragraph_count = paragraphs.len();
    let sealed = seal_at_target(paragraphs, config.target_words);
    let sealed_count = sealed.len();
    let merged = merge_undersized(sealed, config.min_words);

    debug!(
        "event=chunk_assemble module=chunking status=ok paragraphs={} sealed={} chunks={}",
        paragraph_count,
        sealed_count,
        merged.len()
    );
    merged
}

fn seal_at_target(paragraphs: Vec<Paragraph>, target_words: usize) -> Vec<Chunk> {
    let mut sealed = Vec::new();
    let mut pending: Vec<Paragraph> = Vec::new();
    let mut pending_words = 0usize;

    for paragraph in paragraphs {
        pending_words += paragraph.word_count();
        pending.push(paragraph);
        if pending_words >= target_words {
            sealed.extend(Chunk::from_paragraphs(std::mem::take(&mut pending)));
            pending_words = 0;
        }
    }
    sealed.extend(Chunk::from_paragraphs(pending));
    sealed
}

fn merge_undersized(sealed: Vec<Chunk>, min_words: usize) -> Vec<Chunk> {
    let mut merged: Vec<Chunk> = Vec::with_capacity(sealed.len());
    for chunk in sealed {
        match merged.last_mut() {
            Some(previous) if chunk.word_count() < min_words => previous.absorb(chunk),
            _ => merged.push(chunk),
        }
    }
    merged
}
