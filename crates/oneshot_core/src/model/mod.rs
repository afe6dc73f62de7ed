//! Domain model for paragraphs, chunks and atomic-document metadata.
//!
//! # Responsibility
//! - Define the value types passed between pipeline stages.
//! - Own the front-matter rendering format shared by documents and index.
//!
//! # Invariants
//! - Paragraphs and chunks are immutable once built, except for backward
//!   merging inside the chunk assembler.
//! - Front-matter blocks always begin and end with a `---` line.

pub mod chunk;
pub mod content_kind;
pub mod front_matter;
