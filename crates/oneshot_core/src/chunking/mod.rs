//! Text segmentation and chunk assembly.
//!
//! # Responsibility
//! - Split extracted text into ordered paragraphs at blank-line boundaries.
//! - Group paragraphs into word-count-bounded chunks.
//!
//! # Invariants
//! - Paragraph order is preserved end to end.
//! - A paragraph is never split across chunks.

pub mod assembler;
pub mod segment;

pub use assembler::assemble_chunks;
pub use segment::split_paragraphs;
