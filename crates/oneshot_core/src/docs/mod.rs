//! Atomic-document synthesis and docs tree assembly.
//!
//! # Responsibility
//! - Turn chunks into titled, classified, front-matter-tagged documents.
//! - Write the docs tree (README, shared stub, atomic files, index) into a
//!   fresh, non-colliding directory.
//!
//! # Invariants
//! - README.md never carries front matter; every other Markdown file does.
//! - No file is overwritten within one run and no existing directory is reused.

pub mod document;
pub mod tree;

pub use document::{derive_title, AtomicDocument, DocumentContext};
pub use tree::{choose_docs_dir, write_docs_tree, DocsTree, TreeError};
