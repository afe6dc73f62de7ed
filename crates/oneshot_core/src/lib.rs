//! Core pipeline for turning extracted document text into an LLM-oriented
//! docs tree of atomic Markdown units.
//! This crate owns every chunking, naming and metadata invariant.

pub mod chunking;
pub mod classify;
pub mod config;
pub mod docs;
pub mod extract;
pub mod logging;
pub mod model;
pub mod package;
pub mod pipeline;
pub mod slug;

pub use chunking::{assemble_chunks, split_paragraphs};
pub use classify::classify;
pub use config::{
    ChunkingConfig, ConfigError, MetadataConfig, OutputConfig, PipelineConfig, SlugConfig,
};
pub use docs::{write_docs_tree, AtomicDocument, DocsTree, TreeError};
pub use docs::tree::TreeRequest;
pub use extract::{probe_extractor, ExtractionError, ExtractorProbe, TextExtractor};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget};
pub use model::chunk::{count_words, Chunk, Paragraph};
pub use model::content_kind::ContentKind;
pub use model::front_matter::{FrontMatter, FrontMatterBlock, SourceRef};
pub use package::{package_tree, validate_tree, PackageError, PackagingError, ValidationError};
pub use pipeline::{run, run_pipeline, PipelineError, PipelineReport};
pub use slug::slugify;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
