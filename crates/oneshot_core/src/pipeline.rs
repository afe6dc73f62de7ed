//! End-to-end pipeline: extract, chunk, write docs tree, package.
//!
//! # Responsibility
//! - Chain the stages with typed inputs/outputs and fail-fast errors.
//! - Map every failure kind to a distinct process exit code.
//!
//! # Invariants
//! - A failing stage stops the run; later stages are never attempted.
//! - Partially written artifacts are left on disk.
//! - No stage is retried.

use crate::chunking::{assemble_chunks, split_paragraphs};
use crate::config::{ConfigError, PipelineConfig};
use crate::docs::tree::{write_docs_tree, TreeError, TreeRequest};
use crate::extract::{
    extract_logged, extract_to_file, probe_extractor, ExtractionError, ExtractorProbe,
};
use crate::package::{package_tree, PackageError, PackagingError, ValidationError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const EXIT_OK: i32 = 0;
pub const EXIT_INPUT_NOT_FOUND: i32 = 2;
pub const EXIT_EXTRACTION_UNAVAILABLE: i32 = 3;
pub const EXIT_EXTRACTION_FAILED: i32 = 10;
pub const EXIT_CONFIG_INVALID: i32 = 11;
pub const EXIT_TREE_WRITE_FAILED: i32 = 12;
pub const EXIT_VALIDATION_ROOT_MISSING: i32 = 20;
pub const EXIT_VALIDATION_README_MISSING: i32 = 21;
pub const EXIT_VALIDATION_README_FRONT_MATTER: i32 = 22;
pub const EXIT_VALIDATION_INDEX_MISSING: i32 = 23;
pub const EXIT_VALIDATION_INDEX_FRONT_MATTER: i32 = 24;
pub const EXIT_VALIDATION_FILE_FRONT_MATTER: i32 = 25;
pub const EXIT_VALIDATION_IO: i32 = 26;
pub const EXIT_PACKAGING_FAILED: i32 = 30;

/// Suffix of the optional intermediate text artifact.
pub const INTERMEDIATE_SUFFIX: &str = "-intermediate.txt";

/// Terminal pipeline failure.
#[derive(Debug)]
pub enum PipelineError {
    InputNotFound(PathBuf),
    ExtractionUnavailable(String),
    ExtractionFailed(ExtractionError),
    Config(ConfigError),
    TreeWrite(TreeError),
    ValidationFailed(ValidationError),
    PackagingFailed(PackagingError),
}

impl PipelineError {
    /// Process exit status for this failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputNotFound(_) => EXIT_INPUT_NOT_FOUND,
            Self::ExtractionUnavailable(_) => EXIT_EXTRACTION_UNAVAILABLE,
            Self::ExtractionFailed(_) => EXIT_EXTRACTION_FAILED,
            Self::Config(_) => EXIT_CONFIG_INVALID,
            Self::TreeWrite(_) => EXIT_TREE_WRITE_FAILED,
            Self::ValidationFailed(err) => validation_exit_code(err),
            Self::PackagingFailed(_) => EXIT_PACKAGING_FAILED,
        }
    }

    /// Stable error code used in log events.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InputNotFound(_) => "input_not_found",
            Self::ExtractionUnavailable(_) => "extraction_unavailable",
            Self::ExtractionFailed(_) => "extraction_failed",
            Self::Config(_) => "config_invalid",
            Self::TreeWrite(_) => "tree_write_failed",
            Self::ValidationFailed(_) => "validation_failed",
            Self::PackagingFailed(_) => "packaging_failed",
        }
    }
}

fn validation_exit_code(err: &ValidationError) -> i32 {
    match err {
        ValidationError::RootMissing(_) => EXIT_VALIDATION_ROOT_MISSING,
        ValidationError::ReadmeMissing => EXIT_VALIDATION_README_MISSING,
        ValidationError::ReadmeHasFrontMatter => EXIT_VALIDATION_README_FRONT_MATTER,
        ValidationError::IndexMissing => EXIT_VALIDATION_INDEX_MISSING,
        ValidationError::IndexMissingFrontMatter => EXIT_VALIDATION_INDEX_FRONT_MATTER,
        ValidationError::FileMissingFrontMatter(_) => EXIT_VALIDATION_FILE_FRONT_MATTER,
        ValidationError::Io { .. } => EXIT_VALIDATION_IO,
    }
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputNotFound(path) => write!(f, "input document not found: {}", path.display()),
            Self::ExtractionUnavailable(reason) => write!(f, "extraction unavailable: {reason}"),
            Self::ExtractionFailed(err) => write!(f, "extraction failed: {err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::TreeWrite(err) => write!(f, "docs tree write failed: {err}"),
            Self::ValidationFailed(err) => write!(f, "validation failed: {err}"),
            Self::PackagingFailed(err) => write!(f, "packaging failed: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ExtractionFailed(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::TreeWrite(err) => Some(err),
            Self::ValidationFailed(err) => Some(err),
            Self::PackagingFailed(err) => Some(err),
            Self::InputNotFound(_) | Self::ExtractionUnavailable(_) => None,
        }
    }
}

impl From<ExtractionError> for PipelineError {
    fn from(value: ExtractionError) -> Self {
        Self::ExtractionFailed(value)
    }
}

impl From<ConfigError> for PipelineError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TreeError> for PipelineError {
    fn from(value: TreeError) -> Self {
        Self::TreeWrite(value)
    }
}

impl From<PackageError> for PipelineError {
    fn from(value: PackageError) -> Self {
        match value {
            PackageError::Validation(err) => Self::ValidationFailed(err),
            PackageError::Packaging(err) => Self::PackagingFailed(err),
        }
    }
}

/// Artifacts produced by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub docs_dir: PathBuf,
    /// Atomic document filenames in chunk order.
    pub files: Vec<String>,
    pub intermediate: Option<PathBuf>,
    pub archive: Option<PathBuf>,
}

/// Runs every stage for `input` and returns the produced artifacts.
pub fn run_pipeline(input: &Path, config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let started_at = Instant::now();
    info!(
        "event=pipeline_run module=pipeline status=start input={}",
        input.display()
    );
    let result = run_stages(input, config);
    match &result {
        Ok(report) => info!(
            "event=pipeline_run module=pipeline status=ok duration_ms={} files={} docs_dir={}",
            started_at.elapsed().as_millis(),
            report.files.len(),
            report.docs_dir.display()
        ),
        Err(err) => error!(
            "event=pipeline_run module=pipeline status=error duration_ms={} error_code={} error={}",
            started_at.elapsed().as_millis(),
            err.error_code(),
            err
        ),
    }
    result
}

fn run_stages(input: &Path, config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    if !input.is_file() {
        return Err(PipelineError::InputNotFound(input.to_path_buf()));
    }
    config.validate()?;

    let extractor = match probe_extractor(input) {
        ExtractorProbe::Available(extractor) => extractor,
        ExtractorProbe::Unavailable(reason) => {
            return Err(PipelineError::ExtractionUnavailable(reason))
        }
    };

    let base = document_base_name(input);
    let source_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| base.clone());
    let output_root = config.output.root.as_path();

    let (text, intermediate) = if config.output.keep_intermediate {
        std::fs::create_dir_all(output_root).map_err(|source| ExtractionError::Write {
            path: output_root.to_path_buf(),
            source,
        })?;
        let path = output_root.join(format!("{base}{INTERMEDIATE_SUFFIX}"));
        let text = extract_to_file(extractor.as_ref(), input, &path)?;
        (text, Some(path))
    } else {
        (extract_logged(extractor.as_ref(), input)?, None)
    };

    let paragraphs = split_paragraphs(&text);
    let chunks = assemble_chunks(paragraphs, &config.chunking);
    if chunks.is_empty() {
        warn!("event=chunk_assemble module=pipeline status=empty input={}", input.display());
    }

    let request = TreeRequest {
        base: &base,
        source_name: &source_name,
        slug: &config.slug,
        metadata: &config.metadata,
    };
    let tree = write_docs_tree(output_root, &request, &chunks)?;

    let archive = if config.output.package {
        Some(package_tree(&tree.root)?)
    } else {
        None
    };

    Ok(PipelineReport {
        docs_dir: tree.root,
        files: tree.files,
        intermediate,
        archive,
    })
}

/// File stem of the input, used as product name and docs directory base.
pub fn document_base_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "document".to_string())
}

/// Runs the pipeline and reduces the outcome to an exit status.
pub fn run(input: &Path, config: &PipelineConfig) -> i32 {
    match run_pipeline(input, config) {
        Ok(_) => EXIT_OK,
        Err(err) => err.exit_code(),
    }
}

#[cfg(test)]
mod tests {
    use super::{document_base_name, PipelineError, EXIT_INPUT_NOT_FOUND};
    use crate::package::ValidationError;
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};

    #[test]
    fn base_name_is_file_stem() {
        assert_eq!(document_base_name(Path::new("/x/User Guide.pdf")), "User Guide");
        assert_eq!(document_base_name(Path::new("/")), "document");
    }

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let errors = vec![
            PipelineError::InputNotFound(PathBuf::from("a")),
            PipelineError::ExtractionUnavailable("no".to_string()),
            PipelineError::ValidationFailed(ValidationError::RootMissing(PathBuf::from("r"))),
            PipelineError::ValidationFailed(ValidationError::ReadmeMissing),
            PipelineError::ValidationFailed(ValidationError::ReadmeHasFrontMatter),
            PipelineError::ValidationFailed(ValidationError::IndexMissing),
            PipelineError::ValidationFailed(ValidationError::IndexMissingFrontMatter),
            PipelineError::ValidationFailed(ValidationError::FileMissingFrontMatter(
                PathBuf::from("x.md"),
            )),
        ];
        let codes: HashSet<i32> = errors.iter().map(PipelineError::exit_code).collect();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&0));
        assert_eq!(errors[0].exit_code(), EXIT_INPUT_NOT_FOUND);
    }
}
