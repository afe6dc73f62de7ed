//! Text extraction stage.
//!
//! # Responsibility
//! - Decide at runtime whether an input can be turned into plain text.
//! - Produce UTF-8 text with `\n` line endings and blank-line page boundaries.
//!
//! # Invariants
//! - Probing never fails; missing support is reported as `Unavailable`.
//! - Extracted text never contains `\r\n`.

pub mod plain;
#[cfg(feature = "pdf")]
pub mod pdf;

use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub use plain::PlainTextExtractor;
#[cfg(feature = "pdf")]
pub use pdf::PdfTextExtractor;

/// Separator placed between extracted pages.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Converts one input file to normalized plain text.
pub trait TextExtractor {
    /// Short identifier used in log events.
    fn name(&self) -> &'static str;
    fn extract(&self, input: &Path) -> Result<String, ExtractionError>;
}

/// Outcome of a capability probe for one input.
pub enum ExtractorProbe {
    Available(Box<dyn TextExtractor>),
    Unavailable(String),
}

impl std::fmt::Debug for ExtractorProbe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(extractor) => write!(f, "Available({})", extractor.name()),
            Self::Unavailable(reason) => write!(f, "Unavailable({reason})"),
        }
    }
}

/// Extraction errors.
#[derive(Debug)]
pub enum ExtractionError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Decode {
        path: PathBuf,
        message: String,
    },
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ExtractionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Decode { path, message } => {
                write!(f, "failed to extract text from `{}`: {message}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExtractionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Decode { .. } => None,
        }
    }
}

/// Selects an extractor by file extension.
pub fn probe_extractor(input: &Path) -> ExtractorProbe {
    let extension = input
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "txt" | "text" | "md" => ExtractorProbe::Available(Box::new(PlainTextExtractor)),
        "pdf" => probe_pdf(),
        "" => ExtractorProbe::Unavailable(format!(
            "cannot determine document type of `{}` (no file extension)",
            input.display()
        )),
        other => ExtractorProbe::Unavailable(format!("unsupported document type `.{other}`")),
    }
}

#[cfg(feature = "pdf")]
fn probe_pdf() -> ExtractorProbe {
    ExtractorProbe::Available(Box::new(PdfTextExtractor))
}

#[cfg(not(feature = "pdf"))]
fn probe_pdf() -> ExtractorProbe {
    ExtractorProbe::Unavailable(
        "PDF support not available; rebuild with the `pdf` feature enabled".to_string(),
    )
}

/// Normalizes line endings to `\n`.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Extracts `input` and writes the text to `output`.
pub fn extract_to_file(
    extractor: &dyn TextExtractor,
    input: &Path,
    output: &Path,
) -> Result<String, ExtractionError> {
    let text = extract_logged(extractor, input)?;
    fs::write(output, &text).map_err(|source| ExtractionError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    info!(
        "event=extract_write module=extract status=ok output={} bytes={}",
        output.display(),
        text.len()
    );
    Ok(text)
}

/// Runs `extractor` with start/ok/error log events.
pub fn extract_logged(
    extractor: &dyn TextExtractor,
    input: &Path,
) -> Result<String, ExtractionError> {
    info!(
        "event=extract module=extract status=start extractor={}",
        extractor.name()
    );
    match extractor.extract(input) {
        Ok(text) => {
            info!(
                "event=extract module=extract status=ok extractor={} bytes={}",
                extractor.name(),
                text.len()
            );
            Ok(text)
        }
        Err(err) => {
            error!(
                "event=extract module=extract status=error extractor={} error={}",
                extractor.name(),
                err
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_newlines, probe_extractor, ExtractorProbe};
    use std::path::Path;

    #[test]
    fn plain_text_inputs_are_available() {
        match probe_extractor(Path::new("notes/Guide.TXT")) {
            ExtractorProbe::Available(extractor) => assert_eq!(extractor.name(), "plain"),
            ExtractorProbe::Unavailable(reason) => panic!("unexpected unavailable: {reason}"),
        }
    }

    #[test]
    fn unknown_extensions_are_unavailable() {
        let probe = probe_extractor(Path::new("slides.pptx"));
        assert!(matches!(probe, ExtractorProbe::Unavailable(ref reason) if reason.contains(".pptx")));
        assert!(matches!(
            probe_extractor(Path::new("README")),
            ExtractorProbe::Unavailable(_)
        ));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn pdf_inputs_are_available_with_feature() {
        assert!(matches!(
            probe_extractor(Path::new("manual.pdf")),
            ExtractorProbe::Available(_)
        ));
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn pdf_inputs_are_unavailable_without_feature() {
        assert!(matches!(
            probe_extractor(Path::new("manual.pdf")),
            ExtractorProbe::Unavailable(_)
        ));
    }

    #[test]
    fn normalizes_windows_and_mac_line_endings() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n"), "a\nb\nc\n");
    }
}
