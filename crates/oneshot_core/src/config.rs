//! Pipeline configuration record.
//!
//! # Responsibility
//! - Hold chunking thresholds, slug bounds and metadata defaults for one run.
//! - Load overrides from a TOML file and validate threshold relations.
//!
//! # Invariants
//! - `min_words >= 1` and `target_words >= min_words`.
//! - `slug.max_len >= 1`.
//! - Configuration is passed explicitly; there is no process-wide default state.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default minimum words per chunk before it is merged backwards.
pub const DEFAULT_MIN_WORDS: usize = 200;
/// Default word count at which a pending chunk is sealed.
pub const DEFAULT_TARGET_WORDS: usize = 800;
/// Default maximum slug length in characters.
pub const DEFAULT_SLUG_MAX_LEN: usize = 60;

/// Word-count thresholds for the chunk assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub min_words: usize,
    pub target_words: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            min_words: DEFAULT_MIN_WORDS,
            target_words: DEFAULT_TARGET_WORDS,
        }
    }
}

/// Slug generator bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugConfig {
    pub max_len: usize,
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_SLUG_MAX_LEN,
        }
    }
}

/// Descriptive metadata copied into every atomic document's front matter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub vendor: Option<String>,
    pub language: Option<String>,
    pub domain: Option<String>,
    pub tags: Vec<String>,
}

/// Output placement and optional stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives the docs tree, archive and intermediate text.
    pub root: PathBuf,
    /// Writes extracted text to `<base>-intermediate.txt` when set.
    pub keep_intermediate: bool,
    /// Runs validation and archiving after the docs tree is written.
    pub package: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            keep_intermediate: true,
            package: true,
        }
    }
}

/// Complete configuration for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub chunking: ChunkingConfig,
    pub slug: SlugConfig,
    pub metadata: MetadataConfig,
    pub output: OutputConfig,
}

impl PipelineConfig {
    /// Loads and validates a TOML configuration file.
    ///
    /// Missing sections and keys fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            source: err,
        })?;
        let config = Self::from_toml_str(&content).map_err(|err| match err {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|err| ConfigError::Parse {
            path: None,
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks threshold relations that the assembler and slug generator rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunking.min_words == 0 {
            return Err(ConfigError::Invalid("chunking.min_words must be >= 1".to_string()));
        }
        if self.chunking.target_words < self.chunking.min_words {
            return Err(ConfigError::Invalid(format!(
                "chunking.target_words ({}) must be >= chunking.min_words ({})",
                self.chunking.target_words, self.chunking.min_words
            )));
        }
        if self.slug.max_len == 0 {
            return Err(ConfigError::Invalid("slug.max_len must be >= 1".to_string()));
        }
        Ok(())
    }
}

/// Configuration load/validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: Option<PathBuf>,
        message: String,
    },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse {
                path: Some(path),
                message,
            } => write!(f, "failed to parse config `{}`: {message}", path.display()),
            Self::Parse {
                path: None,
                message,
            } => write!(f, "failed to parse config: {message}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PipelineConfig, DEFAULT_MIN_WORDS, DEFAULT_TARGET_WORDS};

    #[test]
    fn defaults_match_documented_thresholds() {
        let config = PipelineConfig::default();
        assert_eq!(config.chunking.min_words, DEFAULT_MIN_WORDS);
        assert_eq!(config.chunking.target_words, DEFAULT_TARGET_WORDS);
        assert_eq!(config.slug.max_len, 60);
        assert!(config.output.package);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let config = PipelineConfig::from_toml_str(
            "[chunking]\ntarget_words = 400\n\n[metadata]\nvendor = \"Acme\"\n",
        )
        .expect("partial config should parse");
        assert_eq!(config.chunking.target_words, 400);
        assert_eq!(config.chunking.min_words, DEFAULT_MIN_WORDS);
        assert_eq!(config.metadata.vendor.as_deref(), Some("Acme"));
        assert!(config.metadata.tags.is_empty());
    }

    #[test]
    fn rejects_target_below_min() {
        let err = PipelineConfig::from_toml_str("[chunking]\nmin_words = 500\ntarget_words = 100\n")
            .expect_err("target below min must fail");
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("target_words"));
    }

    #[test]
    fn rejects_zero_slug_length() {
        let err = PipelineConfig::from_toml_str("[slug]\nmax_len = 0\n")
            .expect_err("zero slug length must fail");
        assert!(err.to_string().contains("slug.max_len"));
    }

    #[test]
    fn reports_parse_errors() {
        let err = PipelineConfig::from_toml_str("[chunking\n").expect_err("bad toml must fail");
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
    }
}
