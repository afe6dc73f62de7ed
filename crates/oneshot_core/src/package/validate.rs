//! Front-matter contract validation for docs trees.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::docs::tree::{INDEX_FILE, README_FILE};

/// Only this many leading bytes are inspected for a front-matter block.
pub const FRONT_MATTER_SCAN_BYTES: u64 = 10 * 1024;

static FRONT_MATTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---\n(.*?)\n---\n").expect("valid front-matter regex"));

/// Contract violations, in check order.
#[derive(Debug)]
pub enum ValidationError {
    RootMissing(PathBuf),
    ReadmeMissing,
    ReadmeHasFrontMatter,
    IndexMissing,
    IndexMissingFrontMatter,
    FileMissingFrontMatter(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootMissing(path) => {
                write!(f, "docs directory does not exist: {}", path.display())
            }
            Self::ReadmeMissing => write!(f, "{README_FILE} missing"),
            Self::ReadmeHasFrontMatter => write!(f, "{README_FILE} must NOT contain front-matter"),
            Self::IndexMissing => write!(f, "{INDEX_FILE} missing"),
            Self::IndexMissingFrontMatter => write!(f, "{INDEX_FILE} must contain front-matter"),
            Self::FileMissingFrontMatter(path) => {
                write!(f, "{} missing front-matter", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "failed to inspect `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Returns whether the file starts with a `---` delimited block.
pub fn has_front_matter(path: &Path) -> Result<bool, ValidationError> {
    let io_err = |source| ValidationError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut head = Vec::new();
    File::open(path)
        .map_err(io_err)?
        .take(FRONT_MATTER_SCAN_BYTES)
        .read_to_end(&mut head)
        .map_err(io_err)?;
    let head = String::from_utf8_lossy(&head);
    Ok(FRONT_MATTER_RE.is_match(&head))
}

/// Checks the README/index/front-matter contract for `root`.
pub fn validate_tree(root: &Path) -> Result<(), ValidationError> {
    if !root.is_dir() {
        return Err(ValidationError::RootMissing(root.to_path_buf()));
    }

    let readme = root.join(README_FILE);
    if !readme.is_file() {
        return Err(ValidationError::ReadmeMissing);
    }
    if has_front_matter(&readme)? {
        return Err(ValidationError::ReadmeHasFrontMatter);
    }

    let index = root.join(INDEX_FILE);
    if !index.is_file() {
        return Err(ValidationError::IndexMissing);
    }
    if !has_front_matter(&index)? {
        return Err(ValidationError::IndexMissingFrontMatter);
    }

    let mut markdown_files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            ValidationError::Io {
                path,
                source: err.into(),
            }
        })?;
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            markdown_files.push(entry.into_path());
        }
    }

    for path in markdown_files {
        if path == readme || path == index {
            continue;
        }
        if !has_front_matter(&path)? {
            return Err(ValidationError::FileMissingFrontMatter(path));
        }
    }
    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

#[cfg(test)]
mod tests {
    use super::{has_front_matter, is_markdown};
    use std::path::Path;

    #[test]
    fn detects_block_only_at_file_start() {
        let dir = tempfile::tempdir().expect("tempdir");
        let with = dir.path().join("with.md");
        let without = dir.path().join("without.md");
        let late = dir.path().join("late.md");
        std::fs::write(&with, "---\ntitle: x\n---\n\n# x\n").expect("write");
        std::fs::write(&without, "# x\n").expect("write");
        std::fs::write(&late, "intro\n---\ntitle: x\n---\n").expect("write");

        assert!(has_front_matter(&with).expect("read"));
        assert!(!has_front_matter(&without).expect("read"));
        assert!(!has_front_matter(&late).expect("read"));
    }

    #[test]
    fn markdown_extension_is_case_insensitive() {
        assert!(is_markdown(Path::new("a/B.MD")));
        assert!(!is_markdown(Path::new("a/b.txt")));
    }
}
