//! Zip archive writer for validated docs trees.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Suffix appended to the docs directory name to form the archive name.
pub const ARCHIVE_SUFFIX: &str = "-llm-optimized-docs.zip";

/// Archive creation errors.
#[derive(Debug)]
pub enum PackagingError {
    InvalidRoot(PathBuf),
    Io {
        context: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    Zip {
        context: &'static str,
        path: PathBuf,
        source: ZipError,
    },
}

impl Display for PackagingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoot(path) => {
                write!(f, "cannot derive archive name from `{}`", path.display())
            }
            Self::Io {
                context,
                path,
                source,
            } => write!(f, "{context} `{}`: {source}", path.display()),
            Self::Zip {
                context,
                path,
                source,
            } => write!(f, "{context} `{}`: {source}", path.display()),
        }
    }
}

impl Error for PackagingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Zip { source, .. } => Some(source),
            Self::InvalidRoot(_) => None,
        }
    }
}

/// Returns `<root-name>-llm-optimized-docs.zip`.
pub fn archive_name(root: &Path) -> Result<String, PackagingError> {
    root.file_name()
        .and_then(|name| name.to_str())
        .map(|name| format!("{name}{ARCHIVE_SUFFIX}"))
        .ok_or_else(|| PackagingError::InvalidRoot(root.to_path_buf()))
}

/// Writes the archive beside `root`.
///
/// Entries are deflated files named relative to the root's parent, so every
/// entry starts with `<root-name>/`. Roots without a final name component
/// (`.`, `..`) are resolved to their canonical path first.
pub fn archive_tree(root: &Path) -> Result<PathBuf, PackagingError> {
    let root = resolve_root(root)?;
    let parent = root
        .parent()
        .ok_or_else(|| PackagingError::InvalidRoot(root.clone()))?;
    let archive_path = parent.join(archive_name(&root)?);

    let file = File::create(&archive_path).map_err(|source| PackagingError::Io {
        context: "failed to create archive",
        path: archive_path.clone(),
        source,
    })?;
    let mut writer = ZipWriter::new(file);

    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.map_err(|err| PackagingError::Io {
            context: "failed to walk docs tree",
            path: root.clone(),
            source: io::Error::from(err),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry_name(parent, entry.path())?;
        writer
            .start_file(name, entry_options())
            .map_err(|source| PackagingError::Zip {
                context: "failed to start archive entry",
                path: entry.path().to_path_buf(),
                source,
            })?;
        let mut input = File::open(entry.path()).map_err(|source| PackagingError::Io {
            context: "failed to open docs file",
            path: entry.path().to_path_buf(),
            source,
        })?;
        io::copy(&mut input, &mut writer).map_err(|source| PackagingError::Io {
            context: "failed to add docs file to archive",
            path: entry.path().to_path_buf(),
            source,
        })?;
    }

    writer.finish().map_err(|source| PackagingError::Zip {
        context: "failed to finalize archive",
        path: archive_path.clone(),
        source,
    })?;
    Ok(archive_path)
}

fn resolve_root(root: &Path) -> Result<PathBuf, PackagingError> {
    if root.file_name().is_some() {
        return Ok(root.to_path_buf());
    }
    fs::canonicalize(root).map_err(|source| PackagingError::Io {
        context: "failed to resolve docs root",
        path: root.to_path_buf(),
        source,
    })
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// `/`-separated entry name of `path` relative to `parent`.
fn entry_name(parent: &Path, path: &Path) -> Result<String, PackagingError> {
    let relative = path
        .strip_prefix(parent)
        .map_err(|_| PackagingError::InvalidRoot(path.to_path_buf()))?;
    Ok(relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}
