//! Packaging stage: front-matter contract validation and archiving.
//!
//! # Responsibility
//! - Verify a docs tree honors the README/index/front-matter contract.
//! - Bundle a validated tree into a deflate zip archive.
//!
//! # Invariants
//! - Archiving never starts before validation has passed.
//! - Validation reports the first violation found, in a fixed check order.

pub mod archive;
pub mod validate;

pub use archive::{archive_name, archive_tree, PackagingError};
pub use validate::{has_front_matter, validate_tree, ValidationError};

use log::{error, info};
use std::path::{Path, PathBuf};

/// Packaging failure: contract violation or archive I/O.
#[derive(Debug)]
pub enum PackageError {
    Validation(ValidationError),
    Packaging(PackagingError),
}

impl std::fmt::Display for PackageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Packaging(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PackageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Packaging(err) => Some(err),
        }
    }
}

impl From<ValidationError> for PackageError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PackagingError> for PackageError {
    fn from(value: PackagingError) -> Self {
        Self::Packaging(value)
    }
}

/// Validates `root` and writes its archive next to it.
pub fn package_tree(root: &Path) -> Result<PathBuf, PackageError> {
    info!(
        "event=package module=package status=start root={}",
        root.display()
    );
    let result = validate_tree(root)
        .map_err(PackageError::from)
        .and_then(|()| archive_tree(root).map_err(PackageError::from));
    match &result {
        Ok(archive) => info!(
            "event=package module=package status=ok archive={}",
            archive.display()
        ),
        Err(err) => error!("event=package module=package status=error error={}", err),
    }
    result
}
