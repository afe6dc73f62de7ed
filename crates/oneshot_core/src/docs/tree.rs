//! Docs tree writer.
//!
//! # Responsibility
//! - Pick a non-colliding `<base>-docs[-n]` directory under the output root.
//! - Write README, shared stub, atomic documents and index in that order.
//!
//! # Invariants
//! - An existing filesystem entry is never reused as the docs directory.
//! - A failed write leaves already written files in place.

use crate::config::{MetadataConfig, SlugConfig};
use crate::docs::document::{AtomicDocument, DocumentContext};
use crate::model::chunk::Chunk;
use crate::model::front_matter::FrontMatterBlock;
use log::{error, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const README_FILE: &str = "README.md";
pub const INDEX_FILE: &str = "index.md";
pub const SHARED_DIR: &str = "shared";
pub const SHARED_STUB_FILE: &str = "common-concepts.md";

/// Result of a successful tree write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsTree {
    pub root: PathBuf,
    /// Atomic document filenames in chunk order.
    pub files: Vec<String>,
}

/// Inputs describing one tree write.
#[derive(Debug, Clone, Copy)]
pub struct TreeRequest<'a> {
    pub base: &'a str,
    pub source_name: &'a str,
    pub slug: &'a SlugConfig,
    pub metadata: &'a MetadataConfig,
}

/// Docs tree write errors.
#[derive(Debug)]
pub enum TreeError {
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateDir { path, source } => {
                write!(f, "failed to create directory `{}`: {source}", path.display())
            }
            Self::WriteFile { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } | Self::WriteFile { source, .. } => Some(source),
        }
    }
}

/// Returns `<base>-docs`, or `<base>-docs-<n>` with the smallest free `n >= 1`.
///
/// Any entry counts as taken, including a symlink whose target is missing.
pub fn choose_docs_dir(output_root: &Path, base: &str) -> PathBuf {
    let mut n = 0usize;
    loop {
        let candidate = docs_dir_candidate(output_root, base, n);
        if fs::symlink_metadata(&candidate).is_err() {
            return candidate;
        }
        n += 1;
    }
}

fn docs_dir_candidate(output_root: &Path, base: &str, n: usize) -> PathBuf {
    if n == 0 {
        output_root.join(format!("{base}-docs"))
    } else {
        output_root.join(format!("{base}-docs-{n}"))
    }
}

/// Creates the first free docs directory; an entry appearing between check
/// and create moves on to the next suffix.
fn create_docs_dir(output_root: &Path, base: &str) -> Result<PathBuf, TreeError> {
    let mut n = 0usize;
    loop {
        let candidate = docs_dir_candidate(output_root, base, n);
        match fs::create_dir(&candidate) {
            Ok(()) => return Ok(candidate),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(source) => {
                return Err(TreeError::CreateDir {
                    path: candidate,
                    source,
                })
            }
        }
    }
}

/// Writes the full docs tree for `chunks` and returns its location.
pub fn write_docs_tree(
    output_root: &Path,
    request: &TreeRequest<'_>,
    chunks: &[Chunk],
) -> Result<DocsTree, TreeError> {
    let started_at = Instant::now();
    info!(
        "event=docs_tree_write module=docs status=start chunks={}",
        chunks.len()
    );

    match write_tree_inner(output_root, request, chunks) {
        Ok(tree) => {
            info!(
                "event=docs_tree_write module=docs status=ok duration_ms={} files={} root={}",
                started_at.elapsed().as_millis(),
                tree.files.len(),
                tree.root.display()
            );
            Ok(tree)
        }
        Err(err) => {
            error!(
                "event=docs_tree_write module=docs status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn write_tree_inner(
    output_root: &Path,
    request: &TreeRequest<'_>,
    chunks: &[Chunk],
) -> Result<DocsTree, TreeError> {
    fs::create_dir_all(output_root).map_err(|source| TreeError::CreateDir {
        path: output_root.to_path_buf(),
        source,
    })?;
    let root = create_docs_dir(output_root, request.base)?;
    let shared_dir = root.join(SHARED_DIR);
    create_dir(&shared_dir)?;

    write_file(&root.join(README_FILE), &render_readme(request.source_name))?;
    write_file(
        &shared_dir.join(SHARED_STUB_FILE),
        &render_shared_stub(request.base),
    )?;

    let context = DocumentContext {
        base: request.base,
        source_name: request.source_name,
        slug: request.slug,
        metadata: request.metadata,
    };
    let mut taken = HashSet::new();
    let mut files = Vec::with_capacity(chunks.len());
    for (offset, chunk) in chunks.iter().enumerate() {
        let document = AtomicDocument::from_chunk(offset + 1, chunk, &context, &mut taken);
        write_file(&root.join(&document.filename), &document.render())?;
        files.push(document.filename);
    }

    write_file(&root.join(INDEX_FILE), &render_index(request.base, &files))?;
    Ok(DocsTree { root, files })
}

/// Human-facing README; must not start with a front-matter block.
pub fn render_readme(source_name: &str) -> String {
    format!(
        "This documentation was generated from {source_name}.\n\n\
         It contains atomic Markdown files intended for LLM-friendly retrieval.\n\n\
         Files are split into small, atomic units; review before production.\n"
    )
}

/// Shared boilerplate stub, tagged so the tree passes packaging validation.
pub fn render_shared_stub(base: &str) -> String {
    let mut rendered = FrontMatterBlock::new()
        .scalar("title", "Common Concepts")
        .scalar("type", "shared")
        .scalar("product", base)
        .render();
    rendered.push_str(
        "# Common Concepts\n\nThis file contains normalized boilerplate extracted from the source.\n",
    );
    rendered
}

/// Machine-facing index listing atomic filenames in order.
pub fn render_index(base: &str, files: &[String]) -> String {
    let mut rendered = FrontMatterBlock::new()
        .scalar("title", format!("{base} index"))
        .scalar("type", "index")
        .scalar("product", base)
        .render();
    rendered.push_str("# Index\n\nThis file lists atomic units.\n\n");
    for file in files {
        rendered.push_str(&format!("- {file}\n"));
    }
    rendered
}

fn create_dir(path: &Path) -> Result<(), TreeError> {
    fs::create_dir(path).map_err(|source| TreeError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), TreeError> {
    fs::write(path, content).map_err(|source| TreeError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{choose_docs_dir, create_docs_dir, render_index, render_readme};

    #[test]
    fn readme_names_source_without_front_matter() {
        let readme = render_readme("manual.pdf");
        assert!(readme.starts_with("This documentation was generated from manual.pdf."));
        assert!(!readme.starts_with("---"));
    }

    #[test]
    fn index_lists_files_in_order() {
        let index = render_index("demo", &["b.md".to_string(), "a.md".to_string()]);
        assert!(index.starts_with("---\ntitle: demo index\ntype: index\nproduct: demo\n---\n\n# Index"));
        assert!(index.ends_with("- b.md\n- a.md\n"));
    }

    #[test]
    fn docs_dir_suffix_skips_existing_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert_eq!(choose_docs_dir(dir.path(), "x"), dir.path().join("x-docs"));

        std::fs::create_dir(dir.path().join("x-docs")).expect("create x-docs");
        std::fs::write(dir.path().join("x-docs-1"), "a plain file").expect("write x-docs-1");
        assert_eq!(choose_docs_dir(dir.path(), "x"), dir.path().join("x-docs-2"));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_counts_as_taken() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("m-docs"))
            .expect("symlink");

        assert_eq!(choose_docs_dir(dir.path(), "m"), dir.path().join("m-docs-1"));
        let created = create_docs_dir(dir.path(), "m").expect("create docs dir");
        assert_eq!(created, dir.path().join("m-docs-1"));
        assert!(created.is_dir());
    }
}
