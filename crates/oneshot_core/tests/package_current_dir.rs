//! Packaging a tree addressed through the working directory.
//!
//! Kept in its own test binary: changing the working directory is
//! process-wide.

use oneshot_core::package::package_tree;
use std::fs;
use std::path::Path;

const FRONT: &str = "---\ntitle: x\ntype: concept\n---\n\n";

#[test]
fn dot_root_is_packaged_under_its_directory_name() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("here-docs");
    fs::create_dir_all(root.join("shared")).unwrap();
    fs::write(root.join("README.md"), "Generated docs.\n").unwrap();
    fs::write(root.join("index.md"), format!("{FRONT}# Index\n")).unwrap();
    fs::write(
        root.join("shared").join("common-concepts.md"),
        format!("{FRONT}# Common\n"),
    )
    .unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(&root).unwrap();
    let result = package_tree(Path::new("."));
    std::env::set_current_dir(previous).unwrap();

    let archive = result.unwrap();
    let expected = fs::canonicalize(dir.path())
        .unwrap()
        .join("here-docs-llm-optimized-docs.zip");
    assert_eq!(archive, expected);

    let archive = zip::ZipArchive::new(fs::File::open(&archive).unwrap()).unwrap();
    assert!(archive.file_names().any(|name| name == "here-docs/README.md"));
    assert!(archive.file_names().all(|name| name.starts_with("here-docs/")));
}
