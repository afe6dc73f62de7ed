use oneshot_core::package::{archive_tree, package_tree, PackageError};
use oneshot_core::{validate_tree, ValidationError};
use std::fs;
use std::path::Path;

const FRONT: &str = "---\ntitle: x\ntype: concept\n---\n\n";

fn valid_tree(root: &Path) {
    fs::create_dir_all(root.join("shared")).unwrap();
    fs::write(root.join("README.md"), "Generated docs.\n").unwrap();
    fs::write(root.join("index.md"), format!("{FRONT}# Index\n")).unwrap();
    fs::write(root.join("unit.md"), format!("{FRONT}# Unit\n")).unwrap();
    fs::write(
        root.join("shared").join("common-concepts.md"),
        format!("{FRONT}# Common\n"),
    )
    .unwrap();
}

#[test]
fn valid_tree_passes() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("ok-docs");
    valid_tree(&root);
    validate_tree(&root).unwrap();
}

#[test]
fn missing_root_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = validate_tree(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, ValidationError::RootMissing(_)));
}

#[test]
fn readme_rules_are_enforced() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("r-docs");
    valid_tree(&root);

    fs::remove_file(root.join("README.md")).unwrap();
    assert!(matches!(
        validate_tree(&root).unwrap_err(),
        ValidationError::ReadmeMissing
    ));

    fs::write(root.join("README.md"), format!("{FRONT}Generated docs.\n")).unwrap();
    assert!(matches!(
        validate_tree(&root).unwrap_err(),
        ValidationError::ReadmeHasFrontMatter
    ));
}

#[test]
fn index_rules_are_enforced() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("i-docs");
    valid_tree(&root);

    fs::remove_file(root.join("index.md")).unwrap();
    assert!(matches!(
        validate_tree(&root).unwrap_err(),
        ValidationError::IndexMissing
    ));

    fs::write(root.join("index.md"), "# Index\n").unwrap();
    assert!(matches!(
        validate_tree(&root).unwrap_err(),
        ValidationError::IndexMissingFrontMatter
    ));
}

#[test]
fn nested_markdown_without_front_matter_fails() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("n-docs");
    valid_tree(&root);
    fs::write(root.join("shared").join("Extra.MD"), "# no block\n").unwrap();
    fs::write(root.join("notes.txt"), "plain text is ignored\n").unwrap();

    match validate_tree(&root).unwrap_err() {
        ValidationError::FileMissingFrontMatter(path) => {
            assert_eq!(path, root.join("shared").join("Extra.MD"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn package_refuses_to_archive_invalid_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("bad-docs");
    valid_tree(&root);
    fs::write(root.join("unit.md"), "# Unit without block\n").unwrap();

    let err = package_tree(&root).unwrap_err();
    assert!(matches!(err, PackageError::Validation(_)));
    assert!(!dir
        .path()
        .join("bad-docs-llm-optimized-docs.zip")
        .exists());
}

#[test]
fn package_writes_archive_next_to_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("good-docs");
    valid_tree(&root);

    let archive = package_tree(&root).unwrap();
    assert_eq!(archive, dir.path().join("good-docs-llm-optimized-docs.zip"));

    let archive = zip::ZipArchive::new(fs::File::open(&archive).unwrap()).unwrap();
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "good-docs/README.md",
            "good-docs/index.md",
            "good-docs/shared/common-concepts.md",
            "good-docs/unit.md",
        ]
    );
}

#[test]
fn archive_tree_rejects_rootless_path() {
    assert!(archive_tree(Path::new("/")).is_err());
}
