/*!
 * Tests for file and directory utilities
 */

use bijoy_docx::file_utils::FileManager;
use std::fs;
use std::path::PathBuf;

use crate::common::{create_temp_dir, create_test_file};

/// Test output names keep the stem and add the suffix
#[test]
fn test_generate_output_path_withSuffix_shouldBuildName() {
    let path = FileManager::generate_output_path("docs/চিঠি.docx", "out", "unicode");
    assert_eq!(path, PathBuf::from("out/চিঠি.unicode.docx"));

    let path = FileManager::generate_output_path("report.v2.docx", "", "bijoy");
    assert_eq!(path, PathBuf::from("report.v2.bijoy.docx"));
}

/// Test docx detection is case-insensitive and ignores lock files
#[test]
fn test_is_docx_file_withVariousNames_shouldDetectDocuments() {
    assert!(FileManager::is_docx_file("a.docx"));
    assert!(FileManager::is_docx_file("A.DocX"));
    assert!(!FileManager::is_docx_file("~$a.docx"));
    assert!(!FileManager::is_docx_file("a.doc"));
    assert!(!FileManager::is_docx_file("docx"));
}

/// Test a missing directory is an error
#[test]
fn test_find_docx_files_withMissingDirectory_shouldFail() {
    let dir = create_temp_dir().unwrap();
    assert!(FileManager::find_docx_files(dir.path().join("missing"), "converted").is_err());
}

/// Test recursive search returns sorted documents only
#[test]
fn test_find_docx_files_withNestedDirectories_shouldFindAll() {
    let dir = create_temp_dir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();

    let b = create_test_file(dir.path(), "b.docx", b"x").unwrap();
    let a = create_test_file(dir.path(), "a.docx", b"x").unwrap();
    let nested = create_test_file(&sub, "c.docx", b"x").unwrap();
    create_test_file(dir.path(), "b.unicode.docx", b"x").unwrap();
    create_test_file(dir.path(), "readme.md", b"x").unwrap();

    let files = FileManager::find_docx_files(dir.path(), "unicode").unwrap();
    assert_eq!(files, vec![a, b, nested]);
}

/// Test atomic writes create missing parent directories
#[test]
fn test_write_atomic_withMissingParent_shouldCreateIt() {
    let dir = create_temp_dir().unwrap();
    let target = dir.path().join("out").join("nested").join("doc.docx");

    FileManager::write_atomic(&target, b"content").unwrap();

    assert_eq!(FileManager::read_bytes(&target).unwrap(), b"content");
    assert!(FileManager::dir_exists(dir.path().join("out")));
    assert!(FileManager::file_exists(&target));
}
