use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: Extension of packaged Word documents
pub const DOCX_EXTENSION: &str = "docx";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path for a converted document
    // @params: input_file, output_dir, suffix
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        suffix: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(suffix);
        output_filename.push('.');
        output_filename.push_str(DOCX_EXTENSION);

        output_dir.as_ref().join(output_filename)
    }

    /// `true` when `path` looks like a Word document rather than an Office
    /// lock file (`~$name.docx`)
    pub fn is_docx_file<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        let is_lock_file = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with("~$"));
        let has_extension = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(DOCX_EXTENSION));
        has_extension && !is_lock_file
    }

    /// Find Word documents in a directory tree.
    ///
    /// Files whose name already ends with `.<suffix>.docx` are previous
    /// outputs and are left out, so reruns do not convert them again.
    pub fn find_docx_files<P: AsRef<Path>>(dir: P, output_suffix: &str) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(anyhow!("Input directory does not exist: {:?}", dir));
        }

        let output_marker = format!(".{}", output_suffix.to_lowercase());
        let mut result = Vec::new();

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if !path.is_file() || !Self::is_docx_file(path) {
                continue;
            }
            let is_output = path
                .file_stem()
                .is_some_and(|stem| stem.to_string_lossy().to_lowercase().ends_with(&output_marker));
            if !is_output {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a whole file
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
        fs::read(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write bytes through a temporary file in the target directory, then
    /// move it into place so readers never see a partial document
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::ensure_dir(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent)
            .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;
        temp.write_all(content)
            .with_context(|| format!("Failed to write temporary file for {:?}", path))?;
        temp.persist(path)
            .map_err(|e| anyhow!("Failed to move output into place at {:?}: {}", path, e.error))?;
        Ok(())
    }
}
