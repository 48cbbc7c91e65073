/*!
 * Packaged document handling.
 *
 * A `.docx` file is a ZIP archive of XML parts. This module loads the
 * archive into memory, picks out the WordprocessingML parts, rewrites each
 * one independently and writes the archive back. A part that fails to parse
 * is reported and left byte-for-byte unchanged while its siblings convert.
 */

use std::io::{Cursor, Read, Write};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::fonts::FontPolicy;
use super::rewriter::{rewrite_part, PartReport, RewriteOptions};
use super::xml::XmlDocument;
use crate::conversion::ConversionDirection;
use crate::errors::{PackageError, PartError, XmlError};

// @const: Default prefix of convertible part paths
pub const DEFAULT_PART_PREFIX: &str = "word/";

// @const: Default suffix of convertible part paths
pub const DEFAULT_PART_SUFFIX: &str = ".xml";

// @const: Default marker identifying style parts
pub const DEFAULT_STYLE_MARKER: &str = "styles.xml";

/// Read and write access to the named entries of a package
pub trait PackageArchive {
    /// Entry names in archive order
    fn list_entries(&self) -> Vec<String>;

    /// Read an entry as UTF-8 text
    fn read_entry_text(&self, path: &str) -> Result<String, PackageError>;

    /// Replace the content of an entry, creating it when missing
    fn write_entry(&mut self, path: &str, text: &str) -> Result<(), PackageError>;
}

// ============================================================================
// ZIP-backed package
// ============================================================================

#[derive(Debug, Clone)]
struct PackageEntry {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
    is_dir: bool,
}

/// A `.docx` archive held fully in memory
#[derive(Debug, Clone, Default)]
pub struct DocxPackage {
    entries: Vec<PackageEntry>,
}

impl DocxPackage {
    /// Load an archive from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, PackageError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut entries = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            let mut data = Vec::new();
            if !file.is_dir() {
                file.read_to_end(&mut data)?;
            }
            entries.push(PackageEntry {
                name: file.name().to_string(),
                data,
                compression: file.compression(),
                is_dir: file.is_dir(),
            });
        }

        Ok(Self { entries })
    }

    /// Load an archive from disk
    pub fn open(path: &Path) -> Result<Self, PackageError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    /// Serialize the archive, keeping entry order and directory entries.
    ///
    /// Stored entries stay stored; everything else is deflated.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PackageError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in &self.entries {
            let method = match entry.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = FileOptions::default().compression_method(method);
            if entry.is_dir {
                writer.add_directory(entry.name.trim_end_matches('/'), options)?;
            } else {
                writer.start_file(entry.name.as_str(), options)?;
                writer.write_all(&entry.data)?;
            }
        }

        Ok(writer.finish()?.into_inner())
    }

    /// Write the archive to disk
    pub fn save(&self, path: &Path) -> Result<(), PackageError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Number of entries, directories included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, path: &str) -> Option<&PackageEntry> {
        self.entries.iter().find(|entry| !entry.is_dir && entry.name == path)
    }
}

impl PackageArchive for DocxPackage {
    fn list_entries(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    fn read_entry_text(&self, path: &str) -> Result<String, PackageError> {
        let entry = self
            .entry(path)
            .ok_or_else(|| PackageError::MissingEntry(path.to_string()))?;
        String::from_utf8(entry.data.clone()).map_err(|_| PackageError::NotText(path.to_string()))
    }

    fn write_entry(&mut self, path: &str, text: &str) -> Result<(), PackageError> {
        match self.entries.iter_mut().find(|entry| !entry.is_dir && entry.name == path) {
            Some(entry) => entry.data = text.as_bytes().to_vec(),
            None => self.entries.push(PackageEntry {
                name: path.to_string(),
                data: text.as_bytes().to_vec(),
                compression: CompressionMethod::Deflated,
                is_dir: false,
            }),
        }
        Ok(())
    }
}

// ============================================================================
// In-memory package
// ============================================================================

/// Ordered name → text map, used where no archive is involved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPackage {
    entries: Vec<(String, String)>,
}

impl MemoryPackage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_entry(mut self, path: &str, text: &str) -> Self {
        // Infallible for the in-memory store
        let _ = self.write_entry(path, text);
        self
    }
}

impl PackageArchive for MemoryPackage {
    fn list_entries(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_entry_text(&self, path: &str) -> Result<String, PackageError> {
        self.entries
            .iter()
            .find(|(name, _)| name == path)
            .map(|(_, text)| text.clone())
            .ok_or_else(|| PackageError::MissingEntry(path.to_string()))
    }

    fn write_entry(&mut self, path: &str, text: &str) -> Result<(), PackageError> {
        match self.entries.iter_mut().find(|(name, _)| name == path) {
            Some((_, existing)) => *existing = text.to_string(),
            None => self.entries.push((path.to_string(), text.to_string())),
        }
        Ok(())
    }
}

// ============================================================================
// Part selection and conversion
// ============================================================================

/// Which entries are convertible parts, and which of those are style parts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PartFilter {
    pub prefix: String,
    pub suffix: String,
    pub style_marker: String,
}

impl Default for PartFilter {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PART_PREFIX.to_string(),
            suffix: DEFAULT_PART_SUFFIX.to_string(),
            style_marker: DEFAULT_STYLE_MARKER.to_string(),
        }
    }
}

impl PartFilter {
    /// `true` when `path` should be rewritten
    pub fn is_candidate(&self, path: &str) -> bool {
        path.starts_with(&self.prefix) && path.ends_with(&self.suffix)
    }

    /// `true` when `path` holds style definitions
    pub fn is_style_part(&self, path: &str) -> bool {
        !self.style_marker.is_empty() && path.contains(&self.style_marker)
    }
}

/// Mode flags for a whole package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageOptions {
    pub direction: ConversionDirection,
    pub force_convert: bool,
    pub parts: PartFilter,
}

/// Result of converting one part
#[derive(Debug)]
pub struct PartOutcome {
    // @field: Entry path of the part
    pub path: String,

    // @field: Counters, or why the part was left unchanged
    pub result: Result<PartReport, PartError>,
}

/// What a package conversion did
#[derive(Debug, Default)]
pub struct PackageReport {
    pub parts: Vec<PartOutcome>,
}

impl PackageReport {
    /// Counters summed over every part that converted
    pub fn totals(&self) -> PartReport {
        let mut totals = PartReport::default();
        for report in self.parts.iter().filter_map(|part| part.result.as_ref().ok()) {
            totals.merge(report);
        }
        totals
    }

    /// Parts left unchanged because they failed
    pub fn failed_parts(&self) -> Vec<&PartError> {
        self.parts
            .iter()
            .filter_map(|part| part.result.as_ref().err())
            .collect()
    }

    /// Number of parts that were rewritten and written back
    pub fn modified_parts(&self) -> usize {
        self.parts
            .iter()
            .filter(|part| matches!(&part.result, Ok(report) if report.is_modified()))
            .count()
    }
}

/// Parse, rewrite and serialize one part.
///
/// # Arguments
/// * `xml` - The part's text
/// * `options` - Direction, force mode and style flag for this part
/// * `policy` - Font names driving the decisions
///
/// # Returns
/// * `Result<(String, PartReport), XmlError>` - The rewritten text and its counters
pub fn convert_part(xml: &str, options: &RewriteOptions, policy: &FontPolicy) -> Result<(String, PartReport), XmlError> {
    let mut document = XmlDocument::parse(xml)?;
    let report = rewrite_part(&mut document, options, policy);
    let text = document.to_xml_string()?;
    Ok((text, report))
}

/// Convert every candidate part of a package in place.
///
/// Parts are independent: a failing part is recorded in the report and keeps
/// its original content. Unmodified parts are not written back.
pub fn convert_package<A: PackageArchive + ?Sized>(
    archive: &mut A,
    options: &PackageOptions,
    policy: &FontPolicy,
) -> PackageReport {
    let mut report = PackageReport::default();

    let candidates: Vec<String> = archive
        .list_entries()
        .into_iter()
        .filter(|path| options.parts.is_candidate(path))
        .collect();

    for path in candidates {
        let part_options = RewriteOptions {
            direction: options.direction,
            force_convert: options.force_convert,
            is_style_part: options.parts.is_style_part(&path),
        };
        let result = convert_one(archive, &path, &part_options, policy);

        match &result {
            Ok(part) => debug!("Converted part {}: {} runs converted", path, part.runs_converted),
            Err(e) => warn!("Leaving part unchanged: {}", e),
        }
        report.parts.push(PartOutcome { path, result });
    }

    report
}

fn convert_one<A: PackageArchive + ?Sized>(
    archive: &mut A,
    path: &str,
    options: &RewriteOptions,
    policy: &FontPolicy,
) -> Result<PartReport, PartError> {
    let access_error = |source| PartError::Access {
        path: path.to_string(),
        source,
    };

    let xml = archive.read_entry_text(path).map_err(access_error)?;
    let (text, report) = convert_part(&xml, options, policy).map_err(|source| PartError::Malformed {
        path: path.to_string(),
        source,
    })?;

    if report.is_modified() {
        archive.write_entry(path, &text).map_err(access_error)?;
    }
    Ok(report)
}
