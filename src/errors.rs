/*!
 * Error types for the bijoy-docx application.
 *
 * This module contains custom error types for the document layers of the
 * application, using the thiserror crate for ergonomic error definitions.
 * The text converters themselves are infallible: characters without a
 * table entry pass through unchanged.
 */

use thiserror::Error;

/// Errors that can occur while parsing or serializing a document part
#[derive(Error, Debug)]
pub enum XmlError {
    /// The part is not well-formed XML
    #[error("Failed to parse XML: {0}")]
    Parse(#[from] quick_xml::Error),

    /// An attribute could not be read
    #[error("Invalid attribute: {0}")]
    Attribute(String),

    /// A name or value is not valid UTF-8
    #[error("Invalid encoding: {0}")]
    Encoding(String),

    /// The part has no root element
    #[error("Document has no root element")]
    MissingRoot,

    /// More than one top-level element
    #[error("Document has more than one root element")]
    MultipleRoots,

    /// The input ended inside an element
    #[error("Unclosed element: {0}")]
    Unclosed(String),

    /// Serializing the tree failed
    #[error("Failed to write XML: {0}")]
    Write(String),
}

/// Errors that can occur when working with a packaged document
#[derive(Error, Debug)]
pub enum PackageError {
    /// The archive could not be read or written
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO failure while reading or writing an entry
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested entry does not exist
    #[error("Entry not found: {0}")]
    MissingEntry(String),

    /// Entry is not UTF-8 text
    #[error("Entry is not valid UTF-8 text: {0}")]
    NotText(String),
}

/// A single document part could not be converted
#[derive(Error, Debug)]
pub enum PartError {
    /// The part could not be read from or written to the package
    #[error("Failed to access part '{path}': {source}")]
    Access {
        /// Entry path of the part
        path: String,
        source: PackageError,
    },

    /// The part is malformed
    #[error("Malformed part '{path}': {source}")]
    Malformed {
        /// Entry path of the part
        path: String,
        source: XmlError,
    },
}

impl PartError {
    /// Entry path of the failing part
    pub fn path(&self) -> &str {
        match self {
            Self::Access { path, .. } | Self::Malformed { path, .. } => path,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a document part
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// Error from the package layer
    #[error("Package error: {0}")]
    Package(#[from] PackageError),

    /// Error converting a part
    #[error("Part error: {0}")]
    Part(#[from] PartError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
