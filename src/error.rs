//! Error types for 3MF package analysis
//!
//! Every error carries a code for categorization:
//!
//! - **E1xxx**: I/O and archive errors
//! - **E2xxx**: XML and document structure errors
//! - **E3xxx**: Value parsing errors
//!
//! ## Error Codes
//!
//! - `E1001`: I/O error
//! - `E1002`: ZIP archive format error
//! - `E1003`: Missing required document in the package
//! - `E1004`: Archive entry escapes the extraction directory
//! - `E1005`: Package file cannot be opened as an archive
//! - `E2001`: XML parsing error
//! - `E2002`: XML attribute error
//! - `E2003`: Invalid XML structure or encoding
//! - `E2006`: Failure while reading a specific document
//! - `E2007`: Project settings JSON error
//! - `E3002`: Numeric or boolean value parse error
//!
//! Only the failures that make a report impossible surface as errors.
//! Dangling references, malformed transforms and broken sub-assembly files are
//! absorbed by the assembler's fallback rules and never reach the caller.

use std::io;
use thiserror::Error;

/// Result type for package analysis
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while analyzing a 3MF package
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading or extracting files
    ///
    /// **Error Code**: E1001
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// ZIP archive error
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - The file is not a ZIP archive
    /// - Truncated or corrupted package
    /// - Unsupported compression method
    #[error("[E1002] ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A document the package contract requires is absent
    ///
    /// **Error Code**: E1003
    ///
    /// The message names the expected path inside the extracted package.
    #[error("[E1003] Missing required file: {0}")]
    MissingFile(String),

    /// An archive entry would be written outside the scratch directory
    ///
    /// **Error Code**: E1004
    #[error("[E1004] Unsafe archive entry path: {0}")]
    UnsafeEntry(String),

    /// The package file could not be opened
    ///
    /// **Error Code**: E1005
    ///
    /// Wraps the I/O or ZIP failure with the package path.
    #[error("[E1005] Failed to open package {archive}: {source}")]
    Archive {
        /// Path of the package file
        archive: String,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// XML parsing error
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Malformed XML syntax
    /// - Unclosed or mismatched tags
    #[error("[E2001] XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error
    ///
    /// **Error Code**: E2002
    #[error("[E2002] XML attribute error: {0}")]
    XmlAttr(String),

    /// Invalid XML structure or encoding
    ///
    /// **Error Code**: E2003
    #[error("[E2003] Invalid XML structure: {0}")]
    InvalidXml(String),

    /// Failure while reading one of the package documents
    ///
    /// **Error Code**: E2006
    ///
    /// Wraps the underlying error with the document it came from so callers
    /// can tell the model document from the settings document.
    #[error("[E2006] Failed to read {document}: {source}")]
    Document {
        /// Path of the document relative to the package root
        document: String,
        /// The underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Project settings JSON error
    ///
    /// **Error Code**: E2007
    #[error("[E2007] JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parse error for numeric or boolean attribute values
    ///
    /// **Error Code**: E3002
    ///
    /// **Suggestions**:
    /// - Verify numeric values use proper format (e.g., "12" not "12a")
    #[error("[E3002] Parse error: {0}")]
    ParseError(String),
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::ParseError(format!("Failed to parse integer: {}", err))
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttr(format!("Attribute parsing failed: {}", err))
    }
}

impl From<quick_xml::escape::EscapeError> for Error {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Error::XmlAttr(format!("Invalid escape sequence: {}", err))
    }
}

impl Error {
    /// Wrap an error with the package document it occurred in
    ///
    /// # Example
    /// ```
    /// use threemf_analyzer::Error;
    ///
    /// let err = Error::in_document("3D/3dmodel.model", Error::InvalidXml("bad".into()));
    /// assert!(err.to_string().contains("3D/3dmodel.model"));
    /// ```
    pub fn in_document(document: impl Into<String>, source: Error) -> Self {
        Error::Document {
            document: document.into(),
            source: Box::new(source),
        }
    }

    /// Wrap an error with the package file that could not be opened
    pub fn in_archive(archive: impl Into<String>, source: impl Into<Error>) -> Self {
        Error::Archive {
            archive: archive.into(),
            source: Box::new(source.into()),
        }
    }

    /// Create a ParseError with context about what was being parsed
    ///
    /// # Arguments
    /// * `field_name` - The name of the field being parsed (e.g., "build item objectid")
    /// * `value` - The value that failed to parse
    /// * `expected_type` - The expected type (e.g., "integer")
    pub fn parse_error_with_context(field_name: &str, value: &str, expected_type: &str) -> Self {
        Error::ParseError(format!(
            "Failed to parse '{}': expected {}, got '{}'",
            field_name, expected_type, value
        ))
    }

    /// Returns true when the error means a document was absent rather than broken
    pub fn is_missing_file(&self) -> bool {
        match self {
            Error::MissingFile(_) => true,
            Error::Document { source, .. } => source.is_missing_file(),
            _ => false,
        }
    }
}
