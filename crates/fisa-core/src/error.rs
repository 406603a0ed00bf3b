//! Error types for the fisa-core library.

use thiserror::Error;

/// Main error type for the fisa library.
#[derive(Error, Debug)]
pub enum FisaError {
    /// Document decoding error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Curriculum plan loading error.
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while decoding an uploaded sheet.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file is not a readable ZIP container.
    #[error("invalid archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A required part is missing from the package.
    #[error("missing document part: {0}")]
    MissingPart(String),

    /// The document XML could not be parsed.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document exceeds the reader's size limits.
    #[error("document too large: {0}")]
    TooLarge(String),

    /// Text content is not valid UTF-8 or has bad escapes.
    #[error("invalid text encoding: {0}")]
    Encoding(String),
}

/// Errors related to the reference curriculum plan.
#[derive(Error, Debug)]
pub enum PlanError {
    /// The plan file is not valid JSON or has the wrong shape.
    #[error("failed to parse plan: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two disciplines share the same code.
    #[error("duplicate discipline code: {0}")]
    DuplicateCode(String),
}

/// Result type for the fisa library.
pub type Result<T> = std::result::Result<T, FisaError>;
