//! Core library for course specification sheet checking.
//!
//! This crate provides:
//! - DOCX table reading into a positional document model
//! - Positional field extraction driven by a declarative sheet layout
//! - The reference curriculum plan
//! - Validation against the plan (field comparison, arithmetic identities, intervals)

pub mod document;
pub mod error;
pub mod extract;
pub mod models;
pub mod plan;
pub mod validate;

pub use document::{Document, DocxLimits, DocxReader, SheetReader};
pub use error::{DocumentError, FisaError, PlanError, Result};
pub use extract::{ExtractionOutcome, PositionalExtractor, RecordExtractor, StructuralWarning};
pub use models::config::FisaConfig;
pub use models::record::{Category, EvaluationMethod, ExtractedRecord, TimeDistribution, WeeklyHours};
pub use plan::{CurriculumPlan, ReferenceRecord};
pub use validate::{ReportStatus, ValidationReport, Validator};

/// Decode a DOCX sheet and extract its record with the standard layout.
pub fn extract_docx(data: &[u8]) -> std::result::Result<ExtractionOutcome, DocumentError> {
    let document = DocxReader::new().read(data)?;
    Ok(PositionalExtractor::new().extract(&document))
}
