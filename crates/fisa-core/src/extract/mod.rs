//! Positional field extraction from course specification sheets.

pub mod layout;
pub mod rules;

pub use layout::{CellParser, Field, FieldMapping, Layout, MissingCoordinate, ParsedValue};

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::document::Document;
use crate::models::record::ExtractedRecord;

/// A layout coordinate that did not exist in the document.
///
/// The remaining fields of the same table were not read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralWarning {
    pub table: usize,
    pub row: usize,
    pub cell: usize,
    pub missing: MissingCoordinate,
    pub field: Field,
    /// Fields of this table left at their defaults, including `field`.
    pub fields_skipped: usize,
}

impl fmt::Display for StructuralWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing = match self.missing {
            MissingCoordinate::Table => format!("table {}", self.table),
            MissingCoordinate::Row => format!("row {} of table {}", self.row, self.table),
            MissingCoordinate::Cell => format!(
                "cell {} of row {} in table {}",
                self.cell, self.row, self.table
            ),
        };
        write!(
            f,
            "{} not found while reading {}; {} field(s) skipped",
            missing, self.field, self.fields_skipped
        )
    }
}

/// Result of extraction: a possibly partial record and what went missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionOutcome {
    pub record: ExtractedRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<StructuralWarning>,
}

impl ExtractionOutcome {
    /// Check whether every layout coordinate was present.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Trait for sheet record extractors.
pub trait RecordExtractor {
    /// Extract a record from a parsed document. Never fails.
    fn extract(&self, document: &Document) -> ExtractionOutcome;
}

/// Extractor reading fixed coordinates given by a [`Layout`].
#[derive(Debug, Clone, Default)]
pub struct PositionalExtractor {
    layout: Layout,
}

impl PositionalExtractor {
    /// Create an extractor for the standard sheet layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

impl RecordExtractor for PositionalExtractor {
    fn extract(&self, document: &Document) -> ExtractionOutcome {
        let mut outcome = ExtractionOutcome::default();

        for (table, mappings) in self.layout.by_table() {
            for (i, mapping) in mappings.iter().enumerate() {
                match mapping.read(document) {
                    Ok(Some(value)) => mapping.field.apply(&mut outcome.record, value),
                    Ok(None) => debug!("No token for {} in table {}", mapping.field, table),
                    Err(missing) => {
                        let warning = StructuralWarning {
                            table,
                            row: mapping.row,
                            cell: mapping.cell,
                            missing,
                            field: mapping.field,
                            fields_skipped: mappings.len() - i,
                        };
                        warn!("Sheet structure mismatch: {}", warning);
                        outcome.warnings.push(warning);
                        break;
                    }
                }
            }
        }

        debug!(
            "Extracted record {:?} with {} structural warnings",
            outcome.record.code,
            outcome.warnings.len()
        );

        outcome
    }
}
