//! Tabular document model.
//!
//! A sheet is seen only through its tables: tables, rows and cells are
//! addressed by position, and each cell exposes its raw text.

pub(crate) mod docx;

pub use docx::{DocxLimits, DocxReader};

use crate::error::DocumentError;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Trait for decoders turning raw file bytes into a [`Document`].
pub trait SheetReader {
    /// Decode a document from bytes.
    fn read(&self, data: &[u8]) -> Result<Document>;
}

/// A parsed document: its top-level tables in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub tables: Vec<Table>,
}

impl Document {
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Get the table at a position.
    pub fn table(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    /// Number of tables in the document.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

/// A table made of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    /// Build a table from rows of cell texts.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|cells| Row {
                    cells: cells.into_iter().map(Cell::new).collect(),
                })
                .collect(),
        }
    }

    /// Get the row at a position.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A table row. Cells are indexed by grid column, so a merged cell occupies
/// every column it spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    /// Get the cell at a position.
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

/// A single table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    /// Raw cell text; paragraphs are separated by `\n`.
    pub text: String,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_access() {
        let doc = Document::new(vec![
            Table::default(),
            Table::from_rows([vec!["a", "b"], vec!["c"]]),
        ]);

        assert_eq!(doc.table_count(), 2);
        let table = doc.table(1).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.row(0).unwrap().cell(1).unwrap().text, "b");
        assert!(table.row(1).unwrap().cell(1).is_none());
        assert!(doc.table(2).is_none());
    }
}
