//! DOCX table reading using zip and quick-xml.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, trace};
use zip::ZipArchive;
use zip::result::ZipError;

use super::{Cell, Document, Result, Row, SheetReader, Table};
use crate::error::DocumentError;

/// Main body part of a WordprocessingML package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Word tables have at most 63 grid columns.
const MAX_GRID_COLUMNS: usize = 63;

/// Bounds on what a single upload may decode to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocxLimits {
    /// Largest accepted uncompressed size of the body part, in bytes.
    pub max_part_size: u64,
    /// Most cells all tables may hold once merged cells are expanded.
    pub max_cells: usize,
    /// Most bytes of cell text once merged cells are expanded.
    pub max_text: usize,
}

impl Default for DocxLimits {
    fn default() -> Self {
        Self {
            max_part_size: 8 * 1024 * 1024,
            max_cells: 100_000,
            max_text: 32 * 1024 * 1024,
        }
    }
}

/// Reader for ZIP-based office documents.
///
/// Only top-level body tables are collected. Cell positions follow the
/// table grid: a cell spanning `n` grid columns is repeated `n` times, and a
/// vertically merged continuation repeats the text of the cell above.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxReader {
    limits: DocxLimits,
}

impl DocxReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: DocxLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl SheetReader for DocxReader {
    fn read(&self, data: &[u8]) -> Result<Document> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;

        let part = match archive.by_name(DOCUMENT_PART) {
            Ok(part) => part,
            Err(ZipError::FileNotFound) => {
                return Err(DocumentError::MissingPart(DOCUMENT_PART.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let limit = self.limits.max_part_size;
        let too_large = || {
            DocumentError::TooLarge(format!("{} exceeds {} bytes", DOCUMENT_PART, limit))
        };
        if part.size() > limit {
            return Err(too_large());
        }

        // Declared sizes are untrusted; bound the read itself.
        let mut bytes = Vec::new();
        part.take(limit.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(ZipError::Io)?;
        if bytes.len() as u64 > limit {
            return Err(too_large());
        }
        let xml = String::from_utf8(bytes).map_err(|e| DocumentError::Encoding(e.to_string()))?;

        let document = parse_document_xml(&xml, &self.limits)?;
        debug!("DOCX contains {} top-level tables", document.table_count());
        Ok(document)
    }
}

/// Vertical merge state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VMerge {
    None,
    Restart,
    Continue,
}

/// Cell being collected.
struct PendingCell {
    text: String,
    grid_span: usize,
    v_merge: VMerge,
    paragraphs: usize,
}

impl PendingCell {
    fn new() -> Self {
        Self {
            text: String::new(),
            grid_span: 1,
            v_merge: VMerge::None,
            paragraphs: 0,
        }
    }

    fn start_paragraph(&mut self) {
        if self.paragraphs > 0 {
            self.text.push('\n');
        }
        self.paragraphs += 1;
    }
}

/// Cells and text produced so far, across all tables.
struct Budget<'a> {
    limits: &'a DocxLimits,
    cells: usize,
    text: usize,
}

impl Budget<'_> {
    fn charge(&mut self, cells: usize, text_len: usize) -> Result<()> {
        self.cells = self.cells.saturating_add(cells);
        self.text = self.text.saturating_add(text_len.saturating_mul(cells));

        if self.cells > self.limits.max_cells {
            return Err(DocumentError::TooLarge(format!(
                "tables expand to more than {} cells",
                self.limits.max_cells
            )));
        }
        if self.text > self.limits.max_text {
            return Err(DocumentError::TooLarge(format!(
                "cell text expands to more than {} bytes",
                self.limits.max_text
            )));
        }
        Ok(())
    }
}

#[derive(Default)]
struct TableState {
    rows: Vec<Row>,
    row: Option<Vec<Cell>>,
    cell: Option<PendingCell>,
    in_text: bool,
}

impl TableState {
    fn finish_cell(&mut self, budget: &mut Budget<'_>) -> Result<()> {
        let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) else {
            return Ok(());
        };

        let text = if cell.v_merge == VMerge::Continue {
            // Continuation cells carry no text of their own.
            let column = row.len();
            self.rows
                .last()
                .and_then(|above| above.cell(column))
                .map(|above| above.text.clone())
                .unwrap_or_default()
        } else {
            cell.text
        };

        let span = cell.grid_span.clamp(1, MAX_GRID_COLUMNS);
        budget.charge(span, text.len())?;
        for _ in 0..span {
            row.push(Cell::new(text.clone()));
        }
        Ok(())
    }

    fn finish_row(&mut self) {
        if let Some(cells) = self.row.take() {
            self.rows.push(Row { cells });
        }
    }
}

/// Parse the body XML into tables.
pub(crate) fn parse_document_xml(xml: &str, limits: &DocxLimits) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    let mut tables = Vec::new();
    let mut depth = 0usize;
    let mut state = TableState::default();
    let mut budget = Budget {
        limits,
        cells: 0,
        text: 0,
    };

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => {
                    depth += 1;
                    if depth == 1 {
                        state = TableState::default();
                    }
                }
                b"tr" if depth == 1 => state.row = Some(Vec::new()),
                b"tc" if depth == 1 => state.cell = Some(PendingCell::new()),
                b"p" if depth == 1 => {
                    if let Some(cell) = state.cell.as_mut() {
                        cell.start_paragraph();
                    }
                }
                b"t" if depth == 1 => state.in_text = state.cell.is_some(),
                name if depth == 1 => apply_cell_property(&mut state, name, &e)?,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" if depth == 1 => {
                    if let Some(cell) = state.cell.as_mut() {
                        cell.start_paragraph();
                    }
                }
                b"tab" if depth == 1 => push_text(&mut state, "\t"),
                b"br" | b"cr" if depth == 1 => push_text(&mut state, "\n"),
                name if depth == 1 => apply_cell_property(&mut state, name, &e)?,
                _ => {}
            },
            Event::Text(e) if depth == 1 && state.in_text => {
                let text = e.unescape()?;
                push_text(&mut state, &text);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => state.in_text = false,
                b"tc" if depth == 1 => state.finish_cell(&mut budget)?,
                b"tr" if depth == 1 => state.finish_row(),
                b"tbl" => {
                    if depth == 1 {
                        let finished = std::mem::take(&mut state);
                        trace!("table {} has {} rows", tables.len(), finished.rows.len());
                        tables.push(Table { rows: finished.rows });
                    }
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(Document::new(tables))
}

fn push_text(state: &mut TableState, text: &str) {
    if let Some(cell) = state.cell.as_mut() {
        cell.text.push_str(text);
    }
}

fn apply_cell_property(state: &mut TableState, name: &[u8], e: &BytesStart<'_>) -> Result<()> {
    let Some(cell) = state.cell.as_mut() else {
        return Ok(());
    };

    match name {
        b"gridSpan" => {
            if let Some(span) = val_attribute(e)?.and_then(|v| v.parse::<usize>().ok()) {
                if span > MAX_GRID_COLUMNS {
                    debug!("gridSpan {} clamped to {} columns", span, MAX_GRID_COLUMNS);
                }
                cell.grid_span = span;
            }
        }
        b"vMerge" => {
            cell.v_merge = match val_attribute(e)?.as_deref() {
                Some("restart") => VMerge::Restart,
                _ => VMerge::Continue,
            };
        }
        _ => {}
    }

    Ok(())
}

/// Read the `w:val` attribute of an element.
fn val_attribute(e: &BytesStart<'_>) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == b"val" {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
