//! Declarative sheet layout: which cell feeds which record field.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::rules::{
    normalize_whitespace, CategoryExtractor, CodeExtractor, EvaluationExtractor,
    FieldExtractor, IntegerExtractor, Names, NamesExtractor,
};
use crate::document::Document;
use crate::models::record::{Category, EvaluationMethod, ExtractedRecord};

/// Record field fed by a layout coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Field {
    Names,
    Code,
    Category,
    EvaluationMethod,
    Credits,
    WeeklyHoursTotal,
    Lecture,
    Seminar,
    Project,
    Lab,
    TotalHoursCurriculum,
    SelfStudy,
    Research,
    SeminarPrep,
    Exams,
    TotalIndividualStudyHours,
    TotalSemesterHours,
}

impl Field {
    /// Path of the field in the serialized record.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Names => "name_native/name_foreign",
            Field::Code => "code",
            Field::Category => "category",
            Field::EvaluationMethod => "evaluation_method",
            Field::Credits => "credits",
            Field::WeeklyHoursTotal => "weekly_hours_total",
            Field::Lecture => "weekly_hours.lecture",
            Field::Seminar => "weekly_hours.seminar",
            Field::Project => "weekly_hours.project",
            Field::Lab => "weekly_hours.lab",
            Field::TotalHoursCurriculum => "total_hours_curriculum",
            Field::SelfStudy => "time_distribution.self_study",
            Field::Research => "time_distribution.research",
            Field::SeminarPrep => "time_distribution.seminar_prep",
            Field::Exams => "time_distribution.exams",
            Field::TotalIndividualStudyHours => "total_individual_study_hours",
            Field::TotalSemesterHours => "total_semester_hours",
        }
    }

    /// Store a parsed value into the record.
    pub fn apply(&self, record: &mut ExtractedRecord, value: ParsedValue) {
        match (self, value) {
            (Field::Names, ParsedValue::Names(names)) => {
                record.name_native = names.native;
                record.name_foreign = names.foreign;
            }
            (Field::Code, ParsedValue::Text(code)) => record.code = Some(code),
            (Field::Category, ParsedValue::Category(category)) => {
                record.category = Some(category)
            }
            (Field::EvaluationMethod, ParsedValue::Evaluation(method)) => {
                record.evaluation_method = Some(method)
            }
            (field, ParsedValue::Integer(n)) if field.is_integer() => {
                let hours = &mut record.weekly_hours;
                let dist = &mut record.time_distribution;
                match field {
                    Field::Credits => record.credits = Some(n),
                    Field::WeeklyHoursTotal => record.weekly_hours_total = Some(n),
                    Field::Lecture => hours.lecture = n,
                    Field::Seminar => hours.seminar = n,
                    Field::Project => hours.project = n,
                    Field::Lab => hours.lab = n,
                    Field::TotalHoursCurriculum => record.total_hours_curriculum = Some(n),
                    Field::SelfStudy => dist.self_study = n,
                    Field::Research => dist.research = n,
                    Field::SeminarPrep => dist.seminar_prep = n,
                    Field::Exams => dist.exams = n,
                    Field::TotalIndividualStudyHours => {
                        record.total_individual_study_hours = Some(n)
                    }
                    Field::TotalSemesterHours => record.total_semester_hours = Some(n),
                    _ => {}
                }
            }
            (field, value) => {
                warn!("Parser output {:?} does not fit field {}", value, field.name());
            }
        }
    }

    fn is_integer(&self) -> bool {
        !matches!(
            self,
            Field::Names | Field::Code | Field::Category | Field::EvaluationMethod
        )
    }
}

impl From<Field> for &'static str {
    fn from(field: Field) -> Self {
        field.name()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a cell's normalized text is turned into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellParser {
    Names,
    Code,
    Category,
    Evaluation,
    Integer,
}

/// Value produced by a [`CellParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedValue {
    Names(Names),
    Text(String),
    Category(Category),
    Evaluation(EvaluationMethod),
    Integer(u32),
}

impl CellParser {
    /// Parse normalized cell text. `None` means no token was found.
    pub fn parse(&self, text: &str) -> Option<ParsedValue> {
        match self {
            CellParser::Names => NamesExtractor.extract(text).map(ParsedValue::Names),
            CellParser::Code => CodeExtractor.extract(text).map(ParsedValue::Text),
            CellParser::Category => CategoryExtractor.extract(text).map(ParsedValue::Category),
            CellParser::Evaluation => {
                EvaluationExtractor.extract(text).map(ParsedValue::Evaluation)
            }
            CellParser::Integer => IntegerExtractor.extract(text).map(ParsedValue::Integer),
        }
    }
}

/// The part of a coordinate that was not present in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCoordinate {
    Table,
    Row,
    Cell,
}

/// One layout entry: the cell at `(table, row, cell)` feeds `field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub table: usize,
    pub row: usize,
    pub cell: usize,
    pub field: Field,
    pub parser: CellParser,
}

impl FieldMapping {
    pub const fn new(table: usize, row: usize, cell: usize, field: Field, parser: CellParser) -> Self {
        Self {
            table,
            row,
            cell,
            field,
            parser,
        }
    }

    /// Look up the cell and parse it.
    ///
    /// Fails only when the coordinate does not exist; a cell without a
    /// recognizable token yields `Ok(None)`.
    pub fn read(&self, document: &Document) -> Result<Option<ParsedValue>, MissingCoordinate> {
        let table = document.table(self.table).ok_or(MissingCoordinate::Table)?;
        let row = table.row(self.row).ok_or(MissingCoordinate::Row)?;
        let cell = row.cell(self.cell).ok_or(MissingCoordinate::Cell)?;

        Ok(self.parser.parse(&normalize_whitespace(&cell.text)))
    }
}

/// Layout of the standard course specification sheet.
///
/// Table 1 holds the discipline data, table 2 the weekly and plan hours,
/// table 3 the distribution of individual study time with totals and credits.
const STANDARD: &[FieldMapping] = &[
    FieldMapping::new(1, 0, 4, Field::Names, CellParser::Names),
    FieldMapping::new(1, 1, 4, Field::Code, CellParser::Code),
    FieldMapping::new(1, 1, 8, Field::Category, CellParser::Category),
    FieldMapping::new(1, 4, 6, Field::EvaluationMethod, CellParser::Evaluation),
    FieldMapping::new(2, 0, 2, Field::WeeklyHoursTotal, CellParser::Integer),
    FieldMapping::new(2, 0, 4, Field::Lecture, CellParser::Integer),
    FieldMapping::new(2, 0, 6, Field::Seminar, CellParser::Integer),
    FieldMapping::new(2, 0, 8, Field::Lab, CellParser::Integer),
    FieldMapping::new(2, 0, 10, Field::Project, CellParser::Integer),
    FieldMapping::new(2, 1, 2, Field::TotalHoursCurriculum, CellParser::Integer),
    FieldMapping::new(3, 1, 1, Field::SelfStudy, CellParser::Integer),
    FieldMapping::new(3, 2, 1, Field::Research, CellParser::Integer),
    FieldMapping::new(3, 3, 1, Field::SeminarPrep, CellParser::Integer),
    FieldMapping::new(3, 4, 1, Field::Exams, CellParser::Integer),
    FieldMapping::new(3, 5, 1, Field::TotalIndividualStudyHours, CellParser::Integer),
    FieldMapping::new(3, 6, 1, Field::TotalSemesterHours, CellParser::Integer),
    FieldMapping::new(3, 7, 1, Field::Credits, CellParser::Integer),
];

/// An ordered list of field mappings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    mappings: Vec<FieldMapping>,
}

impl Layout {
    /// The standard sheet layout.
    pub fn standard() -> Self {
        Self {
            mappings: STANDARD.to_vec(),
        }
    }

    pub fn new(mappings: Vec<FieldMapping>) -> Self {
        Self { mappings }
    }

    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    /// Mappings grouped by table, tables in order of first appearance.
    pub fn by_table(&self) -> Vec<(usize, Vec<&FieldMapping>)> {
        let mut groups: Vec<(usize, Vec<&FieldMapping>)> = Vec::new();

        for mapping in &self.mappings {
            match groups.iter_mut().find(|(table, _)| *table == mapping.table) {
                Some((_, group)) => group.push(mapping),
                None => groups.push((mapping.table, vec![mapping])),
            }
        }

        groups
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}
