//! Course specification sheet data models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fields read from one course specification sheet.
///
/// Every optional field may be absent when the sheet's cell was missing or
/// did not contain a recognizable token. Hour components default to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedRecord {
    /// Discipline code, e.g. `IG.TC.101`.
    #[serde(alias = "cod")]
    pub code: Option<String>,

    /// Discipline name in the native language.
    #[serde(alias = "denumire_ro")]
    pub name_native: Option<String>,

    /// Discipline name in the foreign language.
    #[serde(alias = "denumire_en")]
    pub name_foreign: Option<String>,

    /// Discipline category.
    #[serde(alias = "categoria")]
    pub category: Option<Category>,

    /// Number of credits.
    #[serde(alias = "credite")]
    pub credits: Option<u32>,

    /// Declared total hours per week.
    pub weekly_hours_total: Option<u32>,

    /// Hours per week by activity type.
    #[serde(alias = "nr_ore_saptamana")]
    pub weekly_hours: WeeklyHours,

    /// Total hours mandated by the curriculum plan.
    #[serde(alias = "total_ore_plan")]
    pub total_hours_curriculum: Option<u32>,

    /// Breakdown of individual study time.
    #[serde(alias = "distributie_fond_timp")]
    pub time_distribution: TimeDistribution,

    /// Declared sum of individual study components.
    #[serde(alias = "total_ore_studiu_individual")]
    pub total_individual_study_hours: Option<u32>,

    /// Declared total workload for the semester.
    #[serde(alias = "total_ore_semestru")]
    pub total_semester_hours: Option<u32>,

    /// Final evaluation method.
    #[serde(alias = "evaluare")]
    pub evaluation_method: Option<EvaluationMethod>,
}

impl ExtractedRecord {
    /// Create an empty record with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the code, e.g. with one selected manually by the user.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Check whether nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Hours per week by activity type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyHours {
    #[serde(alias = "curs")]
    pub lecture: u32,
    pub seminar: u32,
    #[serde(alias = "proiect")]
    pub project: u32,
    #[serde(alias = "lucrari")]
    pub lab: u32,
}

/// Distribution of individual study time, in hours per semester.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeDistribution {
    /// Study from textbooks, course notes, bibliography.
    #[serde(alias = "studiu_manual")]
    pub self_study: u32,

    /// Additional documentation in libraries or online.
    #[serde(alias = "documentare")]
    pub research: u32,

    /// Preparation of seminars, labs, homework, projects.
    #[serde(alias = "pregatire_seminarii")]
    pub seminar_prep: u32,

    /// Examinations.
    #[serde(alias = "examinari")]
    pub exams: u32,
}

/// Discipline category in the curriculum plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// Advanced discipline.
    Da,
    /// Optional discipline.
    Dop,
    /// Compulsory discipline.
    Dob,
    /// Optional (elective) discipline outside the core.
    Dfa,
}

impl Category {
    /// Parse a category from its exact abbreviation.
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "DA" => Some(Category::Da),
            "DOP" => Some(Category::Dop),
            "DOB" => Some(Category::Dob),
            "DFA" => Some(Category::Dfa),
            _ => None,
        }
    }

    /// The abbreviation used on sheets and in plans.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Da => "DA",
            Category::Dop => "DOP",
            Category::Dob => "DOB",
            Category::Dfa => "DFA",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final evaluation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationMethod {
    /// Written or oral exam.
    #[serde(rename = "E")]
    Exam,
    /// Pass/fail verification.
    #[serde(rename = "V")]
    Verification,
    /// Colloquium.
    #[serde(rename = "C")]
    Colloquium,
}

impl EvaluationMethod {
    /// Parse an evaluation method from its one-letter code.
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "E" => Some(EvaluationMethod::Exam),
            "V" => Some(EvaluationMethod::Verification),
            "C" => Some(EvaluationMethod::Colloquium),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationMethod::Exam => "E",
            EvaluationMethod::Verification => "V",
            EvaluationMethod::Colloquium => "C",
        }
    }
}

impl fmt::Display for EvaluationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
