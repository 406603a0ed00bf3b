//! Reference curriculum plan.
//!
//! The plan is loaded once at startup and only read afterwards; callers hold
//! it by value or behind an `Arc` and pass `&CurriculumPlan` to the validator.

use std::collections::HashMap;
use std::path::Path;

use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PlanError;
use crate::models::record::{Category, WeeklyHours};

/// One discipline as mandated by the curriculum plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    #[serde(alias = "cod")]
    pub code: String,

    #[serde(default, alias = "denumire_ro")]
    pub name_native: Option<String>,

    #[serde(default, alias = "denumire_en")]
    pub name_foreign: Option<String>,

    #[serde(default, alias = "categoria")]
    pub category: Option<Category>,

    #[serde(default, alias = "credite")]
    pub credits: Option<u32>,

    #[serde(default, alias = "nr_ore_saptamana")]
    pub weekly_hours: WeeklyHours,

    /// Year of study.
    #[serde(default, alias = "an")]
    pub year: Option<u32>,

    #[serde(default, alias = "semestru")]
    pub semester: Option<u32>,
}

/// Listing entry for a plan discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisciplineSummary {
    pub code: String,
    pub name_native: Option<String>,
    pub year: Option<u32>,
    pub semester: Option<u32>,
    pub credits: Option<u32>,
}

#[derive(Deserialize)]
struct PlanFile {
    #[serde(rename = "discipline")]
    disciplines: Vec<ReferenceRecord>,
}

/// The set of all disciplines the institution expects, keyed by code.
#[derive(Debug, Clone, Default)]
pub struct CurriculumPlan {
    disciplines: Vec<ReferenceRecord>,
    index: HashMap<String, usize>,
}

impl CurriculumPlan {
    /// Build a plan, rejecting duplicate codes.
    pub fn new(disciplines: Vec<ReferenceRecord>) -> Result<Self, PlanError> {
        let mut index = HashMap::with_capacity(disciplines.len());

        for (i, discipline) in disciplines.iter().enumerate() {
            if index.insert(discipline.code.clone(), i).is_some() {
                return Err(PlanError::DuplicateCode(discipline.code.clone()));
            }
        }

        Ok(Self { disciplines, index })
    }

    /// Parse a plan from its JSON form: `{"discipline": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, PlanError> {
        let file: PlanFile = serde_json::from_str(json)?;
        Self::new(file.disciplines)
    }

    /// Load a plan from a JSON file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let plan = Self::from_json(&content)?;
        info!(
            "Loaded curriculum plan from {} with {} disciplines",
            path.display(),
            plan.len()
        );
        Ok(plan)
    }

    /// Find a discipline by exact, case-sensitive code.
    pub fn find(&self, code: &str) -> Option<&ReferenceRecord> {
        self.index.get(code).map(|&i| &self.disciplines[i])
    }

    pub fn len(&self) -> usize {
        self.disciplines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disciplines.is_empty()
    }

    /// Disciplines in file order.
    pub fn iter(&self) -> impl Iterator<Item = &ReferenceRecord> {
        self.disciplines.iter()
    }

    /// Short listing of every discipline.
    pub fn summaries(&self) -> Vec<DisciplineSummary> {
        self.disciplines
            .iter()
            .map(|d| DisciplineSummary {
                code: d.code.clone(),
                name_native: d.name_native.clone(),
                year: d.year,
                semester: d.semester,
                credits: d.credits,
            })
            .collect()
    }
}

/// Serializes back to the `{"discipline": [...]}` file shape.
impl Serialize for CurriculumPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CurriculumPlan", 1)?;
        state.serialize_field("discipline", &self.disciplines)?;
        state.end()
    }
}
