//! Validation report types.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Outcome tier of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckStatus {
    pub fn from_match(matched: bool) -> Self {
        if matched { CheckStatus::Ok } else { CheckStatus::Error }
    }
}

/// Overall verdict of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Success,
    Warning,
    Error,
}

impl ReportStatus {
    /// One-line description of the verdict.
    pub fn summary(&self) -> &'static str {
        match self {
            ReportStatus::Success => "Sheet is valid and matches the curriculum plan",
            ReportStatus::Warning => "Sheet is valid but has warnings",
            ReportStatus::Error => "Sheet has errors that must be corrected",
        }
    }
}

/// A value shown on either side of a check.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum CheckValue {
    Text(String),
    Integer(u64),
    /// Inclusive bounds.
    Range(u64, u64),
}

impl From<&str> for CheckValue {
    fn from(value: &str) -> Self {
        CheckValue::Text(value.to_string())
    }
}

impl From<u32> for CheckValue {
    fn from(value: u32) -> Self {
        CheckValue::Integer(u64::from(value))
    }
}

impl From<u64> for CheckValue {
    fn from(value: u64) -> Self {
        CheckValue::Integer(value)
    }
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CheckOutcome {
    /// Key of the check within its rule family.
    #[serde(skip)]
    pub name: &'static str,

    pub status: CheckStatus,

    /// Value found on the sheet.
    pub observed: Option<CheckValue>,

    /// Value from the plan, or derived from other sheet fields.
    pub expected: Option<CheckValue>,

    /// Name similarity, rounded to three decimals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,

    /// Identity being checked, in symbolic form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,

    /// The identity with values substituted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calculation: Option<String>,

    pub message: Option<String>,
}

impl CheckOutcome {
    pub fn new(
        name: &'static str,
        status: CheckStatus,
        observed: Option<CheckValue>,
        expected: Option<CheckValue>,
    ) -> Self {
        Self {
            name,
            status,
            observed,
            expected,
            similarity: None,
            formula: None,
            calculation: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == CheckStatus::Ok
    }
}

/// Independent families of validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleFamily {
    /// Sheet fields compared with the plan record.
    PlanComparison,
    /// Declared totals compared with totals computed from other fields.
    Arithmetic,
    /// Values that must fall within bounds.
    Interval,
}

impl RuleFamily {
    pub fn key(&self) -> &'static str {
        match self {
            RuleFamily::PlanComparison => "plan_comparison",
            RuleFamily::Arithmetic => "arithmetic",
            RuleFamily::Interval => "interval",
        }
    }
}

/// Outcomes of one rule family. Check names are unique within the group.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleGroup {
    pub family: RuleFamily,
    pub outcomes: Vec<CheckOutcome>,
}

impl RuleGroup {
    pub fn new(family: RuleFamily) -> Self {
        Self {
            family,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: CheckOutcome) {
        debug_assert!(
            self.get(outcome.name).is_none(),
            "duplicate check {} in {}",
            outcome.name,
            self.family.key()
        );
        self.outcomes.push(outcome);
    }

    pub fn get(&self, name: &str) -> Option<&CheckOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}

impl Serialize for RuleGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.outcomes.len()))?;
        for outcome in &self.outcomes {
            map.serialize_entry(outcome.name, outcome)?;
        }
        map.end()
    }
}

/// All rule groups of a report, keyed by family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validations {
    groups: Vec<RuleGroup>,
}

impl Validations {
    pub fn new(groups: Vec<RuleGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    pub fn group(&self, family: RuleFamily) -> Option<&RuleGroup> {
        self.groups.iter().find(|g| g.family == family)
    }

    /// Look up one check by family and name.
    pub fn get(&self, family: RuleFamily, name: &str) -> Option<&CheckOutcome> {
        self.group(family).and_then(|g| g.get(name))
    }

    /// Every outcome with the family it belongs to.
    pub fn outcomes(&self) -> impl Iterator<Item = (RuleFamily, &CheckOutcome)> {
        self.groups
            .iter()
            .flat_map(|g| g.outcomes.iter().map(move |o| (g.family, o)))
    }

    /// Error if any check failed, warning if any warned, success otherwise.
    pub fn status(&self) -> ReportStatus {
        let statuses: Vec<CheckStatus> = self.outcomes().map(|(_, o)| o.status).collect();

        if statuses.contains(&CheckStatus::Error) {
            ReportStatus::Error
        } else if statuses.contains(&CheckStatus::Warning) {
            ReportStatus::Warning
        } else {
            ReportStatus::Success
        }
    }

    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics::default();
        for (_, outcome) in self.outcomes() {
            stats.total += 1;
            match outcome.status {
                CheckStatus::Ok => stats.ok += 1,
                CheckStatus::Warning => stats.warning += 1,
                CheckStatus::Error => stats.error += 1,
            }
        }
        stats
    }
}

impl Serialize for Validations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(group.family.key(), group)?;
        }
        map.end()
    }
}

/// Counts of check outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Statistics {
    pub total: usize,
    pub ok: usize,
    pub warning: usize,
    pub error: usize,
}

/// Full result of validating one sheet.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ValidationReport {
    pub status: ReportStatus,

    /// Code the sheet was validated under.
    pub code: Option<String>,

    /// Native name of the matched plan discipline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Reason a report carries no validations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// `None` when the code was not found in the plan.
    pub validations: Option<Validations>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,
}

impl ValidationReport {
    /// Report for a code with no plan discipline.
    pub fn not_found(code: Option<String>) -> Self {
        Self {
            status: ReportStatus::Error,
            code,
            name: None,
            message: Some("code not found in reference set".to_string()),
            validations: None,
            summary: None,
            statistics: None,
        }
    }

    /// Report aggregating rule groups.
    pub fn from_validations(
        code: Option<String>,
        name: Option<String>,
        validations: Validations,
    ) -> Self {
        let status = validations.status();
        Self {
            status,
            code,
            name,
            message: None,
            summary: Some(status.summary().to_string()),
            statistics: Some(validations.statistics()),
            validations: Some(validations),
        }
    }

    /// Look up one check by family and name.
    pub fn check(&self, family: RuleFamily, name: &str) -> Option<&CheckOutcome> {
        self.validations.as_ref().and_then(|v| v.get(family, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outcome(name: &'static str, status: CheckStatus) -> CheckOutcome {
        CheckOutcome::new(name, status, Some(1u32.into()), Some(1u32.into()))
    }

    fn group(family: RuleFamily, outcomes: Vec<CheckOutcome>) -> RuleGroup {
        let mut group = RuleGroup::new(family);
        for o in outcomes {
            group.push(o);
        }
        group
    }

    #[test]
    fn test_status_precedence() {
        let ok = Validations::new(vec![group(
            RuleFamily::PlanComparison,
            vec![outcome("a", CheckStatus::Ok)],
        )]);
        assert_eq!(ok.status(), ReportStatus::Success);

        let warn = Validations::new(vec![
            group(RuleFamily::PlanComparison, vec![outcome("a", CheckStatus::Warning)]),
            group(RuleFamily::Interval, vec![outcome("b", CheckStatus::Ok)]),
        ]);
        assert_eq!(warn.status(), ReportStatus::Warning);

        let err = Validations::new(vec![
            group(RuleFamily::PlanComparison, vec![outcome("a", CheckStatus::Warning)]),
            group(RuleFamily::Arithmetic, vec![outcome("b", CheckStatus::Error)]),
        ]);
        assert_eq!(err.status(), ReportStatus::Error);
    }

    #[test]
    fn test_same_name_in_different_families_is_kept_apart() {
        let validations = Validations::new(vec![
            group(RuleFamily::PlanComparison, vec![outcome("total", CheckStatus::Ok)]),
            group(RuleFamily::Arithmetic, vec![outcome("total", CheckStatus::Error)]),
        ]);

        let stats = validations.statistics();
        assert_eq!(stats, Statistics { total: 2, ok: 1, warning: 0, error: 1 });
        assert_eq!(
            validations.get(RuleFamily::Arithmetic, "total").unwrap().status,
            CheckStatus::Error
        );
    }

    #[test]
    fn test_serialized_shape() {
        let validations = Validations::new(vec![group(
            RuleFamily::Interval,
            vec![CheckOutcome::new(
                "exams_hours",
                CheckStatus::Error,
                Some(4u32.into()),
                Some(CheckValue::Range(2, 3)),
            )
            .with_message("out of range")],
        )]);
        let report = ValidationReport::from_validations(Some("IG.TC.101".into()), None, validations);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["validations"]["interval"]["exams_hours"]["expected"], serde_json::json!([2, 3]));
        assert_eq!(json["validations"]["interval"]["exams_hours"]["observed"], 4);
        assert_eq!(json["statistics"]["error"], 1);
        assert_eq!(json["summary"], "Sheet has errors that must be corrected");
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_not_found_shape() {
        let report = ValidationReport::not_found(Some("XX.YY.999".into()));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["code"], "XX.YY.999");
        assert!(json["validations"].is_null());
        assert!(json.get("statistics").is_none());
    }
}
