//! Arithmetic identities between declared workload totals.
//!
//! Absent operands count as zero; every identity is always checked.

use super::report::{CheckOutcome, CheckStatus, CheckValue, RuleFamily, RuleGroup};
use crate::models::config::ValidationConfig;
use crate::models::record::ExtractedRecord;

/// Run every arithmetic identity check.
pub fn check_identities(record: &ExtractedRecord, config: &ValidationConfig) -> RuleGroup {
    let mut group = RuleGroup::new(RuleFamily::Arithmetic);

    let total_semester = value(record.total_semester_hours);
    let credits = value(record.credits);
    let per_credit = u64::from(config.hours_per_credit);
    group.push(identity(
        "total_semester_from_credits",
        format!("total_semester_hours == credits × {}", per_credit),
        record.total_semester_hours,
        credits * per_credit,
        format!("{} == {} × {}", total_semester, credits, per_credit),
        |derived| {
            format!(
                "Total semester hours ({}) do not equal credits × {} ({})",
                total_semester, per_credit, derived
            )
        },
    ));

    let dist = &record.time_distribution;
    let total_study = value(record.total_individual_study_hours);
    let (self_study, research, seminar_prep) = (
        u64::from(dist.self_study),
        u64::from(dist.research),
        u64::from(dist.seminar_prep),
    );
    group.push(identity(
        "individual_study_sum",
        "total_individual_study_hours == self_study + research + seminar_prep".to_string(),
        record.total_individual_study_hours,
        self_study + research + seminar_prep,
        format!(
            "{} == {} + {} + {}",
            total_study, self_study, research, seminar_prep
        ),
        |derived| {
            format!(
                "Total individual study hours ({}) are not the sum of their components ({})",
                total_study, derived
            )
        },
    ));

    let curriculum = value(record.total_hours_curriculum);
    group.push(identity(
        "total_semester_sum",
        "total_semester_hours == total_hours_curriculum + total_individual_study_hours"
            .to_string(),
        record.total_semester_hours,
        curriculum + total_study,
        format!("{} == {} + {}", total_semester, curriculum, total_study),
        |derived| {
            format!(
                "Total semester hours ({}) are not plan hours ({}) + individual study ({}) = {}",
                total_semester, curriculum, total_study, derived
            )
        },
    ));

    group
}

fn value(declared: Option<u32>) -> u64 {
    declared.map(u64::from).unwrap_or(0)
}

fn identity(
    name: &'static str,
    formula: String,
    declared: Option<u32>,
    derived: u64,
    calculation: String,
    mismatch: impl FnOnce(u64) -> String,
) -> CheckOutcome {
    let matched = value(declared) == derived;

    let mut outcome = CheckOutcome::new(
        name,
        CheckStatus::from_match(matched),
        declared.map(CheckValue::from),
        Some(CheckValue::Integer(derived)),
    );
    outcome.formula = Some(formula);
    outcome.calculation = Some(calculation);
    if !matched {
        outcome.message = Some(mismatch(derived));
    }
    outcome
}
