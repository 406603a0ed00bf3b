//! Comparison of sheet fields with the plan discipline.

use super::report::{CheckOutcome, CheckStatus, CheckValue, RuleFamily, RuleGroup};
use super::similarity::similarity_opt;
use crate::models::config::ValidationConfig;
use crate::models::record::ExtractedRecord;
use crate::plan::ReferenceRecord;

/// Run every plan comparison check.
pub fn compare_with_plan(
    record: &ExtractedRecord,
    reference: &ReferenceRecord,
    config: &ValidationConfig,
) -> RuleGroup {
    let mut group = RuleGroup::new(RuleFamily::PlanComparison);

    group.push(exact(
        "code",
        record.code.as_deref().map(CheckValue::from),
        Some(CheckValue::from(reference.code.as_str())),
        "Discipline code differs from the plan",
    ));

    group.push(fuzzy_name(
        "name_native",
        record.name_native.as_deref(),
        reference.name_native.as_deref(),
        "native",
        config,
    ));
    group.push(fuzzy_name(
        "name_foreign",
        record.name_foreign.as_deref(),
        reference.name_foreign.as_deref(),
        "foreign",
        config,
    ));

    group.push(exact(
        "category",
        record.category.map(|c| CheckValue::from(c.as_str())),
        reference.category.map(|c| CheckValue::from(c.as_str())),
        "Category differs from the plan",
    ));

    group.push(exact(
        "credits",
        record.credits.map(CheckValue::from),
        reference.credits.map(CheckValue::from),
        "Number of credits differs from the plan",
    ));

    let sheet = &record.weekly_hours;
    let plan = &reference.weekly_hours;
    for (name, kind, observed, expected) in [
        ("hours_lecture", "lecture", sheet.lecture, plan.lecture),
        ("hours_seminar", "seminar", sheet.seminar, plan.seminar),
        ("hours_project", "project", sheet.project, plan.project),
        ("hours_lab", "lab", sheet.lab, plan.lab),
    ] {
        group.push(exact(
            name,
            Some(observed.into()),
            Some(expected.into()),
            format!("Weekly {} hours differ from the plan", kind),
        ));
    }

    group
}

/// Equality check; an absent sheet value never matches.
fn exact(
    name: &'static str,
    observed: Option<CheckValue>,
    expected: Option<CheckValue>,
    mismatch: impl Into<String>,
) -> CheckOutcome {
    let matched = observed.is_some() && observed == expected;
    let outcome = CheckOutcome::new(name, CheckStatus::from_match(matched), observed, expected);

    if matched {
        outcome
    } else {
        outcome.with_message(mismatch)
    }
}

fn fuzzy_name(
    name: &'static str,
    observed: Option<&str>,
    expected: Option<&str>,
    language: &str,
    config: &ValidationConfig,
) -> CheckOutcome {
    let score = similarity_opt(observed, expected);

    let (status, message) = if score >= config.ok_threshold {
        (CheckStatus::Ok, None)
    } else if score >= config.warning_threshold {
        (
            CheckStatus::Warning,
            Some(format!(
                "Minor differences in the {} name (likely diacritic-only difference)",
                language
            )),
        )
    } else {
        (
            CheckStatus::Error,
            Some(format!(
                "The {} name differs significantly from the plan",
                language
            )),
        )
    };

    let mut outcome = CheckOutcome::new(
        name,
        status,
        observed.map(CheckValue::from),
        expected.map(CheckValue::from),
    );
    outcome.similarity = Some((score * 1000.0).round() / 1000.0);
    outcome.message = message;
    outcome
}
