//! Range checks on sheet values.

use super::report::{CheckOutcome, CheckStatus, CheckValue, RuleFamily, RuleGroup};
use crate::models::config::ValidationConfig;
use crate::models::record::ExtractedRecord;

/// Run every interval check.
pub fn check_intervals(record: &ExtractedRecord, config: &ValidationConfig) -> RuleGroup {
    let mut group = RuleGroup::new(RuleFamily::Interval);

    let exams = record.time_distribution.exams;
    let (min, max) = (config.exam_hours_min, config.exam_hours_max);
    let within = (min..=max).contains(&exams);

    let mut outcome = CheckOutcome::new(
        "exams_hours",
        CheckStatus::from_match(within),
        Some(exams.into()),
        Some(CheckValue::Range(u64::from(min), u64::from(max))),
    );
    if !within {
        outcome.message = Some(format!(
            "Examination hours ({}) must be between {} and {}",
            exams, min, max
        ));
    }
    group.push(outcome);

    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_exams(exams: u32) -> ExtractedRecord {
        let mut record = ExtractedRecord::new();
        record.time_distribution.exams = exams;
        record
    }

    #[test]
    fn test_exam_hours_bounds() {
        let config = ValidationConfig::default();

        for exams in [2, 3] {
            let group = check_intervals(&with_exams(exams), &config);
            assert!(group.get("exams_hours").unwrap().is_ok(), "{} should pass", exams);
        }

        for exams in [0, 1, 4] {
            let group = check_intervals(&with_exams(exams), &config);
            let outcome = group.get("exams_hours").unwrap();
            assert_eq!(outcome.status, CheckStatus::Error, "{} should fail", exams);
            assert_eq!(
                outcome.message.as_deref(),
                Some(format!("Examination hours ({}) must be between 2 and 3", exams).as_str())
            );
        }
    }
}
