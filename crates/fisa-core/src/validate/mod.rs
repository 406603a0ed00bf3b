//! Validation of extracted sheets against the curriculum plan.

pub mod arithmetic;
pub mod comparison;
pub mod interval;
pub mod report;
pub mod similarity;

pub use report::{
    CheckOutcome, CheckStatus, CheckValue, ReportStatus, RuleFamily, RuleGroup, Statistics,
    ValidationReport, Validations,
};
pub use similarity::similarity;

use tracing::{debug, info};

use crate::models::config::ValidationConfig;
use crate::models::record::ExtractedRecord;
use crate::plan::CurriculumPlan;

/// Stateless validator; the plan is passed in on every call.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a validator with default rule settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Validate a record against the plan discipline with the same code.
    ///
    /// A code missing from the plan (or from the record) yields an error
    /// report without validations; no rule is run in that case.
    pub fn validate(&self, record: &ExtractedRecord, plan: &CurriculumPlan) -> ValidationReport {
        let Some(reference) = record.code.as_deref().and_then(|code| plan.find(code)) else {
            info!("Code {:?} not found in curriculum plan", record.code);
            return ValidationReport::not_found(record.code.clone());
        };

        debug!("Validating sheet against plan discipline {}", reference.code);

        let validations = Validations::new(vec![
            comparison::compare_with_plan(record, reference, &self.config),
            arithmetic::check_identities(record, &self.config),
            interval::check_intervals(record, &self.config),
        ]);

        let report = ValidationReport::from_validations(
            record.code.clone(),
            reference.name_native.clone(),
            validations,
        );

        if let Some(stats) = &report.statistics {
            info!(
                "Validated {}: {:?} ({} ok, {} warnings, {} errors)",
                reference.code, report.status, stats.ok, stats.warning, stats.error
            );
        }

        report
    }
}
