//! Validate command - check a single sheet against the curriculum plan.

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use fisa_core::validate::{CheckStatus, CheckValue};
use fisa_core::{StructuralWarning, ValidationReport, Validator};

use super::{emit, file_name, load_config, load_plan, load_sheet, to_json, OutputFormat};

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// Input sheet (DOCX, or a JSON record from `fisa extract`)
    #[arg(required = true)]
    input: PathBuf,

    /// Curriculum plan JSON (default: from configuration)
    #[arg(short, long)]
    plan: Option<PathBuf>,

    /// Validate under this discipline code instead of the one on the sheet
    #[arg(long)]
    code: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct ValidateEnvelope<'a> {
    status: &'static str,
    filename: String,
    code_overridden: bool,
    validation: &'a ValidationReport,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    warnings: &'a [StructuralWarning],
}

/// The verdict is reported as data; an error verdict still exits with 0.
pub async fn run(args: ValidateArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let plan = load_plan(args.plan.as_deref(), &config)?;

    let outcome = load_sheet(&args.input)?;
    let mut record = outcome.record;
    if let Some(code) = &args.code {
        info!("Using manually selected code {}", code);
        record = record.with_code(code.as_str());
    }

    let report = Validator::new()
        .with_config(config.validation.clone())
        .validate(&record, &plan);

    let output = match args.format {
        OutputFormat::Json => to_json(
            &ValidateEnvelope {
                status: "success",
                filename: file_name(&args.input),
                code_overridden: args.code.is_some(),
                validation: &report,
                warnings: &outcome.warnings,
            },
            config.output.pretty,
        )?,
        OutputFormat::Text => format_report_text(&report, &outcome.warnings),
    };

    emit(args.output.as_deref(), &output)
}

fn format_value(value: Option<&CheckValue>) -> String {
    match value {
        Some(CheckValue::Text(text)) => text.clone(),
        Some(CheckValue::Integer(n)) => n.to_string(),
        Some(CheckValue::Range(min, max)) => format!("{}..={}", min, max),
        None => "-".to_string(),
    }
}

pub fn format_report_text(report: &ValidationReport, warnings: &[StructuralWarning]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Code: {}\n",
        report.code.as_deref().unwrap_or("-")
    ));
    if let Some(name) = &report.name {
        output.push_str(&format!("Discipline: {}\n", name));
    }
    output.push_str(&format!("Status: {:?}\n", report.status));

    let Some(validations) = &report.validations else {
        if let Some(message) = &report.message {
            output.push_str(&format!("{}\n", message));
        }
        return output;
    };

    for group in validations.groups() {
        output.push_str(&format!("\n{}:\n", group.family.key()));
        for check in &group.outcomes {
            let mark = match check.status {
                CheckStatus::Ok => style("✓").green(),
                CheckStatus::Warning => style("!").yellow(),
                CheckStatus::Error => style("✗").red(),
            };
            output.push_str(&format!(
                "  {} {}: {} (expected {})\n",
                mark,
                check.name,
                format_value(check.observed.as_ref()),
                format_value(check.expected.as_ref())
            ));
            if let Some(message) = &check.message {
                output.push_str(&format!("      {}\n", message));
            }
        }
    }

    if let Some(stats) = &report.statistics {
        output.push_str(&format!(
            "\n{} checks: {} ok, {} warnings, {} errors\n",
            stats.total, stats.ok, stats.warning, stats.error
        ));
    }
    if let Some(summary) = &report.summary {
        output.push_str(&format!("{}\n", summary));
    }

    if !warnings.is_empty() {
        output.push_str("\nStructural warnings:\n");
        for warning in warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}
