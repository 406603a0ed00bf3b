//! Extract command - read the fields of a single sheet.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;

use fisa_core::{ExtractedRecord, StructuralWarning};

use super::{emit, file_name, load_config, load_sheet, to_json, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input sheet (DOCX)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct ExtractEnvelope<'a> {
    status: &'static str,
    filename: String,
    data: &'a ExtractedRecord,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    warnings: &'a [StructuralWarning],
}

pub async fn run(args: ExtractArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let is_docx = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("docx"));
    if !is_docx {
        anyhow::bail!("Input must be a DOCX file: {}", args.input.display());
    }

    let outcome = load_sheet(&args.input)?;

    let output = match args.format {
        OutputFormat::Json => to_json(
            &ExtractEnvelope {
                status: "success",
                filename: file_name(&args.input),
                data: &outcome.record,
                warnings: &outcome.warnings,
            },
            config.output.pretty,
        )?,
        OutputFormat::Text => format_record_text(&outcome.record, &outcome.warnings),
    };

    emit(args.output.as_deref(), &output)
}

fn show<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn format_record_text(record: &ExtractedRecord, warnings: &[StructuralWarning]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Code: {}\n", show(record.code.as_deref())));
    output.push_str(&format!("Name: {}\n", show(record.name_native.as_deref())));
    output.push_str(&format!("Name (foreign): {}\n", show(record.name_foreign.as_deref())));
    output.push_str(&format!("Category: {}\n", show(record.category)));
    output.push_str(&format!("Evaluation: {}\n", show(record.evaluation_method)));
    output.push_str(&format!("Credits: {}\n", show(record.credits)));
    output.push('\n');

    let hours = &record.weekly_hours;
    output.push_str(&format!(
        "Weekly hours: {} (lecture {}, seminar {}, lab {}, project {})\n",
        show(record.weekly_hours_total),
        hours.lecture,
        hours.seminar,
        hours.lab,
        hours.project
    ));
    output.push_str(&format!(
        "Curriculum hours: {}\n",
        show(record.total_hours_curriculum)
    ));

    let time = &record.time_distribution;
    output.push_str(&format!(
        "Individual study: {} (self study {}, research {}, seminar prep {}, exams {})\n",
        show(record.total_individual_study_hours),
        time.self_study,
        time.research,
        time.seminar_prep,
        time.exams
    ));
    output.push_str(&format!(
        "Semester hours: {}\n",
        show(record.total_semester_hours)
    ));

    if !warnings.is_empty() {
        output.push_str("\nWarnings:\n");
        for warning in warnings {
            output.push_str(&format!("  - {}\n", warning));
        }
    }

    output
}
