//! Batch command - validate many sheets concurrently.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use fisa_core::{CurriculumPlan, ReportStatus, ValidationReport, Validator};

use super::{file_name, load_config, load_plan, load_sheet, to_json};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of sheets to validate (e.g., "sheets/*.docx")
    #[arg(required = true)]
    input: String,

    /// Curriculum plan JSON (default: from configuration)
    #[arg(short, long)]
    plan: Option<PathBuf>,

    /// Directory for one JSON report per sheet
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Write a summary CSV to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct BatchResult {
    path: PathBuf,
    report: Option<ValidationReport>,
    structural_warnings: usize,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let plan_path = args.plan.clone().unwrap_or_else(|| config.plan.path.clone());
    let plan = Arc::new(load_plan(Some(plan_path.as_path()), &config)?);
    let validator = Arc::new(Validator::new().with_config(config.validation.clone()));

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    // The plan and earlier reports are JSON too and must not be taken for sheets
    let plan_file = fs::canonicalize(&plan_path)?;
    let report_dir = args
        .output_dir
        .as_deref()
        .map(fs::canonicalize)
        .transpose()?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "docx" | "json")
        })
        .filter(|p| {
            let Ok(resolved) = fs::canonicalize(p) else {
                return true;
            };
            if resolved == plan_file {
                debug!("Skipping curriculum plan {}", p.display());
                return false;
            }
            if report_dir.is_some() && resolved.parent() == report_dir.as_deref() {
                debug!("Skipping report {}", p.display());
                return false;
            }
            true
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to validate",
        style("ℹ").blue(),
        files.len()
    );

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut handles = Vec::with_capacity(files.len());

    for path in files {
        let permit = semaphore.clone().acquire_owned().await?;
        let plan = Arc::clone(&plan);
        let validator = Arc::clone(&validator);
        let progress = progress.clone();

        handles.push(tokio::task::spawn_blocking(move || {
            let result = validate_file(path, &validator, &plan);
            progress.inc(1);
            drop(permit);
            result
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await?;

        if let Some(message) = &result.error {
            if args.continue_on_error {
                warn!("Failed to validate {}: {}", result.path.display(), message);
            } else {
                error!("Failed to validate {}: {}", result.path.display(), message);
                progress.abandon();
                anyhow::bail!("Validation failed for {}: {}", result.path.display(), message);
            }
        }

        results.push(result);
    }

    progress.finish_and_clear();

    if let Some(ref output_dir) = args.output_dir {
        for result in &results {
            let Some(report) = &result.report else { continue };
            // Keep the source extension so a.docx and a.json do not collide
            let output_path = output_dir.join(format!("{}.json", file_name(&result.path)));
            fs::write(&output_path, to_json(report, config.output.pretty)?)?;
            debug!("Wrote report to {}", output_path.display());
        }
    }

    if let Some(ref summary_path) = args.summary {
        write_summary(summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let count = |status: ReportStatus| {
        results
            .iter()
            .filter(|r| r.report.as_ref().is_some_and(|rep| rep.status == status))
            .count()
    };
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!(
        "{} Validated {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} valid, {} with warnings, {} with errors, {} failed",
        style(count(ReportStatus::Success)).green(),
        style(count(ReportStatus::Warning)).yellow(),
        style(count(ReportStatus::Error)).red(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn validate_file(path: PathBuf, validator: &Validator, plan: &CurriculumPlan) -> BatchResult {
    let file_start = Instant::now();

    let (report, structural_warnings, error) = match load_sheet(&path) {
        Ok(outcome) => (
            Some(validator.validate(&outcome.record, plan)),
            outcome.warnings.len(),
            None,
        ),
        Err(e) => (None, 0, Some(e.to_string())),
    };

    BatchResult {
        path,
        report,
        structural_warnings,
        error,
        processing_time_ms: file_start.elapsed().as_millis() as u64,
    }
}

fn write_summary(path: &Path, results: &[BatchResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "code",
        "name",
        "checks_ok",
        "checks_warning",
        "checks_error",
        "structural_warnings",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = file_name(&result.path);
        let time = result.processing_time_ms.to_string();

        match &result.report {
            Some(report) => {
                let status = match report.status {
                    ReportStatus::Success => "success",
                    ReportStatus::Warning => "warning",
                    ReportStatus::Error => "error",
                };
                let stats = report.statistics.unwrap_or_default();
                wtr.write_record([
                    filename.as_str(),
                    status,
                    report.code.as_deref().unwrap_or(""),
                    report.name.as_deref().unwrap_or(""),
                    &stats.ok.to_string(),
                    &stats.warning.to_string(),
                    &stats.error.to_string(),
                    &result.structural_warnings.to_string(),
                    &time,
                    report.message.as_deref().unwrap_or(""),
                ])?;
            }
            None => {
                wtr.write_record([
                    filename.as_str(),
                    "failed",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    &time,
                    result.error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
