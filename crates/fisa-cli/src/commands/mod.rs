//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod plan;
pub mod validate;

use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use serde::Serialize;
use tracing::{debug, info};

use fisa_core::{CurriculumPlan, ExtractedRecord, ExtractionOutcome, FisaConfig};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

/// Location of the user's configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fisa")
        .join("config.json")
}

/// Load the configuration given with `--config`, else the user's file if it
/// exists, else the defaults.
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<FisaConfig> {
    if let Some(path) = config_path {
        return Ok(FisaConfig::from_file(path)?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using configuration from {}", path.display());
        Ok(FisaConfig::from_file(&path)?)
    } else {
        Ok(FisaConfig::default())
    }
}

/// Load the curriculum plan from `--plan`, falling back to the configured path.
pub fn load_plan(plan_path: Option<&Path>, config: &FisaConfig) -> anyhow::Result<CurriculumPlan> {
    let path = plan_path.unwrap_or(&config.plan.path);

    if !path.exists() {
        anyhow::bail!("Curriculum plan not found: {}", path.display());
    }

    CurriculumPlan::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load plan {}: {}", path.display(), e))
}

/// Read a sheet from disk. DOCX files are extracted; JSON files are taken as
/// an already extracted record.
pub fn load_sheet(path: &Path) -> anyhow::Result<ExtractionOutcome> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "docx" => {
            let data = fs::read(path)?;
            let outcome = fisa_core::extract_docx(&data)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
            info!(
                "Extracted {} with {} structural warnings",
                path.display(),
                outcome.warnings.len()
            );
            Ok(outcome)
        }
        "json" => {
            let content = fs::read_to_string(path)?;
            let record: ExtractedRecord = serde_json::from_str(&content)?;
            Ok(ExtractionOutcome {
                record,
                warnings: Vec::new(),
            })
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Print to stdout, or write to `output` when given.
pub fn emit(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            println!(
                "{} Output written to {}",
                style("✓").green(),
                path.display()
            );
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// File name of a path, for envelopes and summaries.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string()
}
