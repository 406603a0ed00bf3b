//! Plan command - inspect the curriculum plan.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use super::{load_config, load_plan, to_json, OutputFormat};

/// Arguments for the plan command.
#[derive(Args)]
pub struct PlanArgs {
    /// Curriculum plan JSON (default: from configuration)
    #[arg(short, long, global = true)]
    plan: Option<PathBuf>,

    #[command(subcommand)]
    command: PlanCommand,
}

#[derive(Subcommand)]
enum PlanCommand {
    /// List the disciplines in the plan
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one discipline
    Show {
        /// Discipline code (e.g., "IG.TC.101")
        code: String,
    },

    /// Print every discipline in full, in the plan file's shape
    Dump,
}

pub async fn run(args: PlanArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let plan = load_plan(args.plan.as_deref(), &config)?;

    match args.command {
        PlanCommand::List { format } => {
            let summaries = plan.summaries();
            match format {
                OutputFormat::Json => {
                    println!("{}", to_json(&summaries, config.output.pretty)?);
                }
                OutputFormat::Text => {
                    println!(
                        "{} {} disciplines in plan",
                        style("ℹ").blue(),
                        summaries.len()
                    );
                    for summary in &summaries {
                        let period = match (summary.year, summary.semester) {
                            (Some(year), Some(semester)) => format!("Y{} S{}", year, semester),
                            _ => "-".to_string(),
                        };
                        println!(
                            "  {:<12} {:<8} {:>3} cr  {}",
                            summary.code,
                            period,
                            summary.credits.map(|c| c.to_string()).unwrap_or_default(),
                            summary.name_native.as_deref().unwrap_or("")
                        );
                    }
                }
            }
        }
        PlanCommand::Show { code } => {
            let Some(discipline) = plan.find(&code) else {
                anyhow::bail!("Discipline not found in plan: {}", code);
            };
            println!("{}", to_json(discipline, config.output.pretty)?);
        }
        PlanCommand::Dump => {
            println!("{}", to_json(&plan, config.output.pretty)?);
        }
    }

    Ok(())
}
