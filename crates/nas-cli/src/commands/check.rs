//! Check command implementation

use colored::Colorize;
use nas_core::DriftStatus;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Run the check command
///
/// Fails with [`CliError::Drift`] when any dataset is missing or drifted.
pub async fn run_check(ctx: &Context, json: bool) -> Result<()> {
    let manifest = ctx.manifest()?;
    let engine = ctx.engine(manifest.engine);

    let mut reports = Vec::with_capacity(manifest.datasets.len());
    for desired in &manifest.datasets {
        reports.push(engine.check(desired, None).await?);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            match report.status {
                DriftStatus::Healthy => {
                    println!("  {} {}", "ok".green(), report.id);
                }
                DriftStatus::Missing => {
                    println!("  {} {}", "missing".red(), report.id.cyan());
                }
                DriftStatus::Drifted => {
                    println!("  {} {}", "drifted".yellow(), report.id.cyan());
                    for item in &report.drifted {
                        println!("      {}", item.describe());
                    }
                }
            }
        }
    }

    let count = reports.iter().filter(|r| !r.is_healthy()).count();
    if count > 0 {
        return Err(CliError::Drift { count });
    }
    if !json {
        println!();
        println!("{}", "All datasets in sync".green().bold());
    }
    Ok(())
}
