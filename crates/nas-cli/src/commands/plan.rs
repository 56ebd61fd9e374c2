//! Plan command implementation

use colored::Colorize;
use nas_core::{Plan, PlanAction, plan};

use crate::context::Context;
use crate::error::Result;

/// Run the plan command
pub async fn run_plan(ctx: &Context, json: bool) -> Result<()> {
    let manifest = ctx.manifest()?;
    let engine = ctx.engine(manifest.engine);

    let mut plans = Vec::with_capacity(manifest.datasets.len());
    for desired in &manifest.datasets {
        let id = desired.identity()?.to_string();
        let current = engine.lookup(&id).await?;
        let planned = plan(desired, current.as_ref())
            .map_err(|source| nas_core::Error::InvalidConfiguration { id, source })?;
        plans.push(planned);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&plans)?);
        return Ok(());
    }

    if plans.is_empty() {
        println!("{}", "No datasets declared in the manifest".dimmed());
        return Ok(());
    }

    for planned in &plans {
        print_plan(planned);
    }
    println!();
    println!("{}", summary(&plans).bold());

    Ok(())
}

fn print_plan(planned: &Plan) {
    match &planned.action {
        PlanAction::Create => {
            println!("  {} {} {}", "+".green(), planned.id.cyan(), "(create)".dimmed());
        }
        PlanAction::Replace { reasons } => {
            println!("  {} {} {}", "-/+".red(), planned.id.cyan(), "(replace)".dimmed());
            for reason in reasons {
                println!("      {}", reason);
            }
        }
        PlanAction::Update { drift } => {
            println!(
                "  {} {} {}",
                "~".yellow(),
                planned.id.cyan(),
                "(drift is reported, not corrected)".dimmed()
            );
            for item in drift {
                println!("      {}", item.describe());
            }
        }
        PlanAction::NoChange => {
            println!("  {} {} {}", "=".dimmed(), planned.id, "(no change)".dimmed());
        }
    }
}

fn summary(plans: &[Plan]) -> String {
    let count = |f: fn(&PlanAction) -> bool| plans.iter().filter(|p| f(&p.action)).count();
    format!(
        "Plan: {} to create, {} to replace, {} drifted, {} unchanged",
        count(|a| matches!(a, PlanAction::Create)),
        count(|a| matches!(a, PlanAction::Replace { .. })),
        count(|a| matches!(a, PlanAction::Update { .. })),
        count(|a| matches!(a, PlanAction::NoChange)),
    )
}
