//! Apply command implementation

use colored::Colorize;
use nas_core::PlanAction;

use crate::context::Context;
use crate::error::Result;

/// Run the apply command
///
/// Stops at the first dataset that fails; datasets before it stay applied.
pub async fn run_apply(ctx: &Context) -> Result<()> {
    let manifest = ctx.manifest()?;
    let engine = ctx.engine(manifest.engine);

    let mut changed = 0;
    for desired in &manifest.datasets {
        let id = desired.identity()?.to_string();
        let outcome = engine.reconcile(desired, Some(&id)).await?;

        let verb = match &outcome.action {
            PlanAction::Create => {
                changed += 1;
                "created".green()
            }
            PlanAction::Replace { .. } => {
                changed += 1;
                "replaced".red()
            }
            PlanAction::Update { drift } => {
                for item in drift {
                    println!("  {} {}: {}", "!".yellow(), id, item.describe());
                }
                "drifted".yellow()
            }
            PlanAction::NoChange => "unchanged".dimmed(),
        };
        println!("  {} {}", outcome.state.id.cyan(), verb);
    }

    println!();
    println!(
        "{} {} dataset(s) changed, state in {}",
        "Apply complete:".bold(),
        changed,
        ctx.state_path().display()
    );
    Ok(())
}
