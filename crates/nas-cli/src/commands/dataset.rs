//! Single-dataset commands: show and destroy

use colored::Colorize;

use crate::context::Context;
use crate::error::Result;

/// Run the show command
pub async fn run_show(ctx: &Context, id: &str) -> Result<()> {
    let engine = ctx.engine(ctx.engine_config()?);
    let state = engine.read(id).await?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

/// Run the destroy command
pub async fn run_destroy(ctx: &Context, id: &str) -> Result<()> {
    let engine = ctx.engine(ctx.engine_config()?);
    engine.delete(id).await?;
    println!("{} {}", "Destroyed".red().bold(), id.cyan());
    Ok(())
}
