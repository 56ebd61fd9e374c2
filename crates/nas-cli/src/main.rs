//! nasctl
//!
//! The command-line interface for reconciling NAS datasets against a
//! manifest, backed by the file-based emulated store.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    if let Err(e) = nas_core::logging::init_with_default(filter) {
        eprintln!("{}: logging disabled: {}", "warning".yellow(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let ctx = Context::new(&cli.manifest, &cli.state);
    execute_command(&ctx, cli.command).await
}

async fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Plan { json } => commands::run_plan(ctx, json).await,
        Commands::Apply => commands::run_apply(ctx).await,
        Commands::Show { id } => commands::run_show(ctx, &id).await,
        Commands::Destroy { id } => commands::run_destroy(ctx, &id).await,
        Commands::Check { json } => commands::run_check(ctx, json).await,
    }
}
