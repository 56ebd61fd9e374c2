//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// nasctl - Reconcile NAS datasets against a declarative manifest
#[derive(Parser, Debug)]
#[command(name = "nasctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Dataset manifest (TOML)
    #[arg(long, global = true, env = "NASCTL_MANIFEST", default_value = "datasets.toml")]
    pub manifest: PathBuf,

    /// Appliance state file used by the emulated store
    #[arg(long, global = true, env = "NASCTL_STATE", default_value = "state.json")]
    pub state: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show what apply would do for every manifest dataset
    Plan {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Create or replace datasets until they match the manifest
    ///
    /// Datasets are processed in manifest order, so declare parents before
    /// their children. Drift on mutable properties is reported, not
    /// corrected.
    Apply,

    /// Print the reconciled state of one dataset as JSON
    Show {
        /// Dataset identity, e.g. tank/apps/db
        id: String,
    },

    /// Destroy one dataset (its children must be destroyed first)
    Destroy {
        /// Dataset identity, e.g. tank/apps/db
        id: String,
    },

    /// Compare remote state with the manifest; exits non-zero on drift
    Check {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
