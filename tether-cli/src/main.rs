//! Tether: marker-based file and fragment synchronization CLI.
//!
//! # Usage
//!
//! ```text
//! tether sync [--dry-run] [--check] [--quiet] [--config <path>]
//! tether list [--config <path>]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{list::ListArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "tether",
    version,
    about = "Keep marked text fragments and mirrored files in sync across a tree",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run every mirror and portal entry from the nearest config.
    Sync(SyncArgs),

    /// List the fragments declared by the config's portal entries.
    List(ListArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::List(args) => args.run(),
    }
}
