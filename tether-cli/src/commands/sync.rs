//! `tether sync`: run mirror and portal entries against the working tree.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use tether_core::config;
use tether_core::types::{SyncOptions, SyncStatus};

use crate::commands::rel;

/// Arguments for `tether sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Show what would change without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Like --dry-run, but exit non-zero when anything would change.
    #[arg(long)]
    pub check: bool,

    /// Only print errors.
    #[arg(long, short)]
    pub quiet: bool,

    /// Explicit config file path (skips the upward search).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let cwd = std::env::current_dir().context("could not determine working directory")?;
        let loaded = config::load_at(&cwd, self.config.as_deref())
            .context("could not load tether config")?;
        let opts = SyncOptions {
            dry_run: self.dry_run,
            check: self.check,
        };

        // Mirrors run first so portal markers inside freshly mirrored files
        // are picked up in the same invocation.
        let mut records = tether_mirrors::sync_mirrors_at(&cwd, &loaded.config, opts);
        records.extend(tether_portals::sync_portals_at(&cwd, &loaded.config, opts));

        let prefix = if opts.no_write() { "[dry-run] " } else { "" };
        let mut changed = 0usize;
        let mut unchanged = 0usize;
        let mut errored = 0usize;

        for record in &records {
            match &record.status {
                SyncStatus::Updated => {
                    changed += 1;
                    if !self.quiet {
                        println!("{prefix}{} {}", "synced".green(), rel(&cwd, &record.target));
                    }
                }
                SyncStatus::Unchanged => unchanged += 1,
                SyncStatus::Error { detail } => {
                    errored += 1;
                    eprintln!("{} {}: {detail}", "error:".red(), rel(&cwd, &record.target));
                }
            }
        }

        if errored > 0 {
            bail!("{errored} target(s) failed");
        }
        if self.check && changed > 0 {
            bail!("{changed} target(s) out of sync");
        }
        if !self.quiet {
            if changed == 0 {
                println!("{} nothing to do ({unchanged} unchanged)", "✓".green());
            } else {
                println!("{prefix}{} {changed} synced, {unchanged} unchanged", "✓".green());
            }
        }
        Ok(())
    }
}
