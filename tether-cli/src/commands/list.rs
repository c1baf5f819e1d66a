//! `tether list`: print every fragment the config's portals declare.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tether_core::config;

use crate::commands::rel;

/// Arguments for `tether list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Explicit config file path (skips the upward search).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let cwd = std::env::current_dir().context("could not determine working directory")?;
        let loaded = config::load_at(&cwd, self.config.as_deref())
            .context("could not load tether config")?;

        let found = tether_portals::discover_fragments_at(&cwd, &loaded.config)
            .context("fragment discovery failed")?;
        for fragment in &found {
            println!("{}:{}", rel(&cwd, &fragment.source), fragment.key);
        }
        Ok(())
    }
}
