//! Pageling command line interface.
//!
//! Extracts translatable fragments from an HTML file, runs them through
//! the coordinator, and prints the write-back pairs. Doubles as a smoke
//! test for a provider fleet configuration.

use anyhow::{Context, Result};
use clap::Parser;
use coordinator::{Coordinator, CoordinatorConfig};
use extract::Extractor;
use std::path::PathBuf;
use tokio::sync::broadcast;
use translate::Lang;

/// Translate a page's text fragments through the provider fleet.
#[derive(Debug, Parser)]
#[command(name = "pageling", version, about)]
pub struct Cli {
    /// HTML file to extract fragments from.
    pub input: PathBuf,

    /// Target language code (en, es, de, pt, it).
    #[arg(long, default_value = "es")]
    pub to: String,

    /// Coordinator config file (TOML). Defaults to the built-in fleet.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print per-provider health after the run.
    #[arg(long)]
    pub status: bool,
}

impl Cli {
    /// Run one translation pass.
    pub async fn run(self) -> Result<()> {
        let target: Lang = self.to.parse()?;
        let config = match &self.config {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?
            }
            None => CoordinatorConfig::default(),
        };

        let html = std::fs::read_to_string(&self.input)
            .with_context(|| format!("reading {}", self.input.display()))?;
        let page = Extractor::new().extract(&html);
        if page.is_empty() {
            println!("no translatable fragments found");
            return Ok(());
        }
        tracing::info!("extracted {} fragment(s)", page.len());

        let coordinator = Coordinator::new(config)?;
        let (shutdown, _) = broadcast::channel(1);
        let sweeper = coordinator.start_sweeper(shutdown.subscribe());

        let results = coordinator.change_language(&page, target).await?;
        for (id, text) in &results {
            println!("{}\t{text}", id.0);
        }

        if self.status {
            for status in coordinator.status() {
                let enabled = if status.enabled { "enabled" } else { "disabled" };
                println!("{}: {} [{enabled}]", status.id, status.state);
            }
        }

        let _ = shutdown.send(());
        sweeper.await?;
        Ok(())
    }
}
