pub mod migrate;
pub mod serve;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use fitctl_server::FitctlConfig;

/// Options shared by every command that touches the database
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Config file (default: ~/.fitctl/config.toml if present)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Database URL (overrides config and DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,
}

impl StoreArgs {
    /// Resolve configuration: file, then environment, then these flags.
    pub fn load_config(&self) -> Result<FitctlConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let mut config = FitctlConfig::from_file(path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?;
                config.apply_env().context("Invalid environment override")?;
                config
            }
            None => FitctlConfig::load().context("Failed to load configuration")?,
        };

        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }
        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
        Ok(config)
    }
}
