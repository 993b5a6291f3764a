//! HTTP server command for the fitctl records API

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use fitctl_server::db::{create_pool_with_options, migrations};
use fitctl_server::{run_server, FitctlConfig, ServerConfig};

use super::StoreArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:5000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution.
    /// `--cors-permissive=false` overrides a config file that enables it
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub cors_permissive: Option<bool>,

    /// Answer "member not found" when no member has the looked-up name.
    /// `--distinct-lookup-errors=false` restores the conflated answer
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub distinct_lookup_errors: Option<bool>,

    #[command(flatten)]
    pub store: StoreArgs,
}

impl ServeArgs {
    /// Flags given on the command line win over file and environment.
    fn apply_overrides(&self, config: &mut FitctlConfig) {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(permissive) = self.cors_permissive {
            config.cors_permissive = permissive;
        }
        if let Some(distinct) = self.distinct_lookup_errors {
            config.distinct_lookup_errors = distinct;
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = args.store.load_config()?;
    args.apply_overrides(&mut config);

    tracing::info!("Starting fitctl server on {}", config.bind_addr);

    let pool = create_pool_with_options(&config.database_url, config.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    // Run server (blocks until shutdown)
    run_server(pool, ServerConfig::from(&config))
        .await
        .context("Server error")?;

    Ok(())
}
