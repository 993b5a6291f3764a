//! Create the database schema and exit

use anyhow::{Context, Result};
use clap::Parser;

use fitctl_server::db::{create_pool_with_options, migrations};

use super::StoreArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let config = args.store.load_config()?;

    let pool = create_pool_with_options(&config.database_url, config.max_connections)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    pool.close().await;
    println!("Schema ready at {}", config.database_url);
    Ok(())
}
