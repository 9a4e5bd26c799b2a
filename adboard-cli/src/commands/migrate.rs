//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use adboard_server::db::migrations;

use super::database::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = args.database.connect().await?;
    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;
    pool.close().await;

    println!("advertisement table ready");
    Ok(())
}
