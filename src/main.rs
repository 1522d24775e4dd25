#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod cli;
mod config;
mod db;
mod utils;
mod web;

use config::Config;
use web::WebServer;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = Arc::new(Config::load(cli.config.as_deref()).context("failed to load config")?);
    utils::logging::init_tracing(&config.logging);
    info!("items-api starting up");

    let db_manager = db::DatabaseManager::new(&config.database)
        .await
        .context("failed to open database")?;
    db_manager
        .migrate()
        .await
        .context("failed to create items table")?;
    info!("database ready at {}", db_manager.sqlite_path());

    let web_server = WebServer::new(config.clone(), db_manager.item_store());
    web_server.start().await?;

    drop(db_manager);
    info!("items-api shut down");
    Ok(())
}
