use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::info;

use loadboard::api::LoadboardApi;
use loadboard::conf::Config;
use loadboard::core::{CliArgs, setup_logging};
use loadboard::source::MemoryLoadSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    let args = CliArgs::parse();
    let config = Config::load(args.config.as_deref()).context("loading configuration")?;
    info!(args = args; "Loadboard starting.");

    let catalog = Arc::new(config.statuses.clone());
    let source = MemoryLoadSource::from_config(&config)
        .await
        .context("seeding load source")?;

    let api = LoadboardApi::new(Arc::new(source), catalog);
    api.serve(&config.server.addr()).await?;
    Ok(())
}
