mod import;
mod sheet;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopsync-cli")]
#[command(about = "Create or update Shopify products from a spreadsheet")]
struct Cli {
    /// Spreadsheet to import (.xlsx, .xls, .xlsb, .ods); only the first sheet is read
    #[arg(env = "SHOPSYNC_IMPORT_FILE")]
    file: PathBuf,

    /// Map and print every row without calling the Admin API
    #[arg(long)]
    dry_run: bool,

    /// Process only the first N data rows
    #[arg(long)]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = shopsync_core::load_app_config_from_env().context("invalid configuration")?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::debug!(?config, "configuration loaded");

    import::run_import_command(&config, &cli.file, cli.dry_run, cli.limit).await
}
