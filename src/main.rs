use std::path::PathBuf;
use std::sync::Arc;

use adboard::backend::{StoreError, SupabaseClient};
use adboard::config::{AppConfig, ConfigError};
use adboard::import::{ImportError, import_listing};
use adboard::state::AppState;
use clap::Parser;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("backend client: {0}")]
    Backend(#[from] StoreError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

#[derive(Parser, Debug)]
#[command(name = "adboard-import", about = "Validate and publish an advertisement listing file")]
struct Cli {
    /// Listing JSON file.
    listing: PathBuf,

    /// Validate the listing without contacting the backend.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    if cli.dry_run {
        import_listing(None, &cli.listing, true).await?;
        println!("{}: valid", cli.listing.display());
        return Ok(());
    }

    let config = AppConfig::from_env()?;
    let client = SupabaseClient::new(&config)?;
    tracing::info!(backend = %config.backend_url, bucket = %config.image_bucket, "backend client initialized");
    let state = AppState::new(Arc::new(client));

    if let Some(id) = import_listing(Some(&state), &cli.listing, false).await? {
        println!("{id}");
    }
    Ok(())
}
