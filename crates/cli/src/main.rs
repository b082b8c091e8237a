//! ShopHub - an interactive terminal storefront.
//!
//! One run of the shell is one UI session: the cart lives in memory for the
//! lifetime of the process, while accounts and the login session persist in
//! the data directory across runs.
//!
//! # Usage
//!
//! ```bash
//! # Browse the default catalog, persisting state under .shophub/
//! shophub
//!
//! # Point at a different catalog and profile directory
//! shophub --catalog-url http://localhost:8080 --data-dir /tmp/profile
//!
//! # Leave nothing on disk
//! shophub --ephemeral
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
// The terminal is the UI surface of this binary.
#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use url::Url;

use shophub_storefront::config::StorefrontConfig;
use shophub_storefront::state::AppState;
use shophub_storefront::storage::{FileStore, KeyValueStore, MemoryStore};

mod shell;

#[derive(Parser)]
#[command(name = "shophub")]
#[command(author, version, about = "ShopHub interactive storefront")]
struct Cli {
    /// Directory for persistent state (accounts, login session)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Base URL of the product catalog API
    #[arg(long)]
    catalog_url: Option<Url>,

    /// Keep all state in memory; nothing survives the session
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Default to warnings only so log lines don't interleave with the UI.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shophub=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprint_error(&error);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> shophub_storefront::Result<()> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(url) = cli.catalog_url {
        config.catalog_url = url;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let storage: Box<dyn KeyValueStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::open(config.data_dir.clone())?)
    };

    let state = AppState::new(config, storage)?;
    shell::run(state).await
}

#[allow(clippy::print_stderr)]
fn eprint_error(error: &shophub_storefront::AppError) {
    eprintln!("shophub: {error}");
}
