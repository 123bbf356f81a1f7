use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::extract::FromRef;
use clap::{Parser, Subcommand};
use directories_next::ProjectDirs;

mod commands;
mod config;
mod controllers;
mod error;
mod ids;
mod lifecycle;
mod store;
mod types;

use config::{Config, StoreKind};
pub(crate) use error::ApiResult;
use store::memory::MemoryStore;
use store::sql::SqlStore;
use store::AnyStore;

/// Paste sharing with self-destructing links.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the paste server.
    Serve,
    /// Delete pastes whose time or view budget has closed.
    PurgeExpired,
}

#[derive(Clone, FromRef)]
pub struct App {
    pub config: Config,
    pub store: AnyStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    let store = match config.store.kind {
        StoreKind::Database => SqlStore::connect(&config.store.database.url)
            .await
            .context("failed to connect to database")?
            .into(),
        StoreKind::Memory => MemoryStore::new().into(),
    };

    let app = App { config, store };

    match cli.command {
        Command::Serve => commands::serve::run(app).await,
        Command::PurgeExpired => commands::purge_expired::run(app).await,
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path.to_owned(),
        None => default_config_path().context("could not determine a config path")?,
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;

    toml::from_str(&raw).context("failed to deserialize config")
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("config.toml");
    if local.exists() {
        return Some(local);
    }

    ProjectDirs::from("", "", "vanishbin").map(|dirs| dirs.config_dir().join("config.toml"))
}
