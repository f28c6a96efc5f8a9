//! CLI arguments and runtime configuration.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use axum_extra::extract::cookie::Key;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "folio-server")]
#[command(about = "Minimal file-backed CMS served over HTTP")]
pub struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 3000, env = "FOLIO_PORT")]
    pub port: u16,

    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0", env = "FOLIO_BIND")]
    pub bind: String,

    /// Directory holding the managed documents
    #[arg(long, default_value = "data", env = "FOLIO_DATA_DIR")]
    pub data_dir: PathBuf,

    /// YAML file mapping usernames to password hashes
    #[arg(long, default_value = "users.yml", env = "FOLIO_USERS_FILE")]
    pub users_file: PathBuf,

    /// Cookie signing secret (64+ bytes, hex-encoded)
    /// If not set, a random key is generated at startup (sessions won't survive restarts)
    #[arg(long, env = "FOLIO_COOKIE_SECRET")]
    pub cookie_secret: Option<String>,
}

/// Resolved runtime configuration.
pub struct Config {
    pub data_dir: PathBuf,
    pub users_file: PathBuf,
    pub cookie_key: Key,
}

impl Config {
    /// Resolve configuration from CLI arguments.
    ///
    /// Creates the data directory if it doesn't exist and derives the
    /// cookie signing key from the configured secret.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        std::fs::create_dir_all(&cli.data_dir)
            .with_context(|| format!("Failed to create data directory: {:?}", cli.data_dir))?;

        let cookie_key = match &cli.cookie_secret {
            Some(secret) => {
                let bytes = hex::decode(secret)
                    .context("Cookie secret must be hex-encoded")?;
                Key::try_from(&bytes[..])
                    .map_err(|e| anyhow!("Cookie secret is too short: {e}"))?
            }
            None => {
                tracing::warn!(
                    "No cookie secret configured; sessions will not survive restarts"
                );
                Key::generate()
            }
        };

        Ok(Self {
            data_dir: cli.data_dir.clone(),
            users_file: cli.users_file.clone(),
            cookie_key,
        })
    }
}
