//! folio-server: a minimal file-backed CMS over HTTP.
//!
//! Documents are plain `.txt` / `.md` files in a configured directory;
//! markdown is rendered to HTML for viewing. Signed-in users (verified
//! against a YAML credential file) can create, edit, and delete documents.

use std::net::SocketAddr;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_core::{CredentialStore, DocumentStore};
use folio_server::AppState;
use folio_server::config::{Cli, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;

    // Fail fast on an unusable credential file rather than at first sign-in.
    let credentials = CredentialStore::new(config.users_file.clone());
    let users = credentials.load()?;
    tracing::info!("Loaded {} user(s) from {:?}", users.len(), config.users_file);

    let state = AppState {
        documents: DocumentStore::new(config.data_dir.clone()),
        credentials,
        cookie_key: config.cookie_key.clone(),
    };

    let app = folio_server::app(state);

    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port).parse()?;

    tracing::info!("Starting folio-server on {}", addr);
    tracing::info!("Serving documents from {:?}", config.data_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("folio-server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
