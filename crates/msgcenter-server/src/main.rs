//! Message center API server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use msgcenter_core::{
    InMemoryMessageRepository, MessageRepository, MessageService, SqliteMessageRepository,
    fixtures,
};
use msgcenter_server::{ServerConfig, StorageConfig, router};

#[derive(Debug, Parser)]
#[command(name = "msgcenter-server", version, about = "Message center JSON API")]
struct Cli {
    /// Configuration file (JSON).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, e.g. 127.0.0.1:3001.
    #[arg(long)]
    listen: Option<String>,

    /// Storage backend.
    #[arg(long, value_enum)]
    storage: Option<StorageKind>,

    /// `SQLite` database file; implies `--storage sqlite`.
    #[arg(long)]
    database: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StorageKind {
    Memory,
    Sqlite,
}

impl Cli {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(listen) = self.listen {
            config.listen = listen;
        }
        match (self.storage, self.database) {
            (Some(StorageKind::Memory), _) => config.storage = StorageConfig::Memory,
            (_, Some(path)) => config.storage = StorageConfig::Sqlite { path },
            (Some(StorageKind::Sqlite), None) => {
                if !matches!(config.storage, StorageConfig::Sqlite { .. }) {
                    config.storage = StorageConfig::default_sqlite();
                }
            }
            (None, None) => {}
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ServerConfig::resolve(cli.config.as_deref())?;
    let config = cli.apply(config);
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &config.storage {
        StorageConfig::Memory => {
            let repo = InMemoryMessageRepository::new();
            fixtures::seed(&repo).await?;
            info!("Using in-memory storage");
            serve(repo, &config).await
        }
        StorageConfig::Sqlite { path } => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            let database = path.to_string_lossy();
            let repo = SqliteMessageRepository::new(&database).await?;
            if repo.count().await? == 0 {
                let seeded = fixtures::seed(&repo).await?;
                info!("Seeded {} messages into {}", seeded, path.display());
            }
            info!("Using SQLite storage at {}", path.display());
            serve(repo, &config).await
        }
    }
}

async fn serve<R: MessageRepository>(repo: R, config: &ServerConfig) -> anyhow::Result<()> {
    let service = Arc::new(MessageService::new(repo, fixtures::directory()));
    let app = router(service, &config.api_prefix);

    let listener = TcpListener::bind(&config.listen)
        .await
        .with_context(|| format!("binding {}", config.listen))?;
    info!(
        "Message Center API running on http://{}{}",
        listener.local_addr()?,
        config.api_prefix
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
