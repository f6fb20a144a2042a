//! Product Catalog API Server
//!
//! # Usage
//!
//! ```bash
//! # Empty in-memory catalog on 0.0.0.0:8080
//! catalog-server
//!
//! # Seeded catalog on a custom address
//! catalog-server --host 127.0.0.1 --port 9090 --seed catalog.json
//!
//! # Scope listings for every non-super-admin
//! catalog-server --strict-list-scoping
//!
//! # Debug logging
//! RUST_LOG=debug catalog-server
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging level or filter directives
//! - `CATALOG_HOST`: Server host (default: 0.0.0.0)
//! - `CATALOG_PORT`: Server port (default: 8080)
//! - `CATALOG_REQUEST_TIMEOUT`: Request timeout in seconds (default: 30)
//! - `CATALOG_SEED`: Seed file for the in-memory catalog
//! - `DATABASE_URL`: PostgreSQL catalog (`postgres` feature)

use anyhow::{Context, Result};
use catalog_api_server::{AppState, ServerBuilder};
use catalog_authz::{AccessScope, ListScoping};
use catalog_core::{CatalogSeed, InMemoryCatalog};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Product Catalog API Server
#[derive(Parser, Debug)]
#[command(
    name = "catalog-server",
    version,
    about = "REST API server for the multi-tenant product catalog",
    long_about = None
)]
struct Args {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "CATALOG_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short = 'p', long, default_value = "8080", env = "CATALOG_PORT")]
    port: u16,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", env = "CATALOG_REQUEST_TIMEOUT")]
    request_timeout: u64,

    /// Enable JSON logging format
    #[arg(long, env = "CATALOG_JSON_LOGS")]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// JSON file with organizations and products for the in-memory catalog
    #[arg(long, env = "CATALOG_SEED")]
    seed: Option<PathBuf>,

    /// Scope listings to the caller's organization for every non-super-admin
    #[arg(long)]
    strict_list_scoping: bool,

    /// PostgreSQL connection string; replaces the in-memory catalog
    #[cfg(feature = "postgres")]
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

impl Args {
    fn access_scope(&self) -> AccessScope {
        if self.strict_list_scoping {
            AccessScope::with_list_scoping(ListScoping::AllExceptSuperAdmins)
        } else {
            AccessScope::new()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(&args)?;

    info!("Starting Product Catalog API Server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let state = Arc::new(build_state(&args).await?);
    info!(list_scoping = ?state.access.list_scoping(), "Application state initialized");

    let server = ServerBuilder::new()
        .host(&args.host)
        .port(args.port)
        .request_timeout(args.request_timeout)
        .state(state)
        .build()?;

    if let Err(e) = server.run().await {
        error!("Server error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn build_state(args: &Args) -> Result<AppState> {
    let access = args.access_scope();

    #[cfg(feature = "postgres")]
    if let Some(url) = args.database_url.as_deref() {
        let catalog = Arc::new(
            catalog_core::PostgresCatalog::connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?,
        );
        info!("Using PostgreSQL catalog");
        return Ok(AppState::new(catalog.clone(), catalog, access)?);
    }

    let catalog = match &args.seed {
        Some(path) => {
            let seed = CatalogSeed::load(path)
                .await
                .with_context(|| format!("Failed to load seed {}", path.display()))?;
            InMemoryCatalog::from_seed(seed)
                .await
                .context("Failed to seed catalog")?
        }
        None => InMemoryCatalog::new(),
    };
    info!("Using in-memory catalog");

    Ok(AppState::in_memory(Arc::new(catalog), access)?)
}

/// Initialize tracing/logging subsystem
fn init_tracing(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_new(&args.log_level)
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Invalid log filter")?;

    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()?;
    }

    Ok(())
}
