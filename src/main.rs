//! route-annotate CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!   annotate.toml
//!       │
//!       ▼
//!   ┌─────────┐    ┌──────────────┐    ┌──────────────────────┐
//!   │ config  │───▶│   routing    │───▶│     annotations      │
//!   │ loader  │    │ flat / stack │    │ store + find_all     │
//!   └─────────┘    └──────────────┘    └──────────┬───────────┘
//!       ▲                                         │
//!       │ watcher                    ┌────────────┴────────────┐
//!       │                            ▼                         ▼
//!   file change                 `query` (stdout)        `serve` (admin API)
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use route_annotate::admin::AdminServer;
use route_annotate::annotations::predicate::parse_value;
use route_annotate::config::{load_config, watcher::ConfigWatcher, AnnotateConfig};
use route_annotate::lifecycle::{signals::wait_for_signal, Shutdown};
use route_annotate::observability::{logging, metrics};
use route_annotate::{Annotated, Criterion, Query};

#[derive(Parser)]
#[command(name = "route-annotate")]
#[command(about = "Annotate routes and query them by annotation", long_about = None)]
struct Cli {
    /// Configuration file.
    #[arg(short, long, default_value = "annotate.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and print a summary
    Check,
    /// Print routes matching annotation criteria as JSON
    Query {
        /// Annotation name that must be present
        #[arg(long = "has", value_name = "NAME")]
        has: Vec<String>,

        /// Annotation that must equal a value (JSON or plain string)
        #[arg(long = "eq", value_name = "KEY=VALUE", value_parser = parse_pair)]
        eq: Vec<(String, String)>,
    },
    /// Serve the admin API, reloading on config changes
    Serve,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", raw))
}

/// `--has` names become presence checks, `--eq` pairs equality checks.
fn build_query(has: Vec<String>, eq: &[(String, String)]) -> Query {
    has.into_iter()
        .map(Criterion::Has)
        .chain(eq.iter().map(|(key, value)| Criterion::equals(key.as_str(), parse_value(value))))
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    logging::init_logging(&config.observability.log_filter);
    tracing::debug!(path = ?cli.config, "Configuration loaded");

    match cli.command {
        Commands::Check => {
            let index = Annotated::from_config(&config)?;
            println!(
                "{}: {} routes, {} annotated paths",
                cli.config.display(),
                index.host().len(),
                index.annotations().len()
            );
        }
        Commands::Query { has, eq } => {
            let index = Annotated::from_config(&config)?;
            let found = index.find_all(build_query(has, &eq));
            println!("{}", serde_json::to_string_pretty(&found)?);
        }
        Commands::Serve => serve(&cli.config, config).await?,
    }

    Ok(())
}

async fn serve(path: &Path, config: AnnotateConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("route-annotate v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let index = Annotated::from_config(&config)?;
    tracing::info!(
        routes = index.host().len(),
        annotated_paths = index.annotations().len(),
        "Annotations loaded"
    );

    let (watcher, config_updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;

    let listener = TcpListener::bind(&config.admin.bind_address).await?;
    let server = AdminServer::new(index, config.admin.api_key.clone());

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal(&shutdown).await;
    });

    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
