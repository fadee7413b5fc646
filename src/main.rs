//! Elevator snapshot service entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use elevator_snapshot::api::{create_router, load_snapshot, AppState};
use elevator_snapshot::config::Config;
use elevator_snapshot::metrics;
use elevator_snapshot::store::CosmosClient;
use elevator_snapshot::utils::shutdown_signal;

/// Elevator snapshot service.
#[derive(Parser, Debug)]
#[command(name = "elevator-snapshot")]
#[command(about = "Serves elevator and door-grid snapshots read from Cosmos DB")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP port (overrides FUNCTIONS_CUSTOMHANDLER_PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve snapshots over HTTP (default).
    Serve {
        /// HTTP port (overrides FUNCTIONS_CUSTOMHANDLER_PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Fetch one snapshot and print it as JSON.
    Snapshot,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Config errors are reported by the command itself; logging falls back
    // to defaults until then.
    let directive = Config::load()
        .unwrap_or_default()
        .log_directive(args.verbose);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    metrics::init_metrics();

    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port.or(args.port)).await,
        Some(Command::CheckConfig) => cmd_check_config(args.port),
        Some(Command::Snapshot) => cmd_snapshot().await,
        None => cmd_serve(args.port).await,
    }
}

/// Load configuration, apply CLI overrides, and validate.
fn load_config(port_override: Option<u16>) -> anyhow::Result<Config> {
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Some(port) = port_override {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config(port_override: Option<u16>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("ELEVATOR SNAPSHOT - CONFIGURATION CHECK");
    println!("======================================================================");

    let config = load_config(port_override)?;

    let or_unset = |value: &str| {
        if value.is_empty() {
            "<unset>".to_string()
        } else {
            value.to_string()
        }
    };
    println!("  DbUrl: {}", or_unset(&config.db_url));
    println!(
        "  DbKey: {}",
        if config.db_key.is_empty() { "<unset>" } else { "set" }
    );
    println!("  DbName: {}", or_unset(&config.db_name));
    println!("  HTTP Port: {}", config.port);
    println!("  Query Timeout: {}ms", config.db_timeout_ms);
    println!(
        "  Metrics: {}",
        if config.metrics_enabled {
            format!("enabled on port {}", config.metrics_port)
        } else {
            "disabled".to_string()
        }
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Fetch one snapshot and print it.
async fn cmd_snapshot() -> anyhow::Result<()> {
    let config = load_config(None)?;
    let client = CosmosClient::new(&config)?;

    let snapshot = load_snapshot(&client).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}

/// Serve snapshots until shutdown.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let config = load_config(port_override)?;

    info!(
        database = %config.db_name,
        timeout_ms = config.db_timeout_ms,
        "Configuration loaded successfully"
    );

    if config.metrics_enabled {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
        metrics::install_exporter(metrics_addr)?;
        info!("Metrics exporter listening on {}", metrics_addr);
    }

    let client = CosmosClient::new(&config)?;
    let router = create_router(AppState::new(client));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("About to listen on {}. Go to http://127.0.0.1:{}/", addr, config.port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
