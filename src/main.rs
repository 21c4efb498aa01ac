//! Workout plan backend entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use workout_backend::api::{create_router, AppState};
use workout_backend::config::Config;
use workout_backend::generator::PlanGenerator;
use workout_backend::metrics;
use workout_backend::model::{GeminiClient, TextModel};
use workout_backend::utils::shutdown_signal;

/// Workout plan backend.
#[derive(Parser, Debug)]
#[command(name = "workout-backend")]
#[command(about = "HTTP backend that turns fitness queries into AI-generated workout plans")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Run {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("workout_backend=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config().await,
        Some(Command::Run { port }) => cmd_run(port).await,
        None => cmd_run(args.port).await,
    }
}

/// Check configuration validity.
async fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("WORKOUT BACKEND - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!(
        "  API Key: {}",
        if config.has_api_key() {
            "present"
        } else {
            "MISSING (endpoints will report 503)"
        }
    );
    println!("  Model: {}", config.gemini_model);
    println!("  Base URL: {}", config.gemini_base_url);
    println!("  Timeout: {}s", config.http_timeout_secs);
    println!("  Port: {}", config.port);
    println!(
        "  Metrics: {}",
        if config.metrics_enabled {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server.
async fn cmd_run(port_override: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    info!("Loading configuration...");
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    info!("Configuration loaded successfully");
    info!("Model: {}", config.gemini_model);

    // Initialize metrics
    metrics::init_metrics();
    if config.metrics_enabled {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
        match PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .install()
        {
            Ok(()) => info!("Metrics exporter listening on {}", metrics_addr),
            Err(e) => warn!("Failed to install metrics exporter: {}", e),
        }
    }

    // Build the model client. Failure here is non-fatal: the server still
    // starts so the health endpoint can report it.
    let model = init_model(&config);
    let generator = Arc::new(PlanGenerator::new(model));
    let state = AppState::new(generator, config.gemini_model.clone());

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    let router = create_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

/// Construct the Gemini client, once, at startup.
///
/// Returns `None` when the credential is absent or construction fails; the
/// caller treats the model as unavailable rather than crashing.
fn init_model(config: &Config) -> Option<Arc<dyn TextModel>> {
    if !config.has_api_key() {
        error!("GOOGLE_API_KEY environment variable not found; model unavailable");
        return None;
    }

    let api_key = config
        .google_api_key
        .clone()
        .unwrap_or_default();

    match GeminiClient::new(
        api_key,
        config.gemini_model.clone(),
        config.gemini_base_url.clone(),
        Duration::from_secs(config.http_timeout_secs),
    ) {
        Ok(client) => {
            info!("Gemini client initialized for {}", config.gemini_model);
            Some(Arc::new(client))
        }
        Err(e) => {
            error!("Failed to configure Gemini client: {}", e);
            None
        }
    }
}
