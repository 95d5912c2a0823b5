//! Cinema server - plays movie scripts into HipChat rooms.
//!
//! Serves the add-on descriptor, installation callbacks and the command
//! webhook. With `--dry-run` no tokens are requested and every notification
//! is written to the log instead.

use cinema_core::init_tracing;
use cinema_server::{
    Authorizer, Cinema, DryRunAuthorizer, HipChatAuthorizer, ServerConfig, create_router,
};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Command-line arguments for the server.
#[derive(Parser, Debug)]
#[command(name = "cinema-server")]
#[command(about = "Cinema - narrate movie scripts into chat rooms")]
#[command(version)]
struct Args {
    /// Path to server configuration file
    #[arg(short, long, default_value = "cinema.toml")]
    config: PathBuf,

    /// Web server port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Public base URL of the server
    #[arg(long = "base-url", env = "BASE_URL")]
    base_url: Option<String>,

    /// Directory containing one folder per movie
    #[arg(long, env = "CINEMA_MOVIES_DIR")]
    movies_dir: Option<PathBuf>,

    /// Log notifications instead of sending them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    init_tracing()?;

    let args = Args::parse();

    let mut config = if args.config.exists() {
        info!(config_file = ?args.config, "Loading configuration");
        ServerConfig::from_file(&args.config)?
    } else {
        warn!(config_file = ?args.config, "Configuration file not found, using defaults");
        ServerConfig::default()
    };
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(movies_dir) = args.movies_dir {
        config = config.with_movies_dir(movies_dir);
    }
    config.validate()?;

    let authorizer: Arc<dyn Authorizer> = if args.dry_run {
        info!("DRY RUN MODE - notifications are only logged");
        Arc::new(DryRunAuthorizer)
    } else {
        Arc::new(HipChatAuthorizer::new(config.api_base().clone()))
    };

    let cinema = Cinema::new(&config, authorizer);
    let app = create_router(cinema);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", *config.port())).await?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.port(),
        base_url = %config.base_url(),
        movies = config.allowed_movies().len(),
        "Cinema listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received, stopping gracefully...");
        })
        .await?;

    info!("Cinema stopped");
    Ok(())
}
