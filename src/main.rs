//! MusicMatch-RS: music search autocomplete backed by Last.fm
//!
//! This is the main entry point for the application.

use anyhow::Result;
use musicmatch_rs::{
    config,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let Some(config_arg) = parse_args()? else {
        return Ok(());
    };

    // Load configuration
    let path = config::locate(config_arg.as_deref());
    let settings = config::load(path.as_deref())?;

    // Initialize logging
    let default_level = if settings.general.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting MusicMatch-RS v{}", musicmatch_rs::VERSION);
    match path {
        Some(ref path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    // Create application state
    let state = AppState::new(settings.clone(), client)?;
    info!(
        "Autocomplete backend: {} ({} local candidates)",
        state.backend.name(),
        state.local.candidates().len()
    );

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Parse command line arguments.
///
/// Returns `None` when the process should exit (help or version printed),
/// otherwise the optional settings path.
fn parse_args() -> Result<Option<Option<PathBuf>>> {
    let mut config_path = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} requires a file argument", arg))?;
                config_path = Some(PathBuf::from(value));
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("musicmatch-rs {}", musicmatch_rs::VERSION);
                return Ok(None);
            }
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    Ok(Some(config_path))
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
MusicMatch-RS v{}
Music search autocomplete backed by Last.fm

USAGE:
    musicmatch-rs [OPTIONS]

OPTIONS:
    -c, --config <FILE>    Path to configuration file
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    MUSICMATCH_SETTINGS_PATH         Path to settings.yml
    MUSICMATCH_DEBUG                 Enable debug logging (true/false)
    MUSICMATCH_PORT                  Server port
    MUSICMATCH_BIND_ADDRESS          Bind address
    MUSICMATCH_AUTOCOMPLETE_BACKEND  Home view backend (local, lastfm)
    LASTFM_API_KEY                   Last.fm API key
    LASTFM_BASE_URL                  Last.fm API endpoint
    RUST_LOG                         Log filter, overrides MUSICMATCH_DEBUG
"#,
        musicmatch_rs::VERSION
    );
}
