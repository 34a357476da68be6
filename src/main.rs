//! # Workplace News
//!
//! Browse the Guardian content API by section or free-text search and render
//! the results as a responsive card grid.
//!
//! ## Usage
//!
//! ```sh
//! GUARDIAN_API_KEY=... workplace_news -c technology -o news.html
//! GUARDIAN_API_KEY=... workplace_news -i
//! ```
//!
//! ## Architecture
//!
//! One linear flow per user action:
//! 1. **Input**: a CLI flag or an interactive command changes the view state
//! 2. **Request**: the view state issues a numbered fetch for the new query
//! 3. **Fetch**: the content API is queried once (no retry)
//! 4. **Render**: the latest result is written as HTML, text, and optionally JSON

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod app;
mod cli;
mod config;
mod models;
mod outputs;
mod sanitize;
mod state;
mod utils;

use api::GuardianClient;
use cli::Cli;
use config::{FileConfig, Settings};
use outputs::OutputTargets;
use state::ViewState;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("workplace_news starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.category, ?args.config, interactive = args.interactive, "Parsed CLI arguments");

    // ---- Load config ----
    let file_config = match &args.config {
        Some(path) => config::load_file(path).inspect_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to load config file");
        })?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(args, file_config).inspect_err(|e| {
        error!(error = %e, "Invalid configuration");
    })?;
    debug!(?settings, "Resolved settings");

    // Early check: ensure the JSON output dir is writable
    if let Some(dir) = &settings.json_output_dir {
        let dir = dir.to_string_lossy();
        if let Err(e) = ensure_writable_dir(&dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let client = GuardianClient::new(&settings.endpoint, settings.api_key.clone())?;
    let targets = OutputTargets {
        html_output: settings.html_output.clone(),
        json_output_dir: settings.json_output_dir.clone(),
    };

    let mut view = ViewState::new(settings.category);
    let initial = match settings.search.as_deref() {
        Some(text) => view.submit_search(text).unwrap_or_else(|| view.mount()),
        None => view.mount(),
    };
    info!(category = %view.category(), query = %initial.query, "Initial fetch");

    let mut stdout = std::io::stdout();
    if settings.interactive {
        let input = tokio::io::BufReader::new(tokio::io::stdin());
        app::run_interactive(&client, &mut view, initial, &targets, input, &mut stdout).await?;
    } else {
        app::run_once(&client, &mut view, initial, &targets, &mut stdout).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = view.articles().len(),
        html_output = %targets.html_output.display(),
        "Execution complete"
    );

    Ok(())
}
