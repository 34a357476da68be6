//! Command-line interface definitions for Workplace News.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials and the endpoint can also come from environment variables or
//! the YAML config file (see [`crate::config`]).

use crate::models::Category;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Workplace News application.
///
/// # Examples
///
/// ```sh
/// # List the technology section into ./news.html
/// GUARDIAN_API_KEY=... workplace_news -c technology
///
/// # Search instead of listing a section
/// workplace_news --api-key YOUR_KEY -s "climate change" -o /tmp/climate.html
///
/// # Interactive session, also exporting JSON snapshots
/// workplace_news -i -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Section to list on startup
    #[arg(short, long, value_enum)]
    pub category: Option<Category>,

    /// Search text; takes precedence over the category for the first fetch
    #[arg(short, long)]
    pub search: Option<String>,

    /// Guardian content API key
    #[arg(long, env = "GUARDIAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Search endpoint of the content API
    #[arg(long, env = "GUARDIAN_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Optional path to a config.yaml file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path of the rendered HTML page
    #[arg(short = 'o', long)]
    pub html_output: Option<PathBuf>,

    /// Directory for JSON listing snapshots
    #[arg(short, long)]
    pub json_output_dir: Option<PathBuf>,

    /// Read category and search commands from stdin
    #[arg(short, long)]
    pub interactive: bool,
}
