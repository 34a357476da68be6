//! Runtime configuration.
//!
//! Settings are resolved from three layers, highest precedence first:
//! 1. CLI flags (and their environment variables, see [`Cli`])
//! 2. An optional YAML config file
//! 3. Built-in defaults
//!
//! The API key has no built-in default; running without one is an error.
//!
//! # Config file
//!
//! ```yaml
//! api_key: your-key
//! endpoint: https://content.guardianapis.com/search
//! default_category: technology
//! html_output: /var/www/news/index.html
//! json_output_dir: /var/www/news/json
//! ```

use crate::api::DEFAULT_ENDPOINT;
use crate::cli::Cli;
use crate::models::Category;
use serde::Deserialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

/// Default path of the rendered page.
pub const DEFAULT_HTML_OUTPUT: &str = "news.html";

/// Contents of the optional YAML config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub default_category: Option<Category>,
    pub html_output: Option<PathBuf>,
    pub json_output_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key configured (use --api-key, GUARDIAN_API_KEY, or api_key in the config file)")]
    MissingApiKey,
}

/// Fully resolved settings.
pub struct Settings {
    pub api_key: String,
    pub endpoint: String,
    pub category: Category,
    pub search: Option<String>,
    pub html_output: PathBuf,
    pub json_output_dir: Option<PathBuf>,
    pub interactive: bool,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("category", &self.category)
            .field("search", &self.search)
            .field("html_output", &self.html_output)
            .field("json_output_dir", &self.json_output_dir)
            .field("interactive", &self.interactive)
            .finish()
    }
}

/// Read and parse a YAML config file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_file(path: &Path) -> Result<FileConfig, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)?;
    let config: FileConfig = serde_yaml::from_str(&raw)?;
    info!("Loaded configuration");
    Ok(config)
}

impl Settings {
    /// Merge CLI arguments over the file config and defaults.
    pub fn resolve(cli: Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let api_key = cli
            .api_key
            .or(file.api_key)
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            endpoint: cli
                .endpoint
                .or(file.endpoint)
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            category: cli.category.or(file.default_category).unwrap_or_default(),
            search: cli.search.filter(|s| !s.trim().is_empty()),
            html_output: cli
                .html_output
                .or(file.html_output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HTML_OUTPUT)),
            json_output_dir: cli.json_output_dir.or(file.json_output_dir),
            interactive: cli.interactive,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["workplace_news"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Settings::resolve(cli(&["--api-key", "k"]), FileConfig::default()).unwrap();
        assert_eq!(settings.api_key, "k");
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.category, Category::World);
        assert_eq!(settings.html_output, PathBuf::from(DEFAULT_HTML_OUTPUT));
        assert_eq!(settings.json_output_dir, None);
        assert_eq!(settings.search, None);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = FileConfig {
            api_key: Some("file-key".to_string()),
            endpoint: Some("http://file/search".to_string()),
            default_category: Some(Category::Culture),
            html_output: Some(PathBuf::from("file.html")),
            json_output_dir: Some(PathBuf::from("file-json")),
        };
        let settings = Settings::resolve(
            cli(&["--api-key", "cli-key", "-c", "sport", "-o", "cli.html"]),
            file,
        )
        .unwrap();
        assert_eq!(settings.api_key, "cli-key");
        assert_eq!(settings.endpoint, "http://file/search");
        assert_eq!(settings.category, Category::Sport);
        assert_eq!(settings.html_output, PathBuf::from("cli.html"));
        assert_eq!(settings.json_output_dir, Some(PathBuf::from("file-json")));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let err = Settings::resolve(cli(&["--api-key", "  "]), FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let settings =
            Settings::resolve(cli(&["--api-key", "k", "-s", "   "]), FileConfig::default()).unwrap();
        assert_eq!(settings.search, None);
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings =
            Settings::resolve(cli(&["--api-key", "secret-key"]), FileConfig::default()).unwrap();
        assert!(!format!("{settings:?}").contains("secret-key"));
    }

    #[test]
    fn test_file_config_from_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(
            &path,
            "api_key: abc\ndefault_category: science\njson_output_dir: /tmp/json\n",
        )
        .unwrap();

        let file = load_file(&path).unwrap();
        assert_eq!(file.api_key.as_deref(), Some("abc"));
        assert_eq!(file.default_category, Some(Category::Science));
        assert_eq!(file.json_output_dir, Some(PathBuf::from("/tmp/json")));
        assert_eq!(file.endpoint, None);
    }

    #[test]
    fn test_file_config_rejects_unknown_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "apikey: typo\n").unwrap();
        assert!(load_file(&path).is_err());
    }
}
