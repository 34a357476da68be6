//! JSON export of the displayed listing.
//!
//! # Output Structure
//!
//! Files are organized by date, named after the query:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── section-world.json
//!     └── search-climate-change-8c1f0a2b.json
//! ```
//!
//! Search stems carry a short digest of the raw search text, so queries
//! that slugify alike (`C++` and `C`) land in different files. A later
//! export for the same query on the same day replaces the earlier one.

use crate::models::{Listing, Query};
use crate::state::ViewState;
use crate::utils::{slugify_title, truncate_on_char_boundary};
use chrono::Local;
use sha2::{Digest, Sha256};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Longest slug kept in a search file name, in bytes.
const MAX_SLUG_BYTES: usize = 80;

/// Slug used when the search text has no alphanumeric characters.
const FALLBACK_SLUG: &str = "query";

/// File stem for the export of `query`.
///
/// # Arguments
///
/// * `query` - The query whose results are exported
///
/// # Returns
///
/// `section-<id>` for section listings. For searches,
/// `search-<slug>-<digest>`, where the slug is capped at 80 bytes and the
/// digest is the first 8 hex characters of the SHA-256 of the raw text.
pub fn listing_file_stem(query: &Query) -> String {
    match query {
        Query::Section(category) => format!("section-{}", category.id()),
        Query::Search(text) => {
            let slug = slugify_title(text);
            let slug = truncate_on_char_boundary(&slug, MAX_SLUG_BYTES).trim_matches('-');
            let slug = if slug.is_empty() { FALLBACK_SLUG } else { slug };
            let digest = format!("{:x}", Sha256::digest(text.as_bytes()));
            format!("search-{}-{}", slug, &digest[..8])
        }
    }
}

/// Write the articles currently shown by `state` as JSON.
///
/// # Arguments
///
/// * `state` - The view whose displayed listing is exported
/// * `json_output_dir` - Base directory for JSON output
///
/// # Returns
///
/// The written path, or `None` when no fetch has settled yet.
///
/// # Output Path
///
/// `{json_output_dir}/{local_date}/{stem}.json`, see [`listing_file_stem`].
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.display()))]
pub async fn write_listing(
    state: &ViewState,
    json_output_dir: &Path,
) -> Result<Option<PathBuf>, Box<dyn Error>> {
    let Some(query) = state.shown_query() else {
        return Ok(None);
    };

    let now = Local::now();
    let listing = Listing {
        local_date: now.date_naive().to_string(),
        local_time: now.time().format("%H:%M:%S").to_string(),
        query,
        articles: state.articles(),
    };
    let json = serde_json::to_string_pretty(&listing)?;

    let full_json_dir = json_output_dir.join(&listing.local_date);
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(dir = %full_json_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = full_json_dir.join(format!("{}.json", listing_file_stem(query)));
    fs::write(&path, json).await?;
    info!(path = %path.display(), articles = listing.articles.len(), "Wrote JSON listing");
    Ok(Some(path))
}
