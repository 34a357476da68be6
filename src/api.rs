//! Guardian content API client.
//!
//! This module builds search URLs from a [`Query`], performs the request and
//! unpacks the `{ response: { results } }` envelope.
//!
//! # Architecture
//!
//! - [`ArticleSource`]: Core trait defining an async article fetch
//! - [`GuardianClient`]: `reqwest`-backed implementation against the content API
//!
//! # Request Policy
//!
//! One attempt per call. There is no retry, no backoff and no client-side
//! timeout; failures are returned as [`NewsError`] for the caller to log.

use crate::models::{Article, Query, SearchEnvelope};
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::fmt;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Default search endpoint of the content API.
pub const DEFAULT_ENDPOINT: &str = "https://content.guardianapis.com/search";

/// Number of results requested per query.
pub const PAGE_SIZE: u32 = 20;

/// Optional fields requested alongside each result.
const SHOW_FIELDS: &str = "thumbnail,trailText";

/// Failures of a single fetch.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("invalid endpoint url: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("api returned http {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can answer a [`Query`] with a list of articles.
pub trait ArticleSource {
    /// Fetch the articles matching `query`.
    ///
    /// # Arguments
    ///
    /// * `query` - A section listing or a free-text search
    ///
    /// # Returns
    ///
    /// The results in the order the source ranked them. A response without
    /// a results array yields `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// Any [`NewsError`]; callers treat every failure as "no results".
    async fn fetch(&self, query: &Query) -> Result<Vec<Article>, NewsError>;
}

/// Client for the Guardian content API search endpoint.
#[derive(Clone)]
pub struct GuardianClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl fmt::Debug for GuardianClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardianClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GuardianClient {
    /// Create a client for `endpoint` authenticating with `api_key`.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Absolute URL of the search endpoint, usually [`DEFAULT_ENDPOINT`]
    /// * `api_key` - Key sent as the `api-key` query parameter
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::InvalidEndpoint`] if `endpoint` is not an absolute URL.
    pub fn new(endpoint: &str, api_key: impl Into<String>) -> Result<Self, NewsError> {
        Ok(Self {
            http: Client::new(),
            endpoint: Url::parse(endpoint)?,
            api_key: api_key.into(),
        })
    }

    /// Build the request URL for `query`.
    ///
    /// # Arguments
    ///
    /// * `query` - Section or search to request
    ///
    /// # Returns
    ///
    /// The endpoint with `api-key`, `show-fields`, `page-size` and either
    /// `section` or `q` set. Search text is percent-encoded (spaces become
    /// `%20`) and replaces the `section` parameter entirely.
    pub fn request_url(&self, query: &Query) -> Url {
        let mut params = format!(
            "api-key={}&show-fields={}&page-size={}",
            urlencoding::encode(&self.api_key),
            SHOW_FIELDS,
            PAGE_SIZE
        );
        match query {
            Query::Search(text) => {
                params.push_str("&q=");
                params.push_str(&urlencoding::encode(text));
            }
            Query::Section(category) => {
                params.push_str("&section=");
                params.push_str(category.id());
            }
        }

        let mut url = self.endpoint.clone();
        url.set_query(Some(&params));
        url
    }
}

impl ArticleSource for GuardianClient {
    #[instrument(level = "info", skip_all, fields(%query))]
    async fn fetch(&self, query: &Query) -> Result<Vec<Article>, NewsError> {
        let t0 = Instant::now();
        let url = self.request_url(query);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(
                %status,
                elapsed_ms = t0.elapsed().as_millis(),
                body = %truncate_for_log(&body, 300),
                "Content API rejected request"
            );
            return Err(NewsError::Status { status, body });
        }

        let envelope: SearchEnvelope = serde_json::from_str(&body)?;
        if let Some(response) = &envelope.response {
            if response.status.as_deref() == Some("error") {
                warn!(message = ?response.message, "Content API reported an error status");
            }
            debug!(total = ?response.total, "Search matched");
        }

        let articles = envelope.into_articles();
        info!(
            count = articles.len(),
            elapsed_ms = t0.elapsed().as_millis(),
            "Fetched articles"
        );
        Ok(articles)
    }
}
