//! Data models for the Guardian content API and the listings built from it.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: A single search result as returned by the content API
//! - [`Category`]: The fixed set of sections a listing can be scoped to
//! - [`Query`]: What a single fetch asks for (search text or a section)
//! - [`SearchEnvelope`]: The nested `{ response: { results } }` wire shape
//! - [`Listing`]: Snapshot of a displayed listing, written as JSON
//!
//! Wire types use `rename_all = "camelCase"` so the Rust fields stay
//! snake_case while matching the API's field names.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A news article as returned by the content API search endpoint.
///
/// Deserialization is lenient: string fields missing from the payload
/// default to empty and unknown fields are ignored, so a partially filled
/// result never fails the whole response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    /// Stable article identifier, e.g. `world/2025/may/06/some-slug`.
    pub id: String,
    /// The headline.
    pub web_title: String,
    /// Public URL of the article on the publisher's site.
    pub web_url: String,
    /// Publication timestamp in RFC 3339 format.
    pub web_publication_date: String,
    /// Human-readable section name, e.g. "World news".
    pub section_name: String,
    /// Optional fields requested through `show-fields`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<ArticleFields>,
}

impl Article {
    /// Thumbnail URL, if the API supplied a non-empty one.
    pub fn thumbnail(&self) -> Option<&str> {
        self.fields
            .as_ref()
            .and_then(|f| f.thumbnail.as_deref())
            .filter(|t| !t.trim().is_empty())
    }

    /// Raw trail text (may contain markup), if present and non-empty.
    pub fn trail_text(&self) -> Option<&str> {
        self.fields
            .as_ref()
            .and_then(|f| f.trail_text.as_deref())
            .filter(|t| !t.is_empty())
    }
}

/// Optional article fields selected with `show-fields=thumbnail,trailText`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_text: Option<String>,
}

/// Top-level shape of a search response: `{ "response": { ... } }`.
///
/// Both levels are optional so that an error payload or an unexpected
/// document decodes to "no results" instead of failing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchEnvelope {
    pub response: Option<SearchResponse>,
}

/// Inner search response body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResponse {
    /// `"ok"` on success, `"error"` when the API rejected the request.
    pub status: Option<String>,
    /// Error message accompanying an `"error"` status.
    pub message: Option<String>,
    /// Total number of matches across all pages.
    pub total: Option<u64>,
    pub results: Option<Vec<Article>>,
}

impl SearchEnvelope {
    /// Consume the envelope and return its results, or an empty list if
    /// either the `response` object or its `results` array is absent.
    pub fn into_articles(self) -> Vec<Article> {
        self.response
            .and_then(|r| r.results)
            .unwrap_or_default()
    }
}

/// A news section a listing can be scoped to.
///
/// The identifier doubles as the API's `section` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    World,
    Technology,
    Business,
    Sport,
    Culture,
    Science,
}

impl Category {
    /// All categories in navigation order.
    pub const ALL: [Category; 6] = [
        Category::World,
        Category::Technology,
        Category::Business,
        Category::Sport,
        Category::Culture,
        Category::Science,
    ];

    /// Stable identifier used in request URLs and commands.
    pub fn id(self) -> &'static str {
        match self {
            Category::World => "world",
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Sport => "sport",
            Category::Culture => "culture",
            Category::Science => "science",
        }
    }

    /// Display label shown in navigation.
    pub fn label(self) -> &'static str {
        match self {
            Category::World => "World",
            Category::Technology => "Technology",
            Category::Business => "Business",
            Category::Sport => "Sports",
            Category::Culture => "Culture",
            Category::Science => "Science",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| {
                let known = Category::ALL.map(Category::id).join(", ");
                format!("unknown category '{s}' (expected one of: {known})")
            })
    }
}

/// What a single fetch asks the API for.
///
/// Search text and section are mutually exclusive per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Query {
    Search(String),
    Section(Category),
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Search(text) => write!(f, "search \"{text}\""),
            Query::Section(category) => write!(f, "section {category}"),
        }
    }
}

/// Snapshot of one displayed listing, exported as JSON.
#[derive(Debug, Serialize)]
pub struct Listing<'a> {
    /// Local date of the export in `YYYY-MM-DD` format.
    pub local_date: String,
    /// Local time of the export in `HH:MM:SS` format.
    pub local_time: String,
    /// The query that produced the articles.
    pub query: &'a Query,
    pub articles: &'a [Article],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_deserialization() {
        let json = r#"{
            "id": "technology/2025/may/06/chips",
            "type": "article",
            "sectionId": "technology",
            "sectionName": "Technology",
            "webPublicationDate": "2025-05-06T14:30:00Z",
            "webTitle": "Chip makers report record demand",
            "webUrl": "https://www.theguardian.com/technology/2025/may/06/chips",
            "fields": {
                "thumbnail": "https://media.guim.co.uk/thumb.jpg",
                "trailText": "<strong>Demand</strong> keeps rising"
            }
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.section_name, "Technology");
        assert_eq!(article.web_title, "Chip makers report record demand");
        assert_eq!(article.thumbnail(), Some("https://media.guim.co.uk/thumb.jpg"));
        assert_eq!(article.trail_text(), Some("<strong>Demand</strong> keeps rising"));
    }

    #[test]
    fn test_article_missing_fields_are_lenient() {
        let article: Article = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(article.id, "x");
        assert!(article.web_title.is_empty());
        assert_eq!(article.thumbnail(), None);
        assert_eq!(article.trail_text(), None);
    }

    #[test]
    fn test_blank_thumbnail_is_absent() {
        let article = Article {
            fields: Some(ArticleFields {
                thumbnail: Some("  ".to_string()),
                trail_text: None,
            }),
            ..Article::default()
        };
        assert_eq!(article.thumbnail(), None);
    }

    #[test]
    fn test_envelope_without_results_is_empty() {
        let envelope: SearchEnvelope =
            serde_json::from_str(r#"{"response": {"status": "error", "message": "Invalid key"}}"#)
                .unwrap();
        assert!(envelope.into_articles().is_empty());

        let envelope: SearchEnvelope = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert!(envelope.into_articles().is_empty());
    }

    #[test]
    fn test_envelope_with_results() {
        let envelope: SearchEnvelope = serde_json::from_str(
            r#"{"response": {"status": "ok", "total": 2, "results": [{"id": "a"}, {"id": "b"}]}}"#,
        )
        .unwrap();
        let ids: Vec<String> = envelope.into_articles().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_category_ids_and_labels() {
        assert_eq!(Category::default(), Category::World);
        assert_eq!(Category::Sport.id(), "sport");
        assert_eq!(Category::Sport.label(), "Sports");
        assert_eq!("Technology".parse::<Category>(), Ok(Category::Technology));
        assert!("weather".parse::<Category>().is_err());
    }

    #[test]
    fn test_article_serializes_with_api_field_names() {
        let article = Article {
            id: "a".to_string(),
            web_title: "Title".to_string(),
            ..Article::default()
        };
        let json = serde_json::to_string(&article).unwrap();
        assert!(json.contains("\"webTitle\":\"Title\""));
        assert!(!json.contains("fields"));
    }
}
