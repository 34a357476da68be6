//! Plain-text rendering of the current listing for the terminal.

use crate::models::Category;
use crate::outputs::html::EMPTY_MESSAGE;
use crate::sanitize::sanitize;
use crate::state::ViewState;
use crate::utils::format_publication_date;
use std::fmt::Write;

/// Render `state` as a terminal listing.
///
/// The first line is the navigation bar with the active category in
/// brackets; the body is a loading line, the empty-result advisory, or one
/// numbered block per article.
pub fn render_listing(state: &ViewState) -> String {
    let mut out = String::new();

    let nav: Vec<String> = Category::ALL
        .into_iter()
        .map(|c| {
            if c == state.category() {
                format!("[{}]", c.label())
            } else {
                c.label().to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "Workplace News  {}", nav.join("  "));
    if !state.search_term().trim().is_empty() {
        let _ = writeln!(out, "Search: {}", state.search_term().trim());
    }
    out.push('\n');

    if state.is_loading() {
        out.push_str("Loading...\n");
        return out;
    }
    if state.articles().is_empty() {
        let _ = writeln!(out, "{EMPTY_MESSAGE}");
        return out;
    }

    for (i, article) in state.articles().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {}\n    {} | {}",
            i + 1,
            article.web_title,
            article.section_name,
            format_publication_date(&article.web_publication_date)
        );
        let trail = sanitize(article.trail_text());
        if !trail.trim().is_empty() {
            let _ = writeln!(out, "    {}", trail.trim());
        }
        let _ = writeln!(out, "    {}\n", article.web_url);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, ArticleFields};

    #[test]
    fn test_listing_marks_active_category() {
        let state = ViewState::new(Category::Culture);
        let out = render_listing(&state);
        assert!(out.starts_with("Workplace News  World  Technology  Business  Sports  [Culture]  Science"));
    }

    #[test]
    fn test_listing_loading_and_empty() {
        let mut state = ViewState::new(Category::World);
        let req = state.mount();
        assert!(render_listing(&state).contains("Loading..."));

        state.complete(req.seq, Ok(vec![]));
        assert!(render_listing(&state).contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_listing_articles() {
        let mut state = ViewState::new(Category::World);
        let req = state.submit_search("tides").unwrap();
        state.complete(
            req.seq,
            Ok(vec![Article {
                id: "a".to_string(),
                web_title: "Tides are turning".to_string(),
                web_url: "https://www.theguardian.com/a".to_string(),
                web_publication_date: "2025-03-09T08:00:00Z".to_string(),
                section_name: "Science".to_string(),
                fields: Some(ArticleFields {
                    thumbnail: None,
                    trail_text: Some("<p>Sea levels</p>".to_string()),
                }),
            }]),
        );

        let out = render_listing(&state);
        assert!(out.contains("Search: tides"));
        assert!(out.contains(" 1. Tides are turning\n    Science | Mar 9, 2025\n    Sea levels\n"));
        assert!(out.contains("https://www.theguardian.com/a"));
    }
}
