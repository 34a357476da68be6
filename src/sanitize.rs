//! Markup stripping for API-supplied snippet text.
//!
//! Trail text from the content API is an HTML fragment (`<strong>`, `<a>`,
//! entities). Cards display it as plain text, so it is reduced here.
//!
//! Two strategies are available:
//! - **Parser**: the fragment is parsed with `scraper` and its rendered
//!   text is collected, which also decodes entities such as `&amp;`.
//! - **Bracket scan** ([`strip_tags`]): each `<...>` span is cut out by
//!   scanning for brackets. Used when the `markup-parser` feature is off or
//!   the parser produced nothing for non-empty input.

use tracing::debug;

/// Reduce a possibly-marked-up string to plain text.
///
/// `None` and `""` both yield an empty string. Never panics.
pub fn sanitize(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    if text.is_empty() {
        return String::new();
    }

    match parse_text(text) {
        Some(plain) => plain,
        None => {
            debug!(len = text.len(), "Markup parser unavailable or empty; using bracket scan");
            strip_tags(text)
        }
    }
}

#[cfg(feature = "markup-parser")]
fn parse_text(text: &str) -> Option<String> {
    use scraper::Html;

    let fragment = Html::parse_fragment(text);
    let plain: String = fragment.root_element().text().collect();
    if plain.is_empty() && !text.trim().is_empty() && !looks_like_markup_only(text) {
        return None;
    }
    Some(plain)
}

#[cfg(not(feature = "markup-parser"))]
fn parse_text(_text: &str) -> Option<String> {
    None
}

/// True when every non-whitespace character sits inside a `<...>` span,
/// i.e. an empty parse result is the correct answer.
#[cfg(feature = "markup-parser")]
fn looks_like_markup_only(text: &str) -> bool {
    strip_tags(text).trim().is_empty()
}

/// Remove `<...>` spans by bracket scanning.
///
/// Repeatedly finds the next `<` and the first `>` after it and cuts the
/// span out. An unmatched `<` stops the scan; the rest is returned as is.
/// Entities are left untouched.
pub fn strip_tags(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            break;
        };
        result.push_str(&rest[..start]);
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}
