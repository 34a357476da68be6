//! HTML page rendering.
//!
//! Produces one self-contained document from a [`ViewState`]:
//!
//! ```text
//! header   branded title | tab navigation | search form
//! chips    category chip list (shown on narrow screens)
//! main     spinner | article card grid | empty-result advisory
//! footer
//! ```
//!
//! All text that originates from the API or the user is escaped. Trail text
//! is reduced to plain text by [`sanitize`] before escaping.

use crate::models::{Article, Category};
use crate::sanitize::sanitize;
use crate::state::ViewState;
use crate::utils::{escape_html, format_publication_date};
use std::fmt::Write;

/// Image shown on cards whose article has no thumbnail.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x200";

/// Shown when a settled fetch produced no articles.
pub const EMPTY_MESSAGE: &str = "No articles found. Try a different search term or category.";

const BRAND: [(char, &str); 9] = [
    ('W', "blue"),
    ('o', "red"),
    ('r', "yellow"),
    ('k', "blue"),
    ('p', "green"),
    ('l', "red"),
    ('a', "red"),
    ('c', "yellow"),
    ('e', "blue"),
];

const STYLE: &str = r#"
body{margin:0;font-family:system-ui,sans-serif;color:#111827;background:#fff}
.wrap{max-width:80rem;margin:0 auto;padding:0 1rem}
header{position:sticky;top:0;z-index:50;background:#fff;border-bottom:1px solid #e5e7eb}
header .wrap{display:flex;flex-wrap:wrap;align-items:center;justify-content:space-between;min-height:4rem;gap:1rem}
h1{font-size:1.5rem;font-weight:400;margin:0}
.blue{color:#3b82f6}.red{color:#ef4444}.yellow{color:#eab308}.green{color:#22c55e}.muted{color:#374151;margin-left:.5rem}
nav.tabs a{margin-right:1.5rem;font-size:.875rem;color:#4b5563;text-decoration:none;padding-bottom:1rem}
nav.tabs a.active{color:#2563eb;border-bottom:2px solid #2563eb}
form.search{display:flex;gap:.5rem}
form.search input{width:16rem;padding:.5rem .75rem;border:1px solid #d1d5db;border-radius:.375rem}
form.search button{padding:.5rem 1rem;border:0;border-radius:.375rem;background:#2563eb;color:#fff}
.chips{display:none;background:#f9fafb;border-bottom:1px solid #e5e7eb}
.chips .wrap{display:flex;gap:1rem;padding:.75rem 1rem;overflow-x:auto}
.chips a{white-space:nowrap;padding:.25rem .75rem;border-radius:9999px;background:#fff;color:#4b5563;text-decoration:none;font-size:.875rem}
.chips a.active{background:#2563eb;color:#fff}
main{padding:2rem 1rem}
.grid{display:grid;grid-template-columns:repeat(3,1fr);gap:1.5rem}
.card{border:1px solid #e5e7eb;border-radius:.5rem;overflow:hidden;box-shadow:0 1px 2px rgba(0,0,0,.05)}
.card img{width:100%;aspect-ratio:16/9;object-fit:cover;display:block}
.card .body{padding:1rem}
.section{font-size:.75rem;color:#2563eb;background:#eff6ff;padding:.25rem .5rem;border-radius:.25rem}
.date{font-size:.75rem;color:#6b7280;margin-left:.5rem}
.card h2{font-size:1.125rem;margin:.5rem 0;display:-webkit-box;-webkit-line-clamp:2;-webkit-box-orient:vertical;overflow:hidden}
.card h2 a{color:inherit;text-decoration:none}
.trail{font-size:.875rem;color:#4b5563;display:-webkit-box;-webkit-line-clamp:3;-webkit-box-orient:vertical;overflow:hidden}
.more{font-size:.875rem;color:#2563eb;text-decoration:none}
.spinner-box{display:flex;justify-content:center;align-items:center;height:16rem}
.spinner{width:3rem;height:3rem;border-radius:50%;border-bottom:2px solid #2563eb;animation:spin 1s linear infinite}
@keyframes spin{to{transform:rotate(360deg)}}
.empty{text-align:center;padding:3rem 0;color:#6b7280;font-size:1.125rem}
footer{background:#f9fafb;border-top:1px solid #e5e7eb;margin-top:3rem;padding:2rem 0;text-align:center;font-size:.875rem;color:#6b7280}
@media (max-width:1024px){.grid{grid-template-columns:repeat(2,1fr)}}
@media (max-width:768px){.grid{grid-template-columns:1fr}nav.tabs{display:none}.chips{display:block}}
"#;

/// Render the full page for `state`.
pub fn render_page(state: &ViewState) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Workplace News</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    render_header(&mut html, state);
    render_chips(&mut html, state.category());

    html.push_str("<main class=\"wrap\">\n");
    if state.is_loading() {
        html.push_str("<div class=\"spinner-box\"><div class=\"spinner\" role=\"status\" aria-label=\"Loading\"></div></div>\n");
    } else if state.articles().is_empty() {
        let _ = writeln!(html, "<div class=\"empty\"><p>{EMPTY_MESSAGE}</p></div>");
    } else {
        html.push_str("<div class=\"grid\">\n");
        for article in state.articles() {
            render_card(&mut html, article);
        }
        html.push_str("</div>\n");
    }
    html.push_str("</main>\n");

    html.push_str("<footer><p>&copy; 2025 Workplace News</p></footer>\n</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, state: &ViewState) {
    html.push_str("<header>\n<div class=\"wrap\">\n<h1>");
    for (letter, color) in BRAND {
        let _ = write!(html, "<span class=\"{color}\">{letter}</span>");
    }
    html.push_str("<span class=\"muted\">News</span></h1>\n<nav class=\"tabs\">");
    for category in Category::ALL {
        html.push_str(&category_link(category, state.category()));
    }
    html.push_str("</nav>\n");

    let _ = writeln!(
        html,
        "<form class=\"search\" role=\"search\"><input type=\"text\" name=\"q\" placeholder=\"Search news...\" value=\"{}\"><button type=\"submit\">Search</button></form>",
        escape_html(state.search_term())
    );
    html.push_str("</div>\n</header>\n");
}

fn render_chips(html: &mut String, active: Category) {
    html.push_str("<div class=\"chips\"><div class=\"wrap\">");
    for category in Category::ALL {
        html.push_str(&category_link(category, active));
    }
    html.push_str("</div></div>\n");
}

fn category_link(category: Category, active: Category) -> String {
    let class = if category == active { " class=\"active\"" } else { "" };
    format!(
        "<a href=\"?section={}\" data-category=\"{}\"{}>{}</a>",
        category.id(),
        category.id(),
        class,
        category.label()
    )
}

fn render_card(html: &mut String, article: &Article) {
    let title = escape_html(&article.web_title);
    let url = escape_html(&article.web_url);
    let image = article.thumbnail().unwrap_or(PLACEHOLDER_IMAGE);

    html.push_str("<article class=\"card\">\n");
    let _ = writeln!(
        html,
        "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
        escape_html(image),
        title
    );
    html.push_str("<div class=\"body\">\n");
    let _ = writeln!(
        html,
        "<div><span class=\"section\">{}</span><span class=\"date\">{}</span></div>",
        escape_html(&article.section_name),
        format_publication_date(&article.web_publication_date)
    );
    let _ = writeln!(
        html,
        "<h2><a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">{title}</a></h2>"
    );
    if let Some(trail) = article.trail_text() {
        let _ = writeln!(
            html,
            "<p class=\"trail\">{}</p>",
            escape_html(&sanitize(Some(trail)))
        );
    }
    let _ = writeln!(
        html,
        "<a class=\"more\" href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">Read more &rsaquo;</a>"
    );
    html.push_str("</div>\n</article>\n");
}
