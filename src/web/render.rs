//! Server-side HTML for the search and results pages.
//!
//! Pages are plain strings built with `format!`. Every piece of text that
//! came from the user or the answer service goes through [`html_escape`];
//! section bodies go through [`render_markdown`], which escapes raw HTML
//! and sanitizes the result with ammonia.

use crate::types::{Article, CitationEntry, NavigationEntry, QuickFact, Section};
use chrono::{Datelike, Utc};
use pulldown_cmark::{html, Event, Options, Parser};
use std::collections::HashSet;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch article data. Please try again later.";

const STYLE: &str = r#"
:root { --bg: #ffffff; --fg: #111827; --muted: #6b7280; --border: #e5e7eb; --accent: #2563eb; --card: #f9fafb; }
:root[data-theme="dark"] { --bg: #0b0f17; --fg: #e5e7eb; --muted: #9ca3af; --border: #1f2937; --accent: #60a5fa; --card: #111827; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--fg); min-height: 100vh; display: flex; flex-direction: column; }
a { color: var(--accent); text-decoration: none; }
a:hover { text-decoration: underline; }
header.site { position: sticky; top: 0; display: flex; align-items: center; justify-content: space-between; padding: 0 1.5rem; height: 3.5rem; border-bottom: 1px solid var(--border); background: var(--bg); }
header.site .brand { font-size: 1.25rem; font-weight: 800; color: var(--fg); }
header.site .actions { display: flex; gap: .5rem; }
button { font: inherit; color: var(--fg); background: var(--bg); border: 1px solid var(--border); border-radius: .375rem; padding: .375rem .75rem; cursor: pointer; }
kbd { font-size: .7rem; border: 1px solid var(--border); border-radius: .25rem; padding: 0 .25rem; margin-left: .5rem; color: var(--muted); }
main.page { flex: 1; }
.hero { display: flex; flex-direction: column; align-items: center; justify-content: center; min-height: 70vh; padding: 1rem; }
.hero h1 { font-size: 4.5rem; margin: 0 0 1rem; }
.hero h1 span { color: var(--muted); }
.hero p { font-size: 1.25rem; color: var(--muted); margin: 0 0 3rem; }
form.search { display: flex; gap: .75rem; width: 100%; max-width: 48rem; }
form.search input { flex: 1; font-size: 1.25rem; padding: .75rem 1rem; border: 1px solid var(--border); border-radius: .75rem; background: var(--bg); color: var(--fg); }
.layout { display: flex; gap: 0; }
.layout nav.contents { width: 16rem; flex-shrink: 0; border-right: 1px solid var(--border); padding: 1.5rem 1rem; }
.layout nav.contents h3, .layout aside.overview dt { font-size: .75rem; text-transform: uppercase; letter-spacing: .05em; color: var(--muted); }
.layout nav.contents ul { list-style: none; padding: 0; margin: 0; }
.layout nav.contents li a { display: block; padding: .25rem 0; font-size: .875rem; }
.layout article { flex: 1; padding: 1.5rem 2rem; max-width: 48rem; margin: 0 auto; }
.layout article section { margin-bottom: 2rem; border-bottom: 1px solid var(--border); padding-bottom: 1.5rem; }
.layout aside.overview { width: 18rem; flex-shrink: 0; border-left: 1px solid var(--border); padding: 1.5rem 1rem; }
.layout aside.overview .card { background: var(--card); border: 1px solid var(--border); border-radius: .5rem; padding: 1rem; }
.layout aside.overview img { width: 100%; height: auto; border-radius: .5rem; margin-bottom: 1rem; }
.layout aside.overview dd { margin: .25rem 0 .75rem; font-size: .875rem; }
sup.citation button { border: none; padding: 0; font-size: .75rem; color: var(--accent); background: none; }
.citation-popover { max-width: 20rem; padding: 1rem; border: 1px solid var(--border); border-radius: .5rem; background: var(--bg); color: var(--fg); font-size: .875rem; }
dialog.search-dialog { border: 1px solid var(--border); border-radius: .75rem; background: var(--bg); color: var(--fg); width: min(36rem, 90vw); }
.error { text-align: center; padding: 4rem 1rem; }
footer.site { padding: 1rem; text-align: center; font-size: .875rem; color: var(--muted); border-top: 1px solid var(--border); }
@media (max-width: 1024px) { .layout nav.contents, .layout aside.overview { display: none; } }
"#;

// Theme and dialog state live only in the browser.
const SCRIPT: &str = r#"
(function () {
  var root = document.documentElement;
  var stored = localStorage.getItem("wikiplex-theme");
  var prefersDark = window.matchMedia && window.matchMedia("(prefers-color-scheme: dark)").matches;
  root.dataset.theme = stored || (prefersDark ? "dark" : "light");
  document.addEventListener("DOMContentLoaded", function () {
    var dialog = document.getElementById("search-dialog");
    document.getElementById("open-search").addEventListener("click", function () { dialog.showModal(); });
    document.getElementById("toggle-theme").addEventListener("click", function () {
      root.dataset.theme = root.dataset.theme === "dark" ? "light" : "dark";
      localStorage.setItem("wikiplex-theme", root.dataset.theme);
    });
    document.addEventListener("keydown", function (e) {
      if ((e.metaKey || e.ctrlKey) && e.key === "k") { e.preventDefault(); dialog.showModal(); }
    });
  });
})();
"#;

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const LINK_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Render a section body as markdown. Raw HTML in the body is shown as text
/// and links or images outside `LINK_SCHEMES` lose their URL.
pub fn render_markdown(content: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(content, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, events);

    ammonia::Builder::default()
        .url_schemes(HashSet::from(LINK_SCHEMES))
        .clean(&html_output)
        .to_string()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="Search and explore, get knowledge">
<style>{STYLE}</style>
<script>{SCRIPT}</script>
</head>
<body>
<header class="site">
  <a class="brand" href="/">WikiPlex</a>
  <div class="actions">
    <button type="button" id="open-search">Search...<kbd>Ctrl K</kbd></button>
    <button type="button" id="toggle-theme" aria-label="Toggle theme">Theme</button>
  </div>
</header>
<dialog class="search-dialog" id="search-dialog">
  <form class="search" action="/search" method="get">
    <input type="search" name="q" placeholder="Search WikiPlex..." required autofocus>
  </form>
</dialog>
<main class="page">
{body}
</main>
<footer class="site">&copy; {year} WikiPlex</footer>
</body>
</html>
"#,
        title = html_escape(title),
        year = Utc::now().year(),
    )
}

pub fn render_search_page() -> String {
    let body = r#"<div class="hero">
  <h1>Wiki<span>Plex</span></h1>
  <p>Your gateway to endless knowledge exploration</p>
  <form class="search" action="/search" method="get">
    <input type="search" name="q" placeholder="What do you want to learn about?" required>
    <button type="submit">Search</button>
  </form>
</div>"#;
    layout("WikiPlex", body)
}

pub fn render_article_page(article: &Article) -> String {
    let sections: String = article
        .sections
        .iter()
        .enumerate()
        .map(|(index, section)| render_section(section, index, article.citation_for(index)))
        .collect();

    let body = format!(
        r#"<div class="layout">
<nav class="contents">
<h3>Contents</h3>
{navigation}
</nav>
<article>
<h1>{title}</h1>
{sections}
</article>
{overview}
</div>"#,
        navigation = render_navigation(&article.navigation),
        title = html_escape(&article.title),
        overview = render_overview(article),
    );

    layout(&format!("{} - WikiPlex", article.title), &body)
}

pub fn render_error_page() -> String {
    let body = format!(
        r#"<div class="error">
<h1>Error</h1>
<p>{}</p>
</div>"#,
        FETCH_FAILED_MESSAGE
    );
    layout("Error - WikiPlex", &body)
}

pub fn render_not_found_page() -> String {
    let body = r#"<div class="error">
<h1>Not found</h1>
<p>There is no article at this address. Try searching instead.</p>
</div>"#;
    layout("Not found - WikiPlex", body)
}

fn render_navigation(entries: &[NavigationEntry]) -> String {
    let items: String = entries
        .iter()
        .map(|entry| {
            format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                html_escape(&entry.href),
                html_escape(&entry.title)
            )
        })
        .collect();
    format!("<ul>\n{}</ul>", items)
}

fn render_section(section: &Section, index: usize, citation: Option<&CitationEntry>) -> String {
    let marker = citation
        .map(|c| render_citation(c, index))
        .unwrap_or_default();

    format!(
        "<section id=\"{id}\">\n<h2>{title}</h2>\n<div class=\"prose\">{body}</div>{marker}\n</section>\n",
        id = html_escape(&section.id),
        title = html_escape(&section.title),
        body = render_markdown(&section.body),
    )
}

// Popover ids use the section position, since section ids may repeat.
fn render_citation(citation: &CitationEntry, index: usize) -> String {
    format!(
        "<sup class=\"citation\"><button type=\"button\" popovertarget=\"citation-{index}\">[{id}]</button></sup>\
<div popover id=\"citation-{index}\" class=\"citation-popover\">{content}</div>",
        index = index,
        id = html_escape(&citation.id),
        content = html_escape(&citation.content),
    )
}

fn render_overview(article: &Article) -> String {
    let image = article
        .image_url
        .as_deref()
        .map(|src| {
            format!(
                "<img src=\"{}\" alt=\"{}\">\n",
                html_escape(src),
                html_escape(&article.title)
            )
        })
        .unwrap_or_default();

    format!(
        "<aside class=\"overview\">\n<div class=\"card\">\n{image}<dl>\n{facts}</dl>\n</div>\n</aside>",
        facts = render_quick_facts(&article.quick_facts),
    )
}

fn render_quick_facts(facts: &[QuickFact]) -> String {
    facts
        .iter()
        .map(|fact| {
            format!(
                "<dt>{}</dt><dd>{}</dd>\n",
                html_escape(&fact.label),
                html_escape(&fact.value)
            )
        })
        .collect()
}
