use crate::error::Result;
use crate::services::fetcher::AnswerSource;
use crate::services::parser::ArticleParser;
use crate::services::slug::{display_title, slugify};
use crate::types::{Article, NavigationEntry, QuickFact, RawAnswer, Section};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

pub const SOURCE_NAME: &str = "Perplexity AI";

pub struct ArticleBuilder;

impl ArticleBuilder {
    /// Assembles the page model for `slug` from one raw answer.
    pub fn build(slug: &str, raw: &RawAnswer, parser: &ArticleParser, updated: NaiveDate) -> Article {
        let parsed = parser.parse(&raw.text);
        let navigation = Self::navigation(&parsed.sections);

        Article {
            slug: slug.to_string(),
            title: display_title(slug),
            quick_facts: Self::quick_facts(updated),
            navigation,
            sections: parsed.sections,
            citations: parsed.citations,
            image_url: raw.image_url.clone(),
        }
    }

    pub fn navigation(sections: &[Section]) -> Vec<NavigationEntry> {
        sections
            .iter()
            .map(|section| NavigationEntry {
                title: section.title.clone(),
                href: format!("#{}", section.id),
            })
            .collect()
    }

    fn quick_facts(updated: NaiveDate) -> Vec<QuickFact> {
        vec![
            QuickFact {
                label: "Source".to_string(),
                value: SOURCE_NAME.to_string(),
            },
            QuickFact {
                label: "Last updated".to_string(),
                value: updated.format("%Y-%m-%d").to_string(),
            },
        ]
    }
}

/// Fetch, parse and build the article for a results page.
///
/// Every failure comes back as `WikiPlexError::ArticleFetch`.
pub async fn load_article(
    source: &dyn AnswerSource,
    parser: &ArticleParser,
    slug: &str,
) -> Result<Article> {
    let slug = slugify(slug);
    let term = display_title(&slug);

    info!("Loading article '{}' via {}", slug, source.name());

    let raw = source.fetch(&term).await.map_err(|e| {
        warn!("Article fetch for '{}' failed: {}", slug, e);
        e.into_article_fetch()
    })?;

    Ok(ArticleBuilder::build(&slug, &raw, parser, Utc::now().date_naive()))
}
