//! # WikiPlex
//!
//! Encyclopedia-style articles generated from an AI answer service.
//! A search term is sent to the answer service, the markdown-flavored reply is
//! split into titled sections and citations, and the result is rendered as an
//! article page.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use wikiplex::{AnswerFetcher, AnswerSource, ArticleParser, FetcherConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FetcherConfig::new(
//!         std::env::var("PERPLEXITY_API_KEY").ok(),
//!         wikiplex::config::DEFAULT_ENDPOINT,
//!     )?;
//!     let fetcher = AnswerFetcher::new(config)?;
//!
//!     let answer = fetcher.fetch("Quantum computing").await?;
//!     let parsed = ArticleParser::default().parse(&answer.text);
//!
//!     for section in &parsed.sections {
//!         println!("#{} {}", section.id, section.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod services;
pub mod types;
pub mod web;

// Re-export main types and services for easier usage
pub use config::{FetcherConfig, ServerConfig};
pub use error::{Result, WikiPlexError};
pub use services::{
    display_title, load_article, slugify, AnswerFetcher, AnswerSource, ArticleBuilder,
    ArticleParser, SearchApiClient,
};
pub use types::{
    Article, CitationEntry, NavigationEntry, ParsedArticle, ParsingStats, QuickFact, RawAnswer,
    SearchApiResponse, Section,
};
pub use web::{create_app, AppState};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
