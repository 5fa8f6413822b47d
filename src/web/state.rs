use crate::config::ServerConfig;
use crate::error::Result;
use crate::services::{AnswerFetcher, AnswerSource, ArticleParser, SearchApiClient};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    /// Backs `POST /api/search`.
    pub answers: Arc<dyn AnswerSource>,
    /// Backs the results pages; either the same source or the search API client.
    pub pages: Arc<dyn AnswerSource>,
    pub parser: Arc<ArticleParser>,
}

impl AppState {
    pub fn new(answers: Arc<dyn AnswerSource>) -> Self {
        Self {
            pages: answers.clone(),
            answers,
            parser: Arc::new(ArticleParser::default()),
        }
    }

    pub fn with_page_source(mut self, pages: Arc<dyn AnswerSource>) -> Self {
        self.pages = pages;
        self
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let fetcher: Arc<dyn AnswerSource> = Arc::new(AnswerFetcher::new(config.fetcher.clone())?);
        let state = Self::new(fetcher);

        match &config.api_base_url {
            Some(base_url) => {
                let client = SearchApiClient::new(base_url, config.fetcher.timeout)?;
                info!("Result pages will use the search API at {}", client.search_url());
                Ok(state.with_page_source(Arc::new(client)))
            }
            None => Ok(state),
        }
    }
}
