use crate::error::{Result, WikiPlexError};
use crate::services::fetcher::AnswerSource;
use crate::types::{RawAnswer, SearchApiResponse};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Page-side client for a WikiPlex instance's `POST /api/search`.
#[derive(Debug, Clone)]
pub struct SearchApiClient {
    search_url: Url,
    client: reqwest::Client,
}

impl SearchApiClient {
    /// The search path is appended to the base path, so `https://host/app`
    /// and `https://host/app/` both resolve to `https://host/app/api/search`.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let search_url = base.join("api/search")?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { search_url, client })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }
}

#[async_trait]
impl AnswerSource for SearchApiClient {
    async fn fetch(&self, term: &str) -> Result<RawAnswer> {
        let term = term.trim();
        if term.is_empty() {
            return Err(WikiPlexError::MissingSearchTerm);
        }

        info!("Fetching '{}' through {}", term, self.search_url);

        let response = self
            .client
            .post(self.search_url.clone())
            .json(&json!({ "searchTerm": term }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Search API returned {}: {}", status, body);
            return Err(WikiPlexError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload: SearchApiResponse = response.json().await?;
        Ok(payload.into())
    }

    fn name(&self) -> &'static str {
        "search-api"
    }
}
