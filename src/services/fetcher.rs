use crate::config::FetcherConfig;
use crate::error::{Result, WikiPlexError};
use crate::types::RawAnswer;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that provides comprehensive information about topics. \
Format your response in markdown with clear section headers starting with # for main sections. \
For each major claim or fact, provide a citation in the format [citation needed]. \
At the end of your response, provide a list of suggested citations that could support the claims made.";

/// Anything that can turn a search term into a raw answer.
#[async_trait]
pub trait AnswerSource: Send + Sync {
    async fn fetch(&self, term: &str) -> Result<RawAnswer>;

    fn name(&self) -> &'static str;
}

/// Calls the external chat-completion endpoint once per search term.
#[derive(Debug, Clone)]
pub struct AnswerFetcher {
    config: FetcherConfig,
    client: reqwest::Client,
}

impl AnswerFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub fn build_request(&self, term: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt(term),
                },
            ],
            max_tokens: self.config.max_tokens,
            return_images: true,
            temperature: 0.0,
            search_recency_filter: "month".to_string(),
            search_domain_filter: vec!["-wikipedia.org".to_string()],
        }
    }
}

#[async_trait]
impl AnswerSource for AnswerFetcher {
    async fn fetch(&self, term: &str) -> Result<RawAnswer> {
        let term = term.trim();
        if term.is_empty() {
            return Err(WikiPlexError::MissingSearchTerm);
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| WikiPlexError::Configuration {
                reason: "API key not configured".to_string(),
            })?;

        info!("Requesting answer for '{}' from {}", term, self.config.endpoint);

        let response = self
            .client
            .post(self.config.endpoint.clone())
            .bearer_auth(api_key)
            .json(&self.build_request(term))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Answer service error ({}): {}", status, body);
            return Err(WikiPlexError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let answer = completion.into_raw_answer()?;

        debug!(
            "Received {} bytes of answer text (image: {})",
            answer.text.len(),
            answer.image_url.is_some()
        );

        Ok(answer)
    }

    fn name(&self) -> &'static str {
        "answer-service"
    }
}

fn user_prompt(term: &str) -> String {
    format!(
        "Provide detailed information about {}. Include sections with headers for: Overview, History, \
Key Features or Characteristics, and Significance or Impact. Format in markdown with # headers. \
Include citations for major claims.",
        term
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub return_images: bool,
    pub temperature: f32,
    pub search_recency_filter: String,
    pub search_domain_filter: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    images: Vec<ImageRef>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageRef {
    Url(String),
    Object { image_url: String },
}

impl ImageRef {
    fn into_url(self) -> String {
        match self {
            ImageRef::Url(url) => url,
            ImageRef::Object { image_url } => image_url,
        }
    }
}

impl ChatCompletionResponse {
    fn into_raw_answer(self) -> Result<RawAnswer> {
        let text = self
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| WikiPlexError::UnexpectedResponse {
                reason: "missing choices[0].message.content".to_string(),
            })?;

        let image_url = self.images.into_iter().next().map(ImageRef::into_url);

        Ok(RawAnswer { text, image_url })
    }
}
