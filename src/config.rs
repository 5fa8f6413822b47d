use crate::error::{Result, WikiPlexError};
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.1-sonar-small-128k-online";
pub const DEFAULT_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Settings for the outbound call to the answer service.
#[derive(Clone)]
pub struct FetcherConfig {
    pub api_key: Option<String>,
    pub endpoint: Url,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl std::fmt::Debug for FetcherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetcherConfig")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl FetcherConfig {
    pub fn new(api_key: Option<String>, endpoint: &str) -> Result<Self> {
        let endpoint = parse_http_url(endpoint)?;
        // Blank keys from the environment count as missing.
        let api_key = api_key.filter(|key| !key.trim().is_empty());

        Ok(Self {
            api_key,
            endpoint,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub fetcher: FetcherConfig,
    /// When set, result pages go through `POST {base}/api/search` instead of
    /// calling the answer service in-process.
    pub api_base_url: Option<Url>,
}

impl ServerConfig {
    pub fn new(bind: &str, fetcher: FetcherConfig, api_base_url: Option<&str>) -> Result<Self> {
        let bind = bind.parse().map_err(|e| WikiPlexError::Configuration {
            reason: format!("Invalid bind address '{}': {}", bind, e),
        })?;
        let api_base_url = api_base_url
            .filter(|url| !url.trim().is_empty())
            .map(parse_http_url)
            .transpose()?;

        Ok(Self {
            bind,
            fetcher,
            api_base_url,
        })
    }
}

pub(crate) fn parse_http_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(WikiPlexError::Configuration {
            reason: format!("Unsupported URL scheme '{}' in {}", scheme, raw),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_config_defaults() {
        let config = FetcherConfig::new(Some("key".to_string()), DEFAULT_ENDPOINT).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, 4000);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key.as_deref(), Some("key"));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = FetcherConfig::new(Some("   ".to_string()), DEFAULT_ENDPOINT).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = FetcherConfig::new(Some("secret-key".to_string()), DEFAULT_ENDPOINT).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            FetcherConfig::new(None, "not a url"),
            Err(WikiPlexError::InvalidUrl(_))
        ));
        assert!(matches!(
            FetcherConfig::new(None, "ftp://example.com/x"),
            Err(WikiPlexError::Configuration { .. })
        ));
    }

    #[test]
    fn test_server_config() {
        let config = ServerConfig::new("0.0.0.0:8080", FetcherConfig::default(), Some("")).unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert!(config.api_base_url.is_none());

        let config = ServerConfig::new(
            DEFAULT_BIND,
            FetcherConfig::default(),
            Some("http://localhost:4000"),
        )
        .unwrap();
        assert_eq!(config.api_base_url.unwrap().as_str(), "http://localhost:4000/");

        assert!(ServerConfig::new("nope", FetcherConfig::default(), None).is_err());
    }
}
