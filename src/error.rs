use thiserror::Error;

#[derive(Error, Debug)]
pub enum WikiPlexError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Search term is required")]
    MissingSearchTerm,

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("Upstream service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Unexpected response from answer service: {reason}")]
    UnexpectedResponse { reason: String },

    #[error("Failed to fetch article data: {0}")]
    ArticleFetch(#[source] Box<WikiPlexError>),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl WikiPlexError {
    /// Wraps any failure for the page layer. Already-wrapped errors are kept as is.
    pub fn into_article_fetch(self) -> Self {
        match self {
            WikiPlexError::ArticleFetch(_) => self,
            other => WikiPlexError::ArticleFetch(Box::new(other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, WikiPlexError>;
