pub mod api_client;
pub mod article;
pub mod fetcher;
pub mod parser;
pub mod slug;

pub use api_client::SearchApiClient;
pub use article::{load_article, ArticleBuilder};
pub use fetcher::{AnswerFetcher, AnswerSource};
pub use parser::ArticleParser;
pub use slug::{display_title, section_id, slugify};
