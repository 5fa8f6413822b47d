use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wikiplex::config::{DEFAULT_BIND, DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

#[derive(Parser)]
#[command(name = "wikiplex")]
#[command(about = "Encyclopedia-style articles generated from an AI answer service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server
    Serve(ServeArgs),

    /// Fetch and print the article for a search term
    Search(SearchArgs),

    /// Parse a saved answer-service response
    Parse(ParseArgs),

    /// Print the slug and display title for a search term
    Slug(SlugArgs),
}

/// Answer service connection options shared by `serve` and `search`.
#[derive(Args)]
pub struct AnswerServiceArgs {
    /// API key for the answer service
    #[arg(long, env = "PERPLEXITY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat-completion endpoint of the answer service
    #[arg(long, env = "WIKIPLEX_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Model requested from the answer service
    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Maximum tokens in the answer
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(short, long, env = "WIKIPLEX_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Base URL of a WikiPlex API used by the result pages
    #[arg(long, env = "WIKIPLEX_API_BASE_URL", value_name = "URL")]
    pub api_base_url: Option<String>,

    #[command(flatten)]
    pub service: AnswerServiceArgs,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search term
    #[arg(required = true, value_name = "TERM")]
    pub term: Vec<String>,

    /// Print the article as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write the article as JSON to a file
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,

    #[command(flatten)]
    pub service: AnswerServiceArgs,
}

#[derive(Args)]
pub struct ParseArgs {
    /// File holding the raw answer text
    #[arg(required = true, value_name = "FILE")]
    pub file: PathBuf,

    /// Print the parsed sections and citations as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SlugArgs {
    /// Free text to normalize
    #[arg(required = true, value_name = "TEXT")]
    pub text: Vec<String>,
}
