mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{AnswerServiceArgs, Cli, Commands, ParseArgs, SearchArgs, ServeArgs, SlugArgs};
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use wikiplex::{
    create_app, display_title, load_article, slugify, AnswerFetcher, AppState, Article,
    ArticleParser, FetcherConfig, ServerConfig, WikiPlexError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match &cli.command {
        Commands::Serve(args) => handle_serve_command(args).await,
        Commands::Search(args) => handle_search_command(args).await,
        Commands::Parse(args) => handle_parse_command(args).await,
        Commands::Slug(args) => handle_slug_command(args),
    };

    if let Err(e) = result {
        error!("Operation failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn fetcher_config(args: &AnswerServiceArgs) -> anyhow::Result<FetcherConfig> {
    let config = FetcherConfig::new(args.api_key.clone(), &args.endpoint)
        .context("Invalid answer service endpoint")?
        .with_model(args.model.clone())
        .with_max_tokens(args.max_tokens)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    Ok(config)
}

async fn handle_serve_command(args: &ServeArgs) -> anyhow::Result<()> {
    let fetcher = fetcher_config(&args.service)?;
    if fetcher.api_key.is_none() {
        warn!("No API key configured; searches will fail until PERPLEXITY_API_KEY is set");
    }

    let config = ServerConfig::new(&args.bind, fetcher, args.api_base_url.as_deref())?;
    let state = AppState::from_config(&config).context("Failed to build application state")?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    info!("WikiPlex listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn handle_search_command(args: &SearchArgs) -> anyhow::Result<()> {
    let term = args.term.join(" ");
    let slug = slugify(&term);
    if slug.is_empty() {
        return Err(WikiPlexError::MissingSearchTerm.into());
    }

    let fetcher = AnswerFetcher::new(fetcher_config(&args.service)?)?;
    let parser = ArticleParser::default();

    info!("Searching for '{}'", term);
    let article = load_article(&fetcher, &parser, &slug).await?;

    let json = serde_json::to_string_pretty(&article).context("Failed to serialize article")?;

    if args.json {
        println!("{}", json);
    } else {
        print_article(&article);
    }

    if let Some(json_path) = &args.json_output {
        tokio::fs::write(json_path, &json)
            .await
            .context("Failed to write JSON article file")?;
        info!("Article written to: {}", json_path.display());
    }

    Ok(())
}

async fn handle_parse_command(args: &ParseArgs) -> anyhow::Result<()> {
    info!("Reading file: {}", args.file.display());

    let content = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let parser = ArticleParser::default();
    let parsed = parser.parse(&content);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    let stats = parser.get_parsing_stats(&parsed);

    println!("\n=== Parsed '{}' ===", args.file.display());
    for (idx, section) in parsed.sections.iter().enumerate() {
        let citation = parsed
            .citations
            .get(idx)
            .map(|c| format!(" [{}]", c.id))
            .unwrap_or_default();
        println!(
            "  {}. {} (#{}, {} chars){}",
            idx + 1,
            section.title,
            section.id,
            section.body.chars().count(),
            citation
        );
    }

    println!("\nCitations:");
    for citation in &parsed.citations {
        println!("  [{}] {}", citation.id, citation.content);
    }

    if stats.duplicate_section_ids > 0 {
        warn!(
            "{} section ids occur more than once",
            stats.duplicate_section_ids
        );
    }
    println!(
        "\nSections without citation: {}",
        stats.sections_without_citation
    );

    Ok(())
}

fn handle_slug_command(args: &SlugArgs) -> anyhow::Result<()> {
    let slug = slugify(&args.text.join(" "));
    println!("slug:  {}", slug);
    println!("title: {}", display_title(&slug));
    Ok(())
}

fn print_article(article: &Article) {
    println!("\n=== {} ===", article.title);
    for fact in &article.quick_facts {
        println!("{}: {}", fact.label, fact.value);
    }
    if let Some(image) = &article.image_url {
        println!("Image: {}", image);
    }

    for (idx, section) in article.sections.iter().enumerate() {
        let marker = article
            .citation_for(idx)
            .map(|c| format!(" [{}]", c.id))
            .unwrap_or_default();
        println!("\n## {}{}\n", section.title, marker);
        println!("{}", section.body);
    }

    println!("\nCitations:");
    for citation in &article.citations {
        println!("  [{}] {}", citation.id, citation.content);
    }
}
