use crate::services::{load_article, slugify};
use crate::types::{ParsedArticle, SearchApiResponse};
use crate::web::error::ApiError;
use crate::web::render;
use crate::web::AppState;
use crate::error::WikiPlexError;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn search_page() -> Html<String> {
    Html(render::render_search_page())
}

/// GET /search?q=... - normalize the term and go to its results page.
pub async fn search_redirect(Query(query): Query<SearchQuery>) -> Redirect {
    let slug = slugify(&query.q);
    if slug.is_empty() {
        debug!("Empty search term, back to the search page");
        return Redirect::to("/");
    }
    Redirect::to(&format!("/results/{}", slug))
}

/// GET /results/:slug
pub async fn result_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let canonical = slugify(&slug);
    if canonical.is_empty() {
        return (StatusCode::NOT_FOUND, Html(render::render_not_found_page())).into_response();
    }
    if canonical != slug {
        return Redirect::permanent(&format!("/results/{}", canonical)).into_response();
    }

    match load_article(state.pages.as_ref(), &state.parser, &canonical).await {
        Ok(article) => {
            info!(
                "Rendered '{}' with {} sections",
                article.slug,
                article.sections.len()
            );
            Html(render::render_article_page(&article)).into_response()
        }
        Err(e) => {
            warn!("Results page for '{}' degraded: {}", canonical, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render::render_error_page()),
            )
                .into_response()
        }
    }
}

/// POST /api/search
///
/// # Request
/// - `searchTerm`: free-text topic (required)
///
/// # Response
/// - `content`: raw markdown answer text
/// - `citations`: always empty; citations are parsed out of `content`
/// - `imageUrl`: optional image for the topic
///
/// # Errors
/// - 400: body is not JSON, or `searchTerm` missing, blank or not a string
/// - 500: credential missing or the answer service failed
pub async fn api_search(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SearchApiResponse>, ApiError> {
    let Json(body) = payload?;
    let term = match body.get("searchTerm") {
        Some(Value::String(term)) => term.as_str(),
        _ => return Err(WikiPlexError::MissingSearchTerm.into()),
    };

    debug!("Search request: {:?}", term);

    let answer = state.answers.fetch(term).await?;
    Ok(Json(answer.into()))
}

/// POST /api/parse - run the article parser over `content`.
pub async fn api_parse(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ParsedArticle>, ApiError> {
    let Json(body) = payload?;
    let content = body.get("content").unwrap_or(&Value::Null);
    let parsed = state.parser.parse_value(content)?;
    Ok(Json(parsed))
}

pub async fn healthz() -> &'static str {
    "ok"
}
