use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod render;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::search_page))
        .route("/search", get(handlers::search_redirect))
        .route("/results/:slug", get(handlers::result_page))
        .route("/api/search", post(handlers::api_search))
        .route("/api/parse", post(handlers::api_parse))
        .route("/healthz", get(handlers::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
