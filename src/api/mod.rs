pub mod cors;
pub mod health;
pub mod ingest;
pub mod signals;
pub mod universe;

use crate::error::AppError;
use crate::AppState;
use axum::{http::Uri, middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(universe::router())
        .merge(signals::router())
        .merge(ingest::router())
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Full application: routes, 404 fallback, CORS and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(router())
        .fallback(not_found)
        .layer(middleware::from_fn(cors::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
