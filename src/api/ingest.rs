//! Manual ingestion trigger.

use axum::{extract::State, routing::post, Json, Router};

use crate::types::IngestReport;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/ingest", post(ingest))
}

/// Fetch every configured symbol once and report the outcome.
async fn ingest(State(state): State<AppState>) -> Json<IngestReport> {
    Json(state.signals.ingest(&state.config.symbols).await)
}
