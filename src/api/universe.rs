//! Universe listing endpoint.

use crate::types::UNIVERSES;
use crate::AppState;
use axum::{routing::get, Json, Router};

async fn list_universes() -> Json<Vec<&'static str>> {
    Json(UNIVERSES.to_vec())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/universe", get(list_universes))
}
