//! Signal API endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::types::{SignalPayload, SignalsResponse};
use crate::AppState;

/// Query parameters for the batch signals endpoint.
#[derive(Debug, Deserialize)]
pub struct SignalsQuery {
    /// Reporting date, normally `YYYY-MM-DD`. Defaults to today.
    pub date: Option<String>,
}

/// Create the signals router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/signals", get(list_signals))
        .route("/api/signals/:symbol", get(get_signal))
}

/// Resolve the `as_of` label reported with a batch.
///
/// ISO dates are normalized; any other non-empty value is echoed back
/// unchanged. Without a value the label is today's local date.
pub fn resolve_as_of(date: Option<&str>) -> String {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(|d| d.to_string())
            .unwrap_or_else(|_| date.to_string()),
        None => chrono::Local::now().date_naive().to_string(),
    }
}

/// Signals for every configured symbol.
async fn list_signals(
    State(state): State<AppState>,
    Query(query): Query<SignalsQuery>,
) -> Json<SignalsResponse> {
    let as_of = resolve_as_of(query.date.as_deref());
    let signals = state.signals.compute_signals(&state.config.symbols).await;
    Json(SignalsResponse::new(&signals, as_of))
}

/// Signal for a single symbol.
async fn get_signal(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Json<SignalPayload> {
    let signal = state.signals.compute_signal(&symbol).await;
    Json(signal.to_payload())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_as_of_explicit() {
        assert_eq!(resolve_as_of(Some("2024-03-01")), "2024-03-01");
        assert_eq!(resolve_as_of(Some(" 2024-03-01 ")), "2024-03-01");
    }

    #[test]
    fn test_resolve_as_of_defaults_to_today() {
        let today = chrono::Local::now().date_naive().to_string();
        assert_eq!(resolve_as_of(None), today);
        assert_eq!(resolve_as_of(Some("")), today);
    }

    #[test]
    fn test_resolve_as_of_echoes_other_values() {
        assert_eq!(resolve_as_of(Some("03/01/2024")), "03/01/2024");
        assert_eq!(resolve_as_of(Some("2024-02-30")), "2024-02-30");
    }
}
