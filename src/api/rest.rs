// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/`. Every failure the client can see is a 404
// with a `{"error": "<reason>"}` body: provider outages are logged here and
// reported to the client exactly like missing data.
//
// CORS is configured permissively; the dashboard may be served from another
// origin.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use crate::api::session::{session_cookie, session_from_headers};
use crate::app_state::AppState;
use crate::assembly::{assemble_chart, assemble_quote, search_symbols};
use crate::error::MarketError;
use crate::provider::MarketDataProvider;
use crate::types::{Quote, Watchlist};

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router<P: MarketDataProvider>(state: Arc<AppState<P>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health::<P>))
        // ── Market data ─────────────────────────────────────────────
        .route("/api/symbol/:symbol", get(symbol_quote::<P>))
        .route("/api/chart/:symbol/:timeframe", get(chart::<P>))
        .route("/api/search", get(search::<P>))
        .route("/api/popular", get(popular::<P>))
        // ── Session watchlists ──────────────────────────────────────
        .route(
            "/api/watchlists",
            get(get_watchlists::<P>).post(save_watchlists::<P>),
        )
        .route("/api/watchlist/:id/data", get(watchlist_data::<P>))
        // ── Middleware & State ──────────────────────────────────────
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Error responses
// =============================================================================

fn error_response(status: StatusCode, message: &'static str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Log a market error at a level matching its severity, then answer 404.
fn market_error_response(err: &MarketError, symbol: &str, message: &'static str) -> Response {
    if err.is_not_found() {
        debug!(symbol, error = %err, "no data");
    } else {
        warn!(symbol, error = %err, "provider failure");
    }
    error_response(StatusCode::NOT_FOUND, message)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_secs: u64,
    server_time: i64,
}

async fn health<P: MarketDataProvider>(State(state): State<Arc<AppState<P>>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.uptime_secs(),
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Quote / chart / search / popular
// =============================================================================

async fn symbol_quote<P: MarketDataProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(symbol): Path<String>,
) -> Response {
    match assemble_quote(&state.provider, &state.catalog, &symbol).await {
        Ok(quote) => Json(quote).into_response(),
        Err(e) => market_error_response(&e, &symbol, "Symbol not found"),
    }
}

async fn chart<P: MarketDataProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path((symbol, timeframe)): Path<(String, String)>,
) -> Response {
    match assemble_chart(&state.provider, &state.catalog, &symbol, &timeframe).await {
        Ok(payload) => {
            debug!(symbol = %symbol, timeframe = %timeframe, candles = payload.candles.len(), "chart served");
            Json(payload).into_response()
        }
        Err(e) => market_error_response(&e, &symbol, "Chart data not found"),
    }
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

async fn search<P: MarketDataProvider>(
    State(state): State<Arc<AppState<P>>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    Json(search_symbols(&state.provider, &params.q).await)
}

async fn popular<P: MarketDataProvider>(State(state): State<Arc<AppState<P>>>) -> impl IntoResponse {
    Json(state.catalog.popular.clone())
}

// =============================================================================
// Watchlists
// =============================================================================

async fn get_watchlists<P: MarketDataProvider>(
    State(state): State<Arc<AppState<P>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let lists = session_from_headers(&headers)
        .map(|session| state.watchlists.get(&session))
        .unwrap_or_default();
    Json(lists)
}

async fn save_watchlists<P: MarketDataProvider>(
    State(state): State<Arc<AppState<P>>>,
    headers: HeaderMap,
    payload: Result<Json<Vec<Watchlist>>, JsonRejection>,
) -> Response {
    let watchlists = match payload {
        Ok(Json(watchlists)) => watchlists,
        Err(rejection) => {
            debug!(error = %rejection, "rejected watchlist payload");
            return error_response(StatusCode::NOT_FOUND, "Invalid watchlist data");
        }
    };
    let body = Json(serde_json::json!({ "success": true }));

    // Only sessions the store itself minted are accepted; anything else
    // (no cookie, forged, expired or evicted) gets a fresh session.
    let watchlists = match session_from_headers(&headers) {
        Some(session) => match state.watchlists.put(&session, watchlists) {
            Ok(()) => {
                debug!("watchlists saved");
                return body.into_response();
            }
            Err(rejected) => rejected,
        },
        None => watchlists,
    };

    let count = watchlists.len();
    let session = state.watchlists.create_session(watchlists);
    info!(count, "new watchlist session created");
    ([(header::SET_COOKIE, session_cookie(&session))], body).into_response()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WatchlistData {
    watchlist: Watchlist,
    symbol_data: Vec<Quote>,
}

async fn watchlist_data<P: MarketDataProvider>(
    State(state): State<Arc<AppState<P>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let Some(watchlist) = session_from_headers(&headers)
        .and_then(|session| state.watchlists.find(&session, &id))
    else {
        return error_response(StatusCode::NOT_FOUND, "Watchlist not found");
    };

    let quotes = join_all(
        watchlist
            .symbols
            .iter()
            .map(|symbol| assemble_quote(&state.provider, &state.catalog, symbol)),
    )
    .await;

    let symbol_data: Vec<Quote> = watchlist
        .symbols
        .iter()
        .zip(quotes)
        .filter_map(|(symbol, result)| match result {
            Ok(quote) => Some(quote),
            Err(e) => {
                debug!(symbol = %symbol, error = %e, "omitting symbol from watchlist data");
                None
            }
        })
        .collect();

    Json(WatchlistData {
        watchlist,
        symbol_data,
    })
    .into_response()
}
