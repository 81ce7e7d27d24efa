use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use meteo_core::{ChatMessage, ChatResponse, WeatherAgent};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::info;

use crate::stats::RequestStats;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// State shared with all routes.
#[derive(Clone)]
pub struct AppState {
    agent: Arc<WeatherAgent>,
    stats: Arc<RequestStats>,
}

impl AppState {
    pub fn new(agent: WeatherAgent) -> Self {
        Self { agent: Arc::new(agent), stats: Arc::new(RequestStats::default()) }
    }
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    total_requests: u64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/chat", post(chat))
        .route("/stats", get(stats))
        // Panics in a handler become a generic 500 instead of a dropped
        // connection.
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run_server(agent: WeatherAgent, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(AppState::new(agent));

    info!("Weather assistant listening on http://{addr}");

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server failed: {e}"))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Main chatbot endpoint. One message in, one `ChatResponse` out; the agent
/// recovers every failure into `success = false`, so only an empty message
/// changes the HTTP status.
async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatMessage>,
) -> (StatusCode, Json<ChatResponse>) {
    // Every call counts, whatever the outcome.
    state.stats.record_request();

    let status = if payload.message.trim().is_empty() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::OK
    };

    let response = state.agent.handle_message(&payload.message).await;

    (status, Json(response))
}

/// Anonymous usage statistics; no personal data.
async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse { total_requests: state.stats.total_requests() })
}
