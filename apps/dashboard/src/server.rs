//! HTTP side of the dashboard: serves the counters on `/api/stats` and a
//! rendered dashboard page on `/`.

use crate::dashboard::{DashboardConfig, html_page};
use async_trait::async_trait;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, Json};
use axum::routing::get;
use axum::Router;
use botpulse_charts::{CanvasSurface, RenderError, render_activity_chart, render_response_chart};
use botpulse_redis::MetricsStore;
use botpulse_shared_models::StatisticsSnapshot;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

/// Where the served counters come from.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn snapshot(&self) -> anyhow::Result<StatisticsSnapshot>;
}

#[async_trait]
impl SnapshotSource for MetricsStore {
    async fn snapshot(&self) -> anyhow::Result<StatisticsSnapshot> {
        Ok(self.get_snapshot().await?)
    }
}

pub struct ServerState {
    pub source: Arc<dyn SnapshotSource>,
    pub config: DashboardConfig,
    pub title: String,
}

/// A failing source is logged and reported as all zeros.
async fn current_snapshot(state: &ServerState) -> StatisticsSnapshot {
    match state.source.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Error retrieving stats: {:#}", e);
            StatisticsSnapshot::default()
        }
    }
}

pub async fn api_stats(State(state): State<Arc<ServerState>>) -> Json<StatisticsSnapshot> {
    Json(current_snapshot(&state).await)
}

fn render_page(state: &ServerState, snapshot: &StatisticsSnapshot) -> Result<String, RenderError> {
    let config = &state.config;
    let mut activity = CanvasSurface::new(config.activity_surface.as_str());
    let mut response = CanvasSurface::new(config.response_surface.as_str());

    render_activity_chart(snapshot, &mut activity, &config.style)?;
    render_response_chart(snapshot, &mut response, &config.style)?;

    html_page(&state.title, &activity, &response)?.to_html()
}

pub async fn dashboard_page(
    State(state): State<Arc<ServerState>>,
) -> Result<Html<String>, StatusCode> {
    let snapshot = current_snapshot(&state).await;

    render_page(&state, &snapshot).map(Html).map_err(|e| {
        error!("Failed to render dashboard page: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub fn build_app(state: ServerState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/api/stats", get(api_stats))
        .with_state(Arc::new(state))
}

pub async fn serve(addr: SocketAddr, state: ServerState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving dashboard on http://{}", listener.local_addr()?);

    axum::serve(listener, build_app(state)).await?;

    Ok(())
}
