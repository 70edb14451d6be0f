//! HTTP surface for the report views.
//!
//! Routes:
//! - `GET /top` - ranked flat list as JSON
//! - `GET /flamegraph` - flame graph tree as JSON
//! - `GET /dot` - call graph in DOT
//! - `GET /svg` - call graph rendered by the layout program
//!
//! Every body is built completely before the status is chosen.

pub mod error;
pub mod views;

use crate::parser::LoadedProfile;
use crate::render::Renderer;
use crate::utils::config::{CONTENT_TYPE_DOT, CONTENT_TYPE_JSON, CONTENT_TYPE_SVG};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

// Re-export main types
pub use error::{ViewError, RENDERER_UNAVAILABLE_MESSAGE};
pub use views::ViewParams;

/// Shared, read-only state for every request
#[derive(Clone)]
pub struct AppState {
    pub profile: Arc<LoadedProfile>,
    pub renderer: Arc<dyn Renderer>,
}

impl AppState {
    pub fn new(profile: LoadedProfile, renderer: Arc<dyn Renderer>) -> Self {
        Self {
            profile: Arc::new(profile),
            renderer,
        }
    }
}

/// Build the router over a loaded profile
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/top", get(top))
        .route("/flamegraph", get(flamegraph))
        .route("/dot", get(dot))
        .route("/svg", get(svg))
        .with_state(state)
}

/// Serve until ctrl-c
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
}

fn body(content_type: &'static str, bytes: impl Into<axum::body::Body>) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], bytes.into()).into_response()
}

async fn health() -> &'static str {
    "ok"
}

async fn top(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> Result<Response, ViewError> {
    let data = views::top_data(&state, &params)?;
    Ok(body(CONTENT_TYPE_JSON, data))
}

async fn flamegraph(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> Result<Response, ViewError> {
    let data = views::flamegraph_data(&state, &params)?;
    Ok(body(CONTENT_TYPE_JSON, data))
}

async fn dot(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> Result<Response, ViewError> {
    let data = views::dot_graph(&state, &params)?;
    Ok(body(CONTENT_TYPE_DOT, data))
}

async fn svg(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
) -> Result<Response, ViewError> {
    let data = views::dot_svg(&state, &params).await?;
    Ok(body(CONTENT_TYPE_SVG, data))
}
