use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use flameview::parser::{parse_snapshot, LoadedProfile};
use flameview::render::Renderer;
use flameview::utils::error::RenderError;
use flameview::web::{router, AppState, RENDERER_UNAVAILABLE_MESSAGE};
use std::sync::Arc;
use tower::ServiceExt;

/// Renderer double with a fixed outcome
struct FakeRenderer {
    outcome: fn() -> Result<Vec<u8>, RenderError>,
}

#[async_trait]
impl Renderer for FakeRenderer {
    async fn render(&self, _description: &[u8]) -> Result<Vec<u8>, RenderError> {
        (self.outcome)()
    }
}

fn rendered() -> Result<Vec<u8>, RenderError> {
    Ok(b"<?xml version=\"1.0\"?>\n<svg><g id=\"graph0\"/></svg>\n".to_vec())
}

fn missing() -> Result<Vec<u8>, RenderError> {
    Err(RenderError::Unavailable {
        program: "dot".to_string(),
    })
}

fn crashed() -> Result<Vec<u8>, RenderError> {
    Err(RenderError::Failed {
        program: "dot".to_string(),
        status: "exit status: 1".to_string(),
        stderr: "Error: syntax error".to_string(),
    })
}

fn profile() -> LoadedProfile {
    parse_snapshot(
        br#"{
        "title": "server",
        "nodes": [
            {"id": 1, "name": "A", "flat": 0, "cum": 10},
            {"id": 2, "name": "B", "flat": 6, "cum": 6},
            {"id": 3, "name": "C", "flat": 4, "cum": 4}
        ],
        "edges": [
            {"from": 1, "to": 2, "weight": 6},
            {"from": 1, "to": 3, "weight": 4}
        ]
    }"#,
    )
    .unwrap()
}

fn state(outcome: fn() -> Result<Vec<u8>, RenderError>) -> AppState {
    AppState::new(profile(), Arc::new(FakeRenderer { outcome }))
}

async fn get(state: AppState, uri: &str) -> Response {
    router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn content_type(response: &Response) -> &str {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = get(state(rendered), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_top_json() {
    let response = get(state(rendered), "/top").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "application/json");

    let rows: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let names: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["Name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["B", "C", "A"]);
    assert_eq!(rows[0]["FlatFormat"], "6");
}

#[tokio::test]
async fn test_top_sort_by_cum() {
    let response = get(state(rendered), "/top?sort=cum&nodecount=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[0]["Name"], "A");
    assert_eq!(rows[1]["Name"], "B");
}

#[tokio::test]
async fn test_flamegraph_json() {
    let response = get(state(rendered), "/flamegraph").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "application/json");

    let tree: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(tree["Name"], "root");
    assert_eq!(tree["FullName"], "root");
    assert_eq!(tree["Cum"], 10);
    assert_eq!(tree["Percent"], "100%");

    let a = &tree["Children"][0];
    assert_eq!(a["Name"], "A");
    assert_eq!(a["Children"][0]["Percent"], "60%");
    assert_eq!(a["Children"][1]["Percent"], "40%");
    assert_eq!(a["Children"][1]["Children"], serde_json::json!([]));
}

#[tokio::test]
async fn test_report_error_is_500_with_diagnostics() {
    let response = get(state(rendered), "/top?sort=size&nodecount=0").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let text = body_text(response).await;
    assert!(text.starts_with("error generating report: "));
    assert!(text.contains("unknown sort order"));
    assert!(text.contains(";node count limit must be greater than 0"));
}

#[tokio::test]
async fn test_bad_nodecount_is_500_with_diagnostics() {
    let response = get(state(rendered), "/top?nodecount=abc").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let text = body_text(response).await;
    assert!(text.starts_with("error generating report: invalid nodecount"));
}

#[tokio::test]
async fn test_dot_description() {
    let response = get(state(missing), "/dot").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "text/vnd.graphviz");

    let dot = body_text(response).await;
    assert!(dot.starts_with("digraph \"server\""));
    assert!(dot.contains("File: server"));
}

#[tokio::test]
async fn test_svg_strips_prolog() {
    let response = get(state(rendered), "/svg").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "image/svg+xml");
    assert_eq!(body_text(response).await, "<svg><g id=\"graph0\"/></svg>\n");
}

#[tokio::test]
async fn test_missing_renderer_is_501() {
    let response = get(state(missing), "/svg").await;
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    assert_eq!(body_text(response).await, RENDERER_UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn test_renderer_failure_is_500() {
    let response = get(state(crashed), "/svg").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let text = body_text(response).await;
    assert!(text.contains("syntax error"));
    assert!(!text.contains("<svg"));
}
