//! View bodies, independent of the HTTP layer.
//!
//! Each function produces the complete body of one view or fails; no
//! partial output ever leaves this module.

use super::error::ViewError;
use super::AppState;
use crate::flamegraph::build_flame_tree;
use crate::graph::compose_dot;
use crate::render::strip_prolog;
use crate::report::{generate_report, text_items, Report, ReportRequest, SortOrder};
use log::debug;
use serde::Deserialize;

/// Query parameters shared by the views
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewParams {
    /// Node limit for trimmed views
    pub nodecount: Option<String>,
    /// `flat` or `cum`
    pub sort: Option<String>,
}

fn make_report(
    state: &AppState,
    params: &ViewParams,
    mut request: ReportRequest,
) -> Result<Report, ViewError> {
    let mut errors = Vec::new();

    if let Some(sort) = &params.sort {
        match sort.parse::<SortOrder>() {
            Ok(order) => request = request.with_sort(order),
            Err(e) => errors.push(e),
        }
    }
    if let (true, Some(raw)) = (request.trim, &params.nodecount) {
        match raw.parse::<usize>() {
            Ok(limit) => request = request.with_node_limit(limit),
            Err(e) => errors.push(format!("invalid nodecount {:?}: {}", raw, e)),
        }
    }

    let profile = &state.profile;
    match generate_report(&profile.graph, &profile.options, request) {
        Ok(report) if errors.is_empty() => Ok(report),
        Ok(_) => Err(ViewError::Report(errors)),
        Err(report_errors) => {
            errors.extend(report_errors);
            Err(ViewError::Report(errors))
        }
    }
}

/// JSON array of top table rows
pub fn top_data(state: &AppState, params: &ViewParams) -> Result<Vec<u8>, ViewError> {
    let report = make_report(state, params, ReportRequest::top())?;
    let items = text_items(&report);
    debug!("Top view: {} rows", items.len());

    serde_json::to_vec(&items).map_err(|source| ViewError::Serialization {
        view: "top",
        source,
    })
}

/// JSON flame graph tree
pub fn flamegraph_data(state: &AppState, params: &ViewParams) -> Result<Vec<u8>, ViewError> {
    // The call tree must not be trimmed, or the flame graph loses functions.
    let report = make_report(state, params, ReportRequest::flamegraph())?;
    let forest = report.forest().ok_or_else(|| {
        ViewError::Report(vec!["report was not generated in call tree mode".to_string()])
    })?;
    let tree = build_flame_tree(forest, report.total, &report.formatter());

    serde_json::to_vec(&tree).map_err(|source| ViewError::Serialization {
        view: "flame graph",
        source,
    })
}

/// DOT description of the trimmed call graph
pub fn dot_graph(state: &AppState, params: &ViewParams) -> Result<String, ViewError> {
    let report = make_report(state, params, ReportRequest::graph())?;
    Ok(compose_dot(&report.graph, &report.dot_config()))
}

/// Call graph rendered to SVG by the layout program
pub async fn dot_svg(state: &AppState, params: &ViewParams) -> Result<Vec<u8>, ViewError> {
    let dot = dot_graph(state, params)?;
    let svg = state.renderer.render(dot.as_bytes()).await?;
    Ok(strip_prolog(&svg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphBuilder, NodeInfo};
    use crate::parser::LoadedProfile;
    use crate::render::DotRenderer;
    use crate::report::ReportOptions;
    use std::sync::Arc;

    fn state() -> AppState {
        let mut b = GraphBuilder::new();
        let a = b.add_node(NodeInfo::named("A"), 0, 10);
        let bb = b.add_node(NodeInfo::named("B"), 6, 6);
        let c = b.add_node(NodeInfo::named("C"), 4, 4);
        b.add_edge(a, bb, 6, false, false).unwrap();
        b.add_edge(a, c, 4, false, false).unwrap();
        AppState::new(
            LoadedProfile {
                graph: b.build(),
                options: ReportOptions::default(),
            },
            Arc::new(DotRenderer::new()),
        )
    }

    #[test]
    fn test_top_data() {
        let body = top_data(&state(), &ViewParams::default()).unwrap();
        let rows: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 3);
        assert_eq!(rows[0]["Name"], "B");
    }

    #[test]
    fn test_top_data_nodecount() {
        let params = ViewParams {
            nodecount: Some("1".to_string()),
            sort: Some("cum".to_string()),
        };
        let body = top_data(&state(), &params).unwrap();
        let rows: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["Name"], "A");
    }

    #[test]
    fn test_flamegraph_data() {
        let body = flamegraph_data(&state(), &ViewParams::default()).unwrap();
        let tree: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(tree["Name"], "root");
        assert_eq!(tree["Cum"], 10);
        assert_eq!(tree["Children"][0]["Percent"], "100%");
        assert_eq!(tree["Children"][0]["Children"][0]["Percent"], "60%");
    }

    #[test]
    fn test_flamegraph_ignores_nodecount() {
        let params = ViewParams {
            nodecount: Some("1".to_string()),
            sort: None,
        };
        let body = flamegraph_data(&state(), &params).unwrap();
        let tree: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(tree["Children"][0]["Children"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_bad_sort_is_report_error() {
        let params = ViewParams {
            nodecount: None,
            sort: Some("size".to_string()),
        };
        let err = top_data(&state(), &params).unwrap_err();
        assert!(matches!(err, ViewError::Report(ref e) if e.len() == 1));
    }

    #[test]
    fn test_bad_nodecount_is_report_error() {
        let params = ViewParams {
            nodecount: Some("abc".to_string()),
            sort: Some("size".to_string()),
        };
        let err = top_data(&state(), &params).unwrap_err();
        match err {
            ViewError::Report(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[1].starts_with("invalid nodecount \"abc\""));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_dot_graph() {
        let dot = dot_graph(&state(), &ViewParams::default()).unwrap();
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("->"));
    }
}
