//! Failures of the web views and their HTTP status mapping.

use crate::utils::error::RenderError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use thiserror::Error;

/// Shown when the layout program is not installed
pub const RENDERER_UNAVAILABLE_MESSAGE: &str =
    "Could not execute dot; may need to install graphviz.";

/// Why a view could not be produced
#[derive(Error, Debug)]
pub enum ViewError {
    /// The report generator rejected the request; one entry per problem
    #[error("error generating report: {}", .0.join(";"))]
    Report(Vec<String>),

    #[error("error serializing {view}: {source}")]
    Serialization {
        view: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ViewError {
    pub fn status(&self) -> StatusCode {
        match self {
            ViewError::Report(_) | ViewError::Serialization { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ViewError::Render(e) if e.is_unavailable() => StatusCode::NOT_IMPLEMENTED,
            ViewError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body text sent to the client
    pub fn message(&self) -> String {
        match self {
            ViewError::Render(e) if e.is_unavailable() => RENDERER_UNAVAILABLE_MESSAGE.to_string(),
            ViewError::Serialization { view, .. } => format!("error serializing {}", view),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ViewError {
    fn into_response(self) -> Response {
        match &self {
            ViewError::Render(e) if e.is_unavailable() => {
                error!("Failed to execute dot. Is Graphviz installed? {}", e)
            }
            other => error!("{}", other),
        }
        (self.status(), self.message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_error_joins_diagnostics() {
        let err = ViewError::Report(vec!["profile is empty".to_string(), "bad sort".to_string()]);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "error generating report: profile is empty;bad sort");
    }

    #[test]
    fn test_renderer_unavailable_is_distinct() {
        let err = ViewError::from(RenderError::Unavailable {
            program: "dot".to_string(),
        });
        assert_eq!(err.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(err.message(), RENDERER_UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn test_renderer_failure_names_program() {
        let err = ViewError::from(RenderError::Failed {
            program: "dot".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "syntax error in line 1".to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().starts_with("dot exited"));
    }

    #[test]
    fn test_serialization_error_names_view() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = ViewError::Serialization {
            view: "flame graph",
            source,
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "error serializing flame graph");
    }
}
