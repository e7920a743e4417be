//! Server error types.

use abcsite_render::RenderError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Error returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Page rendering failed.
    #[error("Failed to render {route}: {source}")]
    Render {
        /// Route file name.
        route: &'static str,
        /// Underlying render error.
        #[source]
        source: RenderError,
    },
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        let status = match self {
            Self::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, status.canonical_reason().unwrap_or_default()).into_response()
    }
}
