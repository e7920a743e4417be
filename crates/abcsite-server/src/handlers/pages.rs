//! Page endpoints.
//!
//! Renders a page through the site and returns it as HTML with an `ETag`.

use std::sync::Arc;

use abcsite_render::Route;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use md5::{Digest, Md5};

use crate::error::ServerError;
use crate::handlers::request_base_url;
use crate::state::AppState;

/// Render `route` for a request.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn render_page(
    route: Route,
    state: Arc<AppState>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let base_url = request_base_url(&headers, &state.fallback_base_url);
    let html = state
        .site
        .render(route, &base_url)
        .map_err(|source| ServerError::Render {
            route: route.file_name(),
            source,
        })?;

    let etag = compute_etag(&state.version, &html);

    // Check If-None-Match header for conditional request
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        html,
    )
        .into_response())
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars) - sufficient for
/// cache invalidation with negligible collision probability.
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
