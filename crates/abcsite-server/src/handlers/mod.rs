//! HTTP request handlers.

pub(crate) mod legacy;
pub(crate) mod pages;

use axum::http::{HeaderMap, header};

/// Absolute base URL for the request, from its `Host` header.
///
/// Falls back to `fallback` when the header is missing or not valid text.
pub(crate) fn request_base_url(headers: &HeaderMap, fallback: &str) -> String {
    headers
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
        .filter(|host| !host.is_empty())
        .map_or_else(|| fallback.to_owned(), |host| format!("http://{host}"))
}
