//! Application state.
//!
//! Shared, immutable state for all request handlers.

use abcsite_render::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// The website renderer.
    pub(crate) site: Site,
    /// Base URL for requests without a `Host` header.
    pub(crate) fallback_base_url: String,
    /// Application version for `ETag` computation.
    pub(crate) version: String,
}
