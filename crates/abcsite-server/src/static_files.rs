//! Static file serving.
//!
//! Everything that isn't a page (stylesheet, images, mp3 previews, release
//! artifacts) is served from the site root directory.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Create router serving files under `root_dir`, 404 for anything missing.
pub(crate) fn static_router(root_dir: &Path) -> Router<Arc<AppState>> {
    Router::new().fallback_service(ServeDir::new(root_dir))
}
