//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::path::Path;
use std::sync::Arc;

use abcsite_render::Route;
use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{MethodRouter, get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `root_dir` - Directory served for non-page paths
pub(crate) fn create_router(state: Arc<AppState>, root_dir: &Path) -> Router {
    let mut router = Router::new().route("/", page_route(Route::Home));

    for route in Route::ALL {
        router = router.route(&format!("/{}", route.file_name()), page_route(route));
    }

    // Legacy URLs
    router = router
        .route("/about.php", get(handlers::legacy::about))
        .route("/_header.php", get(handlers::legacy::template))
        .route("/_footer.php", get(handlers::legacy::template));

    // Static files
    router = router.merge(static_files::static_router(root_dir));

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

/// GET route rendering a fixed page.
fn page_route(route: Route) -> MethodRouter<Arc<AppState>> {
    get(
        move |State(state): State<Arc<AppState>>, headers: HeaderMap| async move {
            handlers::pages::render_page(route, state, headers)
        },
    )
}
