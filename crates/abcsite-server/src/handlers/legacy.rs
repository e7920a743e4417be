//! Redirects for retired URLs.

use axum::response::Redirect;

/// Handle GET /about.php, the older name of the contact page.
pub(crate) async fn about() -> Redirect {
    Redirect::permanent("/contact.php")
}

/// Handle direct requests for the shared header and footer templates.
pub(crate) async fn template() -> Redirect {
    Redirect::to("/index.php")
}
