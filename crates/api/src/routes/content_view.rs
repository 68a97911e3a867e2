//! Public content view routes, mounted at the root.

use axum::routing::get;
use axum::Router;

use crate::handlers::content_view;
use crate::state::AppState;

/// ```text
/// GET    /content/{id}                                -> view_content
/// GET    /content/{id}/revisions/{revision_id}/view   -> view_revision
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/content/{id}", get(content_view::view_content))
        .route(
            "/content/{id}/revisions/{revision_id}/view",
            get(content_view::view_revision),
        )
}
