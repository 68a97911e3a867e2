//! Route definitions for the layout editor, mounted at `/api/v1/layout-editor`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::layout_editor;
use crate::state::AppState;

/// ```text
/// POST   /content                 -> render_element
/// POST   /save                    -> save_layout
/// GET    /{id}/templates          -> list_templates
/// GET    /{id}/add-content        -> add_content
/// POST   /{id}/carry-forward      -> carry_forward
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/content", post(layout_editor::render_element))
        .route("/save", post(layout_editor::save_layout))
        .route("/{id}/templates", get(layout_editor::list_templates))
        .route("/{id}/add-content", get(layout_editor::add_content))
        .route("/{id}/carry-forward", post(layout_editor::carry_forward))
}
