pub mod content_view;
pub mod health;
pub mod layout_editor;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /layout-editor/content                       render one element (POST)
/// /layout-editor/save                          save a layout (POST)
/// /layout-editor/{id}/templates                switch-layout options
/// /layout-editor/{id}/add-content              placeable elements (?region=)
/// /layout-editor/{id}/carry-forward            carry layout to new revision (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/layout-editor", layout_editor::router())
}
