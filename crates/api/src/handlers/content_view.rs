//! Public content view handlers.
//!
//! These render the full page through the resolution engine. Layout
//! overrides in the query string only take effect for users who may use the
//! layout editor on the item; everyone else gets the stored layout.

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use pagelayout_core::content::content_type_of;
use pagelayout_core::context::{LayoutOverrides, RequestContext};
use pagelayout_core::error::CoreError;
use pagelayout_core::page::render_page;
use pagelayout_core::types::DbId;

use crate::access::can_edit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::query::ViewQuery;
use crate::state::AppState;

/// Turn the query string into overrides the viewer is allowed to use.
async fn permitted_overrides(
    state: &AppState,
    user: &MaybeAuthUser,
    content_item_id: DbId,
    query: &ViewQuery,
) -> AppResult<LayoutOverrides> {
    if query.layout.is_none() && !query.edit_mode() {
        return Ok(LayoutOverrides::default());
    }
    let content = state.engine.content();
    let Some(item) = content.find_item(content_item_id).await? else {
        return Ok(LayoutOverrides::default());
    };
    let content_type = content_type_of(content, &item).await?;
    let role = user.0.as_ref().map(|u| u.role.as_str());

    if !can_edit(&content_type, &user.viewer(), role) {
        tracing::debug!(content_item_id, "Ignoring layout overrides for viewer without access");
        return Ok(LayoutOverrides::default());
    }
    Ok(LayoutOverrides {
        template_id: query.layout.clone(),
        edit_mode: query.edit_mode(),
        revision_id: None,
    })
}

/// GET /content/{id}?layout=&layout-editor
pub async fn view_content(
    user: MaybeAuthUser,
    State(state): State<AppState>,
    Path(content_item_id): Path<DbId>,
    Query(query): Query<ViewQuery>,
) -> AppResult<impl IntoResponse> {
    let overrides = permitted_overrides(&state, &user, content_item_id, &query).await?;
    let ctx = RequestContext::for_item(content_item_id, user.viewer()).with_overrides(overrides);

    let page = state
        .engine
        .resolve(&ctx)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContentItem",
            id: content_item_id,
        }))?;

    Ok(Html(render_page(&page)))
}

/// GET /content/{id}/revisions/{revision_id}/view
pub async fn view_revision(
    user: MaybeAuthUser,
    State(state): State<AppState>,
    Path((content_item_id, revision_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let ctx = RequestContext::for_item(content_item_id, user.viewer()).with_overrides(
        LayoutOverrides {
            revision_id: Some(revision_id),
            ..LayoutOverrides::default()
        },
    );

    let page = state
        .engine
        .resolve(&ctx)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContentRevision",
            id: revision_id,
        }))?;

    Ok(Html(render_page(&page)))
}
