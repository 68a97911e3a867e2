//! Handlers for the layout editor endpoints.
//!
//! The render and save endpoints keep the `{ "content": .. }` envelope the
//! editor front end posts against; the supporting endpoints use the standard
//! `{ "data": .. }` envelope.

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use pagelayout_core::assignment::{LayoutSubmission, RawLayout};
use pagelayout_core::catalog::TemplateCategory;
use pagelayout_core::context::RequestContext;
use pagelayout_core::element::{ElementKind, ElementRef};
use pagelayout_core::error::CoreError;
use pagelayout_core::merge::SaveOutcome;
use pagelayout_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::access::authorize;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::AddContentQuery;
use crate::response::{ContentResponse, DataResponse};
use crate::state::AppState;

fn item_not_found(content_item_id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ContentItem",
        id: content_item_id,
    })
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /layout-editor/content`. Every field is required; a missing
/// one is reported as not found rather than as a malformed body.
#[derive(Debug, Deserialize)]
pub struct RenderElementRequest {
    /// Element id (field name, block UUID or plugin id).
    pub id: Option<String>,
    /// Element type wire name.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// The content item the element renders against.
    #[serde(alias = "nid")]
    pub container: Option<DbId>,
}

/// Body of `POST /layout-editor/save`.
#[derive(Debug, Deserialize)]
pub struct SaveLayoutRequest {
    pub id: Option<DbId>,
    #[serde(default)]
    pub layout: Option<RawLayout>,
}

/// Switch-layout options for one content item.
#[derive(Debug, Serialize)]
pub struct TemplateOptions {
    pub active_template_id: String,
    pub categories: Vec<TemplateCategory>,
}

// ---------------------------------------------------------------------------
// Editor endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/layout-editor/content
///
/// Render one element wrapped in the editor container so the front end can
/// drop it into a region.
pub async fn render_element(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RenderElementRequest>,
) -> AppResult<impl IntoResponse> {
    let element_id = input.id.ok_or(AppError::MissingParameter("id"))?;
    let kind = input.kind.ok_or(AppError::MissingParameter("type"))?;
    let content_item_id = input
        .container
        .ok_or(AppError::MissingParameter("container"))?;

    let kind = ElementKind::from_str(&kind)?;
    authorize(&state, &user, content_item_id)
        .await?
        .ok_or_else(|| item_not_found(content_item_id))?;

    let ctx = RequestContext::for_item(content_item_id, user.viewer());
    let element = ElementRef::new(element_id, kind);
    let content = state
        .engine
        .render_element(&ctx, content_item_id, &element, true)
        .await?;

    Ok(Json(ContentResponse { content }))
}

/// POST /api/v1/layout-editor/save
///
/// Merge the submitted templates into the item's layout and save a new
/// revision. Responds `{ "content": id }` on success. A save that fails
/// (unknown item, malformed layout, item busy, storage error) responds
/// `{ "content": null }`; only a missing `id` or a failed access check is an
/// HTTP error.
pub async fn save_layout(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SaveLayoutRequest>,
) -> AppResult<impl IntoResponse> {
    let content_item_id = input.id.ok_or(AppError::MissingParameter("id"))?;

    if authorize(&state, &user, content_item_id).await?.is_none() {
        tracing::warn!(content_item_id, "Layout save for unknown content item");
        return Ok(Json(ContentResponse {
            content: None::<DbId>,
        }));
    }

    let result = match &input.layout {
        Some(raw) => LayoutSubmission::from_raw(raw),
        None => Ok(LayoutSubmission::default()),
    };
    let ctx = RequestContext::for_item(content_item_id, user.viewer());
    let result = match result {
        Ok(submission) => state.engine.save(&ctx, content_item_id, &submission).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(outcome) => {
            if let SaveOutcome::Saved {
                revision_id,
                active_template_id,
                ..
            } = &outcome
            {
                tracing::info!(
                    content_item_id,
                    revision_id = *revision_id,
                    template_id = %active_template_id,
                    user_id = user.user_id,
                    "Layout saved via editor",
                );
            }
            Ok(Json(ContentResponse {
                content: Some(outcome.content_item_id()),
            }))
        }
        Err(err) => {
            log_save_failure(content_item_id, &err);
            Ok(Json(ContentResponse { content: None }))
        }
    }
}

fn log_save_failure(content_item_id: DbId, err: &CoreError) {
    match err {
        CoreError::Storage(_) | CoreError::Internal(_) => {
            tracing::error!(content_item_id, error = %err, "Layout save failed");
        }
        _ => tracing::warn!(content_item_id, error = %err, "Layout save rejected"),
    }
}

// ---------------------------------------------------------------------------
// Supporting endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/layout-editor/{id}/templates
///
/// Allowed templates grouped by category, plus the item's active template.
pub async fn list_templates(
    user: AuthUser,
    State(state): State<AppState>,
    Path(content_item_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    authorize(&state, &user, content_item_id)
        .await?
        .ok_or_else(|| item_not_found(content_item_id))?;

    let (item, content_type) = state.engine.load_with_type(content_item_id).await?;
    let active_template_id = state.engine.active_template_id(&item, &content_type).await?;
    let categories = state.engine.catalog().template_options(&content_type);

    Ok(Json(DataResponse {
        data: TemplateOptions {
            active_template_id,
            categories,
        },
    }))
}

/// GET /api/v1/layout-editor/{id}/add-content?region=
///
/// Elements that may be placed into a region of the active template.
pub async fn add_content(
    user: AuthUser,
    State(state): State<AppState>,
    Path(content_item_id): Path<DbId>,
    Query(params): Query<AddContentQuery>,
) -> AppResult<impl IntoResponse> {
    authorize(&state, &user, content_item_id)
        .await?
        .ok_or_else(|| item_not_found(content_item_id))?;

    let inventory = state
        .engine
        .placeable_elements(
            content_item_id,
            params.region.as_deref(),
            &state.config.block_providers,
        )
        .await?;

    Ok(Json(DataResponse { data: inventory }))
}

/// POST /api/v1/layout-editor/{id}/carry-forward
///
/// Called by the host after an ordinary content save. Responds with the new
/// record, or `null` when nothing needed carrying forward.
pub async fn carry_forward(
    user: AuthUser,
    State(state): State<AppState>,
    Path(content_item_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    authorize(&state, &user, content_item_id)
        .await?
        .ok_or_else(|| item_not_found(content_item_id))?;

    let record = state.engine.carry_forward(content_item_id).await?;

    Ok(Json(DataResponse { data: record }))
}
