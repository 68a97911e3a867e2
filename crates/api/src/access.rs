//! Layout-editor access checks.
//!
//! Editing a content item's layout requires the layout editor to be enabled
//! for its content type and the user to hold `use {type} layout per node`.
//! Admins bypass the permission but not the enablement flag.

use pagelayout_core::content::{content_type_of, ContentType};
use pagelayout_core::context::Viewer;
use pagelayout_core::error::CoreError;
use pagelayout_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Role name that bypasses per-type layout permissions.
pub const ROLE_ADMIN: &str = "admin";

/// Whether `viewer` (with `role`) may use the layout editor on `content_type`.
pub fn can_edit(content_type: &ContentType, viewer: &Viewer, role: Option<&str>) -> bool {
    if !content_type.layout_editor_enabled {
        return false;
    }
    role == Some(ROLE_ADMIN) || viewer.has_permission(&content_type.layout_permission())
}

/// Check that `user` may edit the layout of `content_item_id`.
///
/// Returns `Ok(None)` when the item does not exist so each endpoint can
/// report that its own way.
pub async fn authorize(
    state: &AppState,
    user: &AuthUser,
    content_item_id: DbId,
) -> AppResult<Option<ContentType>> {
    let content = state.engine.content();
    let Some(item) = content.find_item(content_item_id).await? else {
        return Ok(None);
    };
    let content_type = content_type_of(content, &item).await?;

    if !content_type.layout_editor_enabled {
        return Err(CoreError::Forbidden(format!(
            "Layout editor is not enabled for content type '{}'",
            content_type.name
        ))
        .into());
    }
    if !can_edit(&content_type, &user.viewer(), Some(&user.role)) {
        tracing::debug!(
            user_id = user.user_id,
            content_item_id,
            permission = %content_type.layout_permission(),
            "Layout editor access denied"
        );
        return Err(CoreError::Forbidden(format!(
            "Permission '{}' required",
            content_type.layout_permission()
        ))
        .into());
    }
    Ok(Some(content_type))
}
