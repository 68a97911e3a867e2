//! Explicit per-request context passed into every engine operation.

use serde::Deserialize;

use crate::types::DbId;

/// The user on whose behalf a request runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    /// `None` for anonymous requests.
    pub user_id: Option<DbId>,
    pub permissions: Vec<String>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn user(user_id: DbId, permissions: Vec<String>) -> Self {
        Self {
            user_id: Some(user_id),
            permissions,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Display-time overrides taken from the request.
///
/// None of these persist anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LayoutOverrides {
    /// Explicit "switch layout" request (`?layout=`).
    pub template_id: Option<String>,
    /// Layout editor mode (`?layout-editor`).
    #[serde(default)]
    pub edit_mode: bool,
    /// Render a past revision instead of the current one.
    pub revision_id: Option<DbId>,
}

/// Everything an engine operation needs to know about the request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub viewer: Viewer,
    /// The content item addressed by the current route, if any.
    pub route_content_item_id: Option<DbId>,
    pub overrides: LayoutOverrides,
}

impl RequestContext {
    pub fn for_item(content_item_id: DbId, viewer: Viewer) -> Self {
        Self {
            viewer,
            route_content_item_id: Some(content_item_id),
            overrides: LayoutOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: LayoutOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}
