//! Query parameter types for the layout handlers.

use serde::Deserialize;

/// Display overrides on the content view route
/// (`?layout=twocol&layout-editor`).
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    pub layout: Option<String>,
    /// Presence flag; any value (including empty) turns edit mode on.
    #[serde(rename = "layout-editor")]
    pub layout_editor: Option<String>,
}

impl ViewQuery {
    pub fn edit_mode(&self) -> bool {
        self.layout_editor.is_some()
    }
}

/// `?region=` for the add-content inventory.
#[derive(Debug, Default, Deserialize)]
pub struct AddContentQuery {
    pub region: Option<String>,
}
