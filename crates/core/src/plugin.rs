//! Plugin-provided blocks.
//!
//! Plugin blocks are code-defined (unlike reusable content blocks, which are
//! stored content). The registry maps plugin ids to definitions and factories;
//! the element resolver instantiates them with an empty configuration.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::context::Viewer;
use crate::error::CoreError;

/// Per-instance block configuration.
pub type BlockConfiguration = Map<String, Value>;

/// Plugin id of the placeholder block used for missing plugins.
pub const BROKEN_BLOCK_ID: &str = "broken";

/// A renderable plugin block instance.
pub trait PluginBlock: Send + Sync {
    /// Whether `viewer` may see this block. Defaults to allowed.
    fn access(&self, _viewer: &Viewer) -> bool {
        true
    }

    /// Render the block to HTML.
    fn build(&self) -> String;
}

/// Static metadata of a plugin block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginBlockDefinition {
    pub id: String,
    /// The module that provides the block, e.g. `system`.
    pub provider: String,
    pub admin_label: String,
}

type BlockFactory = Arc<dyn Fn(&BlockConfiguration) -> Box<dyn PluginBlock> + Send + Sync>;

/// Registry of known plugin blocks, in registration order.
#[derive(Clone, Default)]
pub struct PluginBlockRegistry {
    blocks: IndexMap<String, (PluginBlockDefinition, BlockFactory)>,
}

impl std::fmt::Debug for PluginBlockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginBlockRegistry")
            .field("blocks", &self.blocks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PluginBlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, definition: PluginBlockDefinition, factory: F)
    where
        F: Fn(&BlockConfiguration) -> Box<dyn PluginBlock> + Send + Sync + 'static,
    {
        self.blocks
            .insert(definition.id.clone(), (definition, Arc::new(factory)));
    }

    pub fn definitions(&self) -> impl Iterator<Item = &PluginBlockDefinition> {
        self.blocks.values().map(|(definition, _)| definition)
    }

    pub fn definition(&self, id: &str) -> Option<&PluginBlockDefinition> {
        self.blocks.get(id).map(|(definition, _)| definition)
    }

    /// Instantiate a plugin block with the given configuration.
    pub fn create_instance(
        &self,
        id: &str,
        config: &BlockConfiguration,
    ) -> Result<Box<dyn PluginBlock>, CoreError> {
        let (_, factory) = self.blocks.get(id).ok_or_else(|| CoreError::UnknownKey {
            entity: "PluginBlock",
            key: id.to_string(),
        })?;
        Ok(factory(config))
    }

    /// The blocks every installation ships with.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(
            definition("system_powered_by_block", "system", "Powered by"),
            |_| Box::new(PoweredByBlock),
        );
        registry.register(
            definition("system_branding_block", "system", "Site branding"),
            |config| {
                let site_name = config
                    .get("site_name")
                    .and_then(Value::as_str)
                    .unwrap_or("Site")
                    .to_string();
                Box::new(BrandingBlock { site_name })
            },
        );
        registry.register(
            definition("user_login_block", "user", "User login"),
            |_| Box::new(UserLoginBlock),
        );
        registry.register(definition(BROKEN_BLOCK_ID, "core", "Broken/Missing"), |_| {
            Box::new(BrokenBlock)
        });
        registry
    }
}

fn definition(id: &str, provider: &str, admin_label: &str) -> PluginBlockDefinition {
    PluginBlockDefinition {
        id: id.to_string(),
        provider: provider.to_string(),
        admin_label: admin_label.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Built-in blocks
// ---------------------------------------------------------------------------

struct PoweredByBlock;

impl PluginBlock for PoweredByBlock {
    fn build(&self) -> String {
        "<span>Powered by pagelayout</span>".to_string()
    }
}

struct BrandingBlock {
    site_name: String,
}

impl PluginBlock for BrandingBlock {
    fn build(&self) -> String {
        format!(
            "<a href=\"/\" rel=\"home\" class=\"site-branding__name\">{}</a>",
            crate::page::escape_html(&self.site_name)
        )
    }
}

/// Only shown to anonymous users.
struct UserLoginBlock;

impl PluginBlock for UserLoginBlock {
    fn access(&self, viewer: &Viewer) -> bool {
        !viewer.is_authenticated()
    }

    fn build(&self) -> String {
        "<a href=\"/user/login\" class=\"user-login\">Log in</a>".to_string()
    }
}

struct BrokenBlock;

impl PluginBlock for BrokenBlock {
    fn build(&self) -> String {
        String::new()
    }
}
