//! Content Element Resolver.
//!
//! Turns an [`ElementRef`] into HTML. Each element kind has one renderer,
//! selected by an exhaustive match. Failures never propagate: a block that
//! cannot be found, an invalid id, or a plugin that denies access all yield
//! an empty render for that one element.

use std::sync::Arc;

use indexmap::IndexMap;
use uuid::Uuid;

use crate::content::{BlockContent, ContentItem, ContentRepository, ContentType, LabelDisplay};
use crate::context::Viewer;
use crate::element::{ElementKind, ElementRef};
use crate::page::escape_html;
use crate::plugin::{BlockConfiguration, PluginBlockRegistry};

/// The default render of a content item: each displayed, non-empty field in
/// default-display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentBuild {
    pub fields: IndexMap<String, String>,
}

impl ContentBuild {
    /// Build the default render of `item` using its type's default display.
    pub fn from_default_display(item: &ContentItem, content_type: &ContentType) -> Self {
        let fields = content_type
            .display
            .iter()
            .filter_map(|component| {
                render_field(item, content_type, &component.field)
                    .map(|markup| (component.field.clone(), markup))
            })
            .collect();
        Self { fields }
    }

    /// Remove a field from the build, returning its markup.
    pub fn take(&mut self, field: &str) -> Option<String> {
        self.fields.shift_remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Render one field with the formatter settings of the type's default
/// display. Fields without a display component render with a hidden label.
/// Empty or missing values render nothing.
pub fn render_field(item: &ContentItem, content_type: &ContentType, field: &str) -> Option<String> {
    let value = item.fields.get(field)?;
    if value.trim().is_empty() {
        return None;
    }
    let component = content_type.display_component(field);
    let label_display = component.map(|c| c.label_display).unwrap_or_default();
    let label = component.map(|c| c.label.as_str()).unwrap_or(field);

    let css_name = field.replace('_', "-");
    let label_html = match label_display {
        LabelDisplay::Hidden => String::new(),
        LabelDisplay::Above => format!(
            "<div class=\"field__label\">{}</div>",
            escape_html(label)
        ),
        LabelDisplay::Inline => format!(
            "<div class=\"field__label field__label--inline\">{}</div>",
            escape_html(label)
        ),
    };
    Some(format!(
        "<div class=\"field field--name-{css_name}\">{label_html}<div class=\"field__item\">{}</div></div>",
        escape_html(value)
    ))
}

/// Render a reusable content block through the block wrapper.
pub fn render_block_content(block: &BlockContent) -> String {
    format!(
        "<div class=\"block block-block-content block-block-content-{}\"><h2>{}</h2><div class=\"block__content\">{}</div></div>",
        block.uuid,
        escape_html(&block.label),
        block.body
    )
}

/// Wrap rendered markup with the attributes the layout editor uses to
/// identify placed elements.
pub fn wrap_for_editor(markup: &str, element: &ElementRef) -> String {
    format!(
        "<div data-layout-editor-object=\"{}\" data-layout-editor-type=\"{}\">{markup}</div>",
        escape_html(&element.id),
        element.kind
    )
}

/// Resolves elements against host content and the plugin block registry.
#[derive(Clone)]
pub struct ElementResolver {
    content: Arc<dyn ContentRepository>,
    plugins: Arc<PluginBlockRegistry>,
}

impl ElementResolver {
    pub fn new(content: Arc<dyn ContentRepository>, plugins: Arc<PluginBlockRegistry>) -> Self {
        Self { content, plugins }
    }

    pub fn plugins(&self) -> &PluginBlockRegistry {
        &self.plugins
    }

    /// Render one element. `None` is an empty render.
    pub async fn resolve(
        &self,
        element: &ElementRef,
        item: &ContentItem,
        content_type: &ContentType,
        viewer: &Viewer,
    ) -> Option<String> {
        match element.kind {
            ElementKind::Field => render_field(item, content_type, &element.id),
            ElementKind::BlockContent => self.resolve_block_content(&element.id).await,
            ElementKind::PluginBlock => self.resolve_plugin_block(&element.id, viewer),
        }
    }

    async fn resolve_block_content(&self, id: &str) -> Option<String> {
        let Ok(uuid) = Uuid::parse_str(id) else {
            tracing::debug!(block_id = %id, "Content block id is not a UUID");
            return None;
        };
        match self.content.find_block_content(uuid).await {
            Ok(Some(block)) => Some(render_block_content(&block)),
            Ok(None) => {
                tracing::debug!(%uuid, "Content block not found");
                None
            }
            Err(err) => {
                tracing::warn!(%uuid, error = %err, "Failed to load content block");
                None
            }
        }
    }

    fn resolve_plugin_block(&self, plugin_id: &str, viewer: &Viewer) -> Option<String> {
        let block = match self
            .plugins
            .create_instance(plugin_id, &BlockConfiguration::new())
        {
            Ok(block) => block,
            Err(err) => {
                tracing::debug!(plugin_id, error = %err, "Plugin block unavailable");
                return None;
            }
        };
        if !block.access(viewer) {
            tracing::debug!(plugin_id, user_id = ?viewer.user_id, "Plugin block access denied");
            return None;
        }
        let provider = self
            .plugins
            .definition(plugin_id)
            .map(|d| d.provider.as_str())
            .unwrap_or("unknown");
        Some(format!(
            "<div class=\"block block-{provider} block-{}\">{}</div>",
            plugin_id.replace('_', "-"),
            block.build()
        ))
    }
}
