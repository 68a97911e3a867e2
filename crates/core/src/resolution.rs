//! Layout Resolution Engine.
//!
//! Decides, for one content item and revision, which template applies and
//! which elements populate which regions.
//!
//! Precedence for the template id: explicit `?layout=` override, then the
//! active template of the item's layout record (exact revision, else the
//! previous one), then the content type default. A template that is unknown
//! or not allowed for the content type falls back to the default.
//!
//! Once a layout applies, only explicitly placed fields are shown. Without a
//! record and without an override the content type's default render is
//! returned untouched.

use serde::Serialize;

use crate::catalog::LayoutTemplate;
use crate::content::{content_type_of, ContentItem};
use crate::context::RequestContext;
use crate::element::{ElementKind, ElementRef};
use crate::engine::LayoutEngine;
use crate::error::CoreError;
use crate::naming::machine_name;
use crate::render::{render_field, wrap_for_editor, ContentBuild};
use crate::store::load_record;
use crate::types::DbId;

/// Base path of the add-content collaborator route.
pub const ADD_CONTENT_ROUTE: &str = "/api/v1/layout-editor";

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One element placed in a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedElement {
    pub element: ElementRef,
    /// Display priority: the element's position in the stored region order.
    pub weight: i32,
    /// Rendered HTML; empty when the element could not be rendered.
    pub markup: String,
    /// Editor metadata, present only in edit mode.
    pub editor: Option<ElementRef>,
}

/// The "add content" affordance injected into each region in edit mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddContentLink {
    pub content_item_id: DbId,
    pub region: String,
}

impl AddContentLink {
    pub fn href(&self) -> String {
        format!(
            "{ADD_CONTENT_ROUTE}/{}/add-content?region={}",
            self.content_item_id, self.region
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionBuild {
    pub name: String,
    pub elements: Vec<PlacedElement>,
    pub add_content: Option<AddContentLink>,
}

/// A content item rendered through a layout template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutBuild {
    pub content_item_id: DbId,
    pub revision_id: DbId,
    pub title: String,
    pub template: LayoutTemplate,
    /// Regions in template order.
    pub regions: Vec<RegionBuild>,
    pub edit_mode: bool,
}

impl LayoutBuild {
    pub fn region(&self, name: &str) -> Option<&RegionBuild> {
        self.regions.iter().find(|r| r.name == name)
    }
}

/// The outcome of resolution for one content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageBuild {
    /// No layout applies; the content type's default render.
    Default { item: ContentItem, build: ContentBuild },
    /// A layout template applies.
    Layout(LayoutBuild),
}

impl PageBuild {
    pub fn as_layout(&self) -> Option<&LayoutBuild> {
        match self {
            Self::Layout(layout) => Some(layout),
            Self::Default { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

impl LayoutEngine {
    /// Resolve the page for the route's content item.
    ///
    /// Returns `Ok(None)` when the request addresses no content item or the
    /// item does not exist; the caller renders without a layout. Layout
    /// storage failures are logged and treated as "no record".
    pub async fn resolve(&self, ctx: &RequestContext) -> Result<Option<PageBuild>, CoreError> {
        let Some(content_item_id) = ctx.route_content_item_id else {
            return Ok(None);
        };
        let item = match ctx.overrides.revision_id {
            Some(revision_id) => {
                self.content
                    .find_revision(content_item_id, revision_id)
                    .await?
            }
            None => self.content.find_item(content_item_id).await?,
        };
        let Some(item) = item else {
            tracing::debug!(content_item_id, "Content item not found, skipping layout");
            return Ok(None);
        };
        let content_type = content_type_of(self.content.as_ref(), &item).await?;
        let mut build = ContentBuild::from_default_display(&item, &content_type);

        let record = match load_record(self.store.as_ref(), item.id, item.revision_id).await {
            Ok(record) => record.filter(|r| !r.is_empty()),
            Err(err) => {
                tracing::warn!(
                    content_item_id,
                    revision_id = item.revision_id,
                    error = %err,
                    "Failed to load layout record, using default layout"
                );
                None
            }
        };
        let override_id = ctx
            .overrides
            .template_id
            .as_deref()
            .map(machine_name)
            .filter(|id| !id.is_empty());

        if record.is_none() && override_id.is_none() {
            return Ok(Some(PageBuild::Default { item, build }));
        }

        let default_template_id = content_type.default_template_id.as_str();
        let requested = override_id
            .or_else(|| record.as_ref().map(|r| r.active_template_id.clone()))
            .unwrap_or_else(|| default_template_id.to_string());

        let template = match self.catalog.allowed_template(&requested, &content_type) {
            Some(template) => template,
            None => {
                tracing::debug!(
                    content_item_id,
                    requested = %requested,
                    default = %default_template_id,
                    "Template unknown or not allowed, falling back to default"
                );
                match self.catalog.get_template(default_template_id) {
                    Ok(template) => template,
                    Err(err) => {
                        tracing::warn!(
                            content_item_id,
                            error = %err,
                            "Default template missing from catalog, rendering without layout"
                        );
                        return Ok(Some(PageBuild::Default { item, build }));
                    }
                }
            }
        };

        let edit_mode = ctx.overrides.edit_mode;
        let mut regions: Vec<RegionBuild> = template
            .region_names
            .iter()
            .map(|name| RegionBuild {
                name: name.clone(),
                elements: Vec::new(),
                add_content: None,
            })
            .collect();

        if let Some(assignment) = record.as_ref().and_then(|r| r.assignment(&template.id)) {
            for (region_name, element) in assignment.iter() {
                let Some(region) = regions.iter_mut().find(|r| r.name == region_name) else {
                    tracing::debug!(
                        content_item_id,
                        template_id = %template.id,
                        region = %region_name,
                        element_id = %element.id,
                        "Skipping element assigned to a region the template does not define"
                    );
                    continue;
                };
                let markup = match element.kind {
                    // Pulled out of the default build so it is not rendered twice.
                    ElementKind::Field => build.take(&element.id),
                    ElementKind::BlockContent | ElementKind::PluginBlock => {
                        self.elements
                            .resolve(&element, &item, &content_type, &ctx.viewer)
                            .await
                    }
                };
                let weight = i32::try_from(region.elements.len()).unwrap_or(i32::MAX);
                region.elements.push(PlacedElement {
                    editor: edit_mode.then(|| element.clone()),
                    element,
                    weight,
                    markup: markup.unwrap_or_default(),
                });
            }
        }

        if !build.is_empty() {
            tracing::debug!(
                content_item_id,
                dropped = build.fields.len(),
                "Dropping fields not placed in the layout"
            );
        }

        if edit_mode {
            for region in &mut regions {
                region.add_content = Some(AddContentLink {
                    content_item_id: item.id,
                    region: region.name.clone(),
                });
            }
        }

        Ok(Some(PageBuild::Layout(LayoutBuild {
            content_item_id: item.id,
            revision_id: item.revision_id,
            title: item.title.clone(),
            template: template.clone(),
            regions,
            edit_mode,
        })))
    }

    /// Render a single element for the editor preview.
    ///
    /// With `container` set the markup is wrapped in the editor metadata
    /// container. Render failures produce an empty string.
    pub async fn render_element(
        &self,
        ctx: &RequestContext,
        content_item_id: DbId,
        element: &ElementRef,
        container: bool,
    ) -> Result<String, CoreError> {
        let (item, content_type) = self.load_with_type(content_item_id).await?;
        let markup = match element.kind {
            ElementKind::Field => render_field(&item, &content_type, &element.id),
            ElementKind::BlockContent | ElementKind::PluginBlock => {
                self.elements
                    .resolve(element, &item, &content_type, &ctx.viewer)
                    .await
            }
        }
        .unwrap_or_default();

        Ok(if container {
            wrap_for_editor(&markup, element)
        } else {
            markup
        })
    }
}
